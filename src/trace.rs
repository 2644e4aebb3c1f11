// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! the edit trace record (C3): counts of deletions, insertions and
//! substitutions that realize a given edit distance

use crate::metric::{Cost, Weight};

/// `(deletions, insertions, substitutions)` plus a success flag
///
/// `spec.md` §3 notes the success bit can be packed into the sign of the
/// substitution count to keep the record compact; that is a performance
/// choice, not a correctness one, and this implementation keeps the fields
/// explicit since nothing in this crate is hot enough at the per-byte level
/// to need the packed representation the original description allows for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct EditTrace {
    /// number of elements deleted from the input
    pub deletions: usize,
    /// number of elements inserted into the input
    pub insertions: usize,
    /// number of elements substituted
    pub substitutions: usize,
    /// whether this trace represents a realized match at all
    pub success: bool,
}
impl EditTrace {
    /// the zero trace, `success = false`: the canonical "no match" value
    pub const FAILURE: Self = Self {
        deletions: 0,
        insertions: 0,
        substitutions: 0,
        success: false,
    };

    /// a successful trace with the given edit counts
    pub const fn new(deletions: usize, insertions: usize, substitutions: usize) -> Self {
        Self {
            deletions,
            insertions,
            substitutions,
            success: true,
        }
    }

    /// total number of edits this trace represents
    pub const fn edit_count(&self) -> usize {
        self.deletions + self.insertions + self.substitutions
    }

    /// the weighted distance `d*cD + i*cI + s*cS` for the given unit costs
    pub fn weighted_distance<D: Weight>(&self, cost: Cost<D>) -> D {
        cost.deletion.repeated(self.deletions)
            + cost.insertion.repeated(self.insertions)
            + cost.substitution.repeated(self.substitutions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_is_zeroed() {
        assert_eq!(0, EditTrace::FAILURE.edit_count());
        assert!(!EditTrace::FAILURE.success);
    }

    #[test]
    fn weighted_distance_sums_each_kind() {
        let trace = EditTrace::new(2, 1, 3);
        let cost = Cost {
            deletion: 2_usize,
            insertion: 3,
            substitution: 1,
        };
        assert_eq!(2 * 2 + 1 * 3 + 3 * 1, trace.weighted_distance(cost));
    }
}
