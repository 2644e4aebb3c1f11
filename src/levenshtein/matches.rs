// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! match extraction from a trace-kernel final row (§4.5): the single
//! subtle invariant of the engine, expressed as the two-pass formulation
//! recommended over the original's intertwined single loop

use crate::error::OutOfRangeError;
use crate::metric::{Cost, Weight};
use crate::trace::EditTrace;

/// `(index, length, d, i, s, distance, success)`
///
/// the zero-initialized value (`Match::failed()`) is the canonical "no
/// match" record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<D> {
    /// start offset of the matching sub-slice inside the pattern sequence
    pub index: usize,
    /// length of the matching sub-slice
    pub length: usize,
    /// elements deleted from the input to realize this match
    pub deletions: usize,
    /// elements inserted into the input to realize this match
    pub insertions: usize,
    /// elements substituted to realize this match
    pub substitutions: usize,
    /// the weighted edit distance of this match
    pub distance: D,
    /// whether this is a real match
    pub success: bool,
}
impl<D: Weight> Match<D> {
    /// the canonical failed match
    pub fn failed() -> Self {
        Self {
            index: 0,
            length: 0,
            deletions: 0,
            insertions: 0,
            substitutions: 0,
            distance: D::zero(),
            success: false,
        }
    }
}

/// a single candidate read directly off the trace row, before grouping
struct Candidate {
    k: usize,
    start: usize,
    length: usize,
    trace: EditTrace,
}

/// the length (in pattern elements) of the match ending at row index `k`,
/// per §4.5: `length = |input| − T[k].d + T[k].i`
fn candidate_length(trace: EditTrace, input_len: usize) -> Option<usize> {
    let length = input_len as isize - trace.deletions as isize + trace.insertions as isize;
    usize::try_from(length).ok()
}

/// pass 1: reads every trace-row cell into a candidate, skipping the
/// zero-length cells §4.5 step 1 calls for whenever the input is non-empty
fn candidates(row: &[EditTrace], input_len: usize) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(row.len());
    for (k, &trace) in row.iter().enumerate() {
        if !trace.success {
            continue;
        }
        let Some(length) = candidate_length(trace, input_len) else {
            continue;
        };
        if length == 0 && input_len > 0 {
            continue;
        }
        let Some(start) = k.checked_sub(length) else {
            continue;
        };
        out.push(Candidate {
            k,
            start,
            length,
            trace,
        });
    }
    out
}

/// pass 2: collapses consecutive candidates sharing the same `start` into
/// the one with the strictly lower total edit count (§4.5 step 2)
fn collapse_runs(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        match out.last_mut() {
            Some(last) if last.start == candidate.start => {
                if candidate.trace.edit_count() < last.trace.edit_count() {
                    *last = candidate;
                }
            }
            _ => out.push(candidate),
        }
    }
    out
}

/// extracts all matches from a trace row, applying the max-distance cap (or,
/// absent a cap, the strictly-improving running-best rule) from §4.5 step 3
///
/// `reverse` scans the row back to front, for `LastMatch`-style callers.
pub fn extract<D: Weight>(
    row: &[EditTrace],
    input_len: usize,
    cost: Cost<D>,
    max_distance: Option<D>,
    reverse: bool,
) -> Vec<Match<D>> {
    let mut candidates = candidates(row, input_len);
    if reverse {
        candidates.reverse();
    }
    let collapsed = collapse_runs(candidates);

    let mut out = Vec::with_capacity(collapsed.len());
    let mut running_best: Option<D> = None;
    for candidate in collapsed {
        let distance = candidate.trace.weighted_distance(cost);
        let accept = match max_distance {
            Some(cap) => distance <= cap,
            None => match running_best {
                None => true,
                Some(best) => distance < best,
            },
        };
        if !accept {
            continue;
        }
        if max_distance.is_none() {
            running_best = Some(distance);
        }
        let zero = distance == D::zero();
        out.push(Match {
            index: candidate.start,
            length: candidate.length,
            deletions: candidate.trace.deletions,
            insertions: candidate.trace.insertions,
            substitutions: candidate.trace.substitutions,
            distance,
            success: true,
        });
        if max_distance.is_none() && zero {
            break;
        }
    }
    out
}

/// an immutable, randomly enumerable view over one owned trace row (§3)
///
/// owns the scratch array from creation until [`MatchCollection::release`]
/// or drop; enumeration never copies the underlying row.
pub struct MatchCollection<D: Weight> {
    matches: Vec<Match<D>>,
}
impl<D: Weight> MatchCollection<D> {
    pub(crate) fn new(row: Vec<EditTrace>, input_len: usize, cost: Cost<D>, max_distance: Option<D>) -> Self {
        Self {
            matches: extract(&row, input_len, cost, max_distance, false),
        }
    }

    /// the number of matches this collection holds
    pub fn len(&self) -> usize {
        self.matches.len()
    }
    /// whether this collection holds no matches
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
    /// the match at `index`, or [`OutOfRangeError`] past the end
    pub fn get(&self, index: usize) -> Result<Match<D>, OutOfRangeError> {
        self.matches.get(index).copied().ok_or(OutOfRangeError {
            index,
            len: self.matches.len(),
        })
    }
    /// iterates the matches in yield order, without consuming the collection
    pub fn iter(&self) -> impl Iterator<Item = &Match<D>> {
        self.matches.iter()
    }
    /// releases the collection's owned scratch row ahead of drop
    ///
    /// provided for API parity with implementations that need an explicit
    /// disposal call; ordinary drop already does this.
    pub fn release(self) {
        drop(self);
    }
}
impl<D: Weight> IntoIterator for MatchCollection<D> {
    type Item = Match<D>;
    type IntoIter = std::vec::IntoIter<Match<D>>;
    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

/// a single-pass, non-restartable view over the same row layout (§3)
///
/// additionally owns the scratch region for release when exhausted or
/// dropped early
pub struct MatchIterator<D: Weight> {
    matches: std::vec::IntoIter<Match<D>>,
}
impl<D: Weight> MatchIterator<D> {
    pub(crate) fn new(row: Vec<EditTrace>, input_len: usize, cost: Cost<D>, max_distance: Option<D>) -> Self {
        Self::from_slice(&row, input_len, cost, max_distance)
    }

    /// builds from a borrowed row rather than an owned one, so a
    /// caller-supplied external scratch buffer never needs to be copied
    /// into a `Vec` just to be handed to this constructor
    pub(crate) fn from_slice(row: &[EditTrace], input_len: usize, cost: Cost<D>, max_distance: Option<D>) -> Self {
        Self {
            matches: extract(row, input_len, cost, max_distance, false).into_iter(),
        }
    }
}
impl<D: Weight> Iterator for MatchIterator<D> {
    type Item = Match<D>;
    fn next(&mut self) -> Option<Self::Item> {
        self.matches.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.matches.size_hint()
    }
}
