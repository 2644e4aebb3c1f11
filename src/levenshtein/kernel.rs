// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! the core dynamic-programming kernel (§4.3): two rolling rows of length
//! `|pattern|+1`, run either in full-match mode (both whole sequences) or
//! subsequence mode (input against any contiguous sub-slice of pattern)

use crate::buffer::ScopedBuffer;
use crate::comparer::ElementComparer;
use crate::metric::{Cost, Weight};
use crate::trace::EditTrace;

/// which boundary condition row 0 uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// row 0 is `0, cI, 2cI, ...`: both whole sequences are compared
    FullMatch,
    /// row 0 is all zeros: the input may start matching anywhere in the pattern
    Subsequence,
}

/// runs the scalar distance kernel, returning `row[|pattern|]` in
/// [`Mode::FullMatch`] or `min(row)` in [`Mode::Subsequence`]
///
/// in [`Mode::FullMatch`], when `input` is shorter than `pattern` the
/// operands (and the deletion/insertion costs) are swapped so the shorter
/// sequence runs along the row axis, for cache locality; this is purely an
/// optimization; the returned distance is unaffected.
pub fn distance<E, D: Weight>(
    input: &[E],
    pattern: &[E],
    comparer: &impl ElementComparer<E>,
    cost: Cost<D>,
    mode: Mode,
) -> D {
    if mode == Mode::FullMatch && input.len() < pattern.len() {
        let swapped_cost = Cost {
            deletion: cost.insertion,
            insertion: cost.deletion,
            substitution: cost.substitution,
        };
        return distance_rows(pattern, input, comparer, swapped_cost, mode);
    }
    distance_rows(input, pattern, comparer, cost, mode)
}

fn distance_rows<E, D: Weight>(
    input: &[E],
    pattern: &[E],
    comparer: &impl ElementComparer<E>,
    cost: Cost<D>,
    mode: Mode,
) -> D {
    let width = pattern.len() + 1;
    let mut row0 = ScopedBuffer::<D>::rent(width);
    let mut row1 = ScopedBuffer::<D>::rent(width);
    let row0 = row0.as_mut_slice();
    let row1 = row1.as_mut_slice();

    init_boundary_row(row0, cost, mode);

    for (i, a_elem) in input.iter().enumerate() {
        let _ = i;
        row1[0] = row0[0] + cost.deletion;
        for j in 0..pattern.len() {
            let match_cost = if comparer.equals(a_elem, &pattern[j]) {
                D::zero()
            } else {
                cost.substitution
            };
            row1[j + 1] = min3(
                row0[j + 1] + cost.deletion,
                row1[j] + cost.insertion,
                row0[j] + match_cost,
            );
        }
        row0.copy_from_slice(row1);
    }

    match mode {
        Mode::FullMatch => row0[pattern.len()],
        Mode::Subsequence => row0.iter().copied().min().unwrap_or_else(D::zero),
    }
}

fn init_boundary_row<D: Weight>(row: &mut [D], cost: Cost<D>, mode: Mode) {
    match mode {
        Mode::FullMatch => {
            let mut acc = D::zero();
            for cell in row.iter_mut() {
                *cell = acc;
                acc = acc + cost.insertion;
            }
        }
        Mode::Subsequence => row.fill(D::zero()),
    }
}

fn min3<D: Ord>(a: D, b: D, c: D) -> D {
    a.min(b).min(c)
}

/// the number of [`EditTrace`] slots an external buffer passed to
/// [`trace_row_into`] must hold: two rolling rows of `|pattern|+1` each
pub const fn trace_buffer_len(pattern_len: usize) -> usize {
    2 * (pattern_len + 1)
}

/// runs the trace kernel, returning the final row of `|pattern|+1`
/// [`EditTrace`] values, one per pattern prefix length
///
/// unlike [`distance`], this never swaps operands: the row layout is a
/// public contract (one entry per prefix of `pattern`), so `input` and
/// `pattern` always keep their given roles. The two rolling rows are rented
/// from the [`ScopedBuffer`] pool rather than freshly heap-allocated, per
/// `spec.md` §1/§4.2; the final row is copied out once into the `Vec` this
/// function commits to returning.
pub fn trace_row<E, D: Weight>(
    input: &[E],
    pattern: &[E],
    comparer: &impl ElementComparer<E>,
    cost: Cost<D>,
    mode: Mode,
) -> Vec<EditTrace> {
    let width = pattern.len() + 1;
    let mut scratch = ScopedBuffer::<EditTrace>::rent(trace_buffer_len(pattern.len()));
    let row = trace_row_into(input, pattern, comparer, cost, mode, scratch.as_mut_slice());
    debug_assert_eq!(width, row.len());
    row.to_vec()
}

/// the same recurrence as [`trace_row`], writing its two rolling rows into
/// caller-supplied scratch instead of renting from the pool
///
/// `buffer` must hold at least [`trace_buffer_len`]`(pattern.len())`
/// elements. Returns the final row, always located at `buffer[..width]` on
/// return (the rows are swapped back into place if the last swap left the
/// result in the second half) so callers have a stable slice to read.
pub fn trace_row_into<'b, E, D: Weight>(
    input: &[E],
    pattern: &[E],
    comparer: &impl ElementComparer<E>,
    cost: Cost<D>,
    mode: Mode,
    buffer: &'b mut [EditTrace],
) -> &'b [EditTrace] {
    let width = pattern.len() + 1;
    assert!(
        buffer.len() >= trace_buffer_len(pattern.len()),
        "trace buffer too small: need {}, got {}",
        trace_buffer_len(pattern.len()),
        buffer.len()
    );
    let (first_half, second_half) = buffer[..2 * width].split_at_mut(width);
    let second_half_ptr = second_half.as_ptr();
    let mut row0 = first_half;
    let mut row1 = second_half;

    init_trace_boundary(row0, mode);

    for a_elem in input {
        row1[0] = EditTrace::new(row0[0].deletions + 1, row0[0].insertions, row0[0].substitutions);
        for j in 0..pattern.len() {
            let is_match = comparer.equals(a_elem, &pattern[j]);
            let deletion = EditTrace::new(
                row0[j + 1].deletions + 1,
                row0[j + 1].insertions,
                row0[j + 1].substitutions,
            );
            let insertion = EditTrace::new(
                row1[j].deletions,
                row1[j].insertions + 1,
                row1[j].substitutions,
            );
            let substitution = if is_match {
                row0[j]
            } else {
                EditTrace::new(
                    row0[j].deletions,
                    row0[j].insertions,
                    row0[j].substitutions + 1,
                )
            };
            row1[j + 1] = best_of(deletion, insertion, substitution, cost);
        }
        std::mem::swap(&mut row0, &mut row1);
    }

    let final_in_second_half = std::ptr::eq(row0.as_ptr(), second_half_ptr);
    if final_in_second_half {
        buffer.copy_within(width..2 * width, 0);
    }
    &buffer[..width]
}

fn init_trace_boundary(row: &mut [EditTrace], mode: Mode) {
    match mode {
        Mode::FullMatch => {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = EditTrace::new(0, j, 0);
            }
        }
        Mode::Subsequence => row.fill(EditTrace::new(0, 0, 0)),
    }
}

/// picks the winning candidate by weighted distance, preferring deletion,
/// then insertion, then substitution on ties (§4.3)
fn best_of<D: Weight>(
    deletion: EditTrace,
    insertion: EditTrace,
    substitution: EditTrace,
    cost: Cost<D>,
) -> EditTrace {
    let mut best = deletion;
    let mut best_cost = deletion.weighted_distance(cost);
    let insertion_cost = insertion.weighted_distance(cost);
    if insertion_cost < best_cost {
        best = insertion;
        best_cost = insertion_cost;
    }
    let substitution_cost = substitution.weighted_distance(cost);
    if substitution_cost < best_cost {
        best = substitution;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::Ordinal;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn kitten_sitting_distance_is_three() {
        let a = chars("kitten");
        let b = chars("sitting");
        let d = distance(&a, &b, &Ordinal, Cost::<usize>::default(), Mode::FullMatch);
        assert_eq!(3, d);
    }

    #[test]
    fn distance_is_symmetric_for_symmetric_costs() {
        let a = chars("flaw");
        let b = chars("lawn");
        let cost = Cost::<usize>::default();
        let d_ab = distance(&a, &b, &Ordinal, cost, Mode::FullMatch);
        let d_ba = distance(&b, &a, &Ordinal, cost, Mode::FullMatch);
        assert_eq!(d_ab, d_ba);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = chars("identical");
        let d = distance(&a, &a, &Ordinal, Cost::<usize>::default(), Mode::FullMatch);
        assert_eq!(0, d);
    }

    #[test]
    fn subsequence_distance_never_exceeds_full_match() {
        let input = chars("cat");
        let pattern = chars("concatenate");
        let cost = Cost::<usize>::default();
        let full = distance(&input, &pattern, &Ordinal, cost, Mode::FullMatch);
        let sub = distance(&input, &pattern, &Ordinal, cost, Mode::Subsequence);
        assert!(sub <= full);
        assert_eq!(0, sub, "cat is an exact substring of concatenate");
    }

    #[test]
    fn trace_row_final_distance_matches_scalar_kernel() {
        let a = chars("kitten");
        let b = chars("sitting");
        let cost = Cost::<usize>::default();
        let row = trace_row(&a, &b, &Ordinal, cost, Mode::FullMatch);
        assert_eq!(
            distance(&a, &b, &Ordinal, cost, Mode::FullMatch),
            row[b.len()].weighted_distance(cost)
        );
    }

    #[test]
    fn full_match_trace_boundary_counts_insertions() {
        let row = trace_row::<char, usize>(&[], &chars("abc"), &Ordinal, Cost::default(), Mode::FullMatch);
        assert_eq!(3, row[3].weighted_distance(Cost::default()));
        assert_eq!(3, row[3].insertions);
    }

    #[test]
    fn trace_row_into_agrees_with_pooled_trace_row() {
        let a = chars("kitten");
        let b = chars("sitting");
        let cost = Cost::<usize>::default();
        let pooled = trace_row(&a, &b, &Ordinal, cost, Mode::FullMatch);

        let mut buffer = vec![EditTrace::FAILURE; trace_buffer_len(b.len())];
        let via_buffer = trace_row_into(&a, &b, &Ordinal, cost, Mode::FullMatch, &mut buffer);
        assert_eq!(pooled.as_slice(), via_buffer);
    }

    #[test]
    fn trace_buffer_len_holds_two_rows() {
        assert_eq!(16, trace_buffer_len(7));
    }

    #[test]
    #[should_panic(expected = "trace buffer too small")]
    fn trace_row_into_panics_on_undersized_buffer() {
        let a = chars("ab");
        let b = chars("abc");
        let mut tiny = vec![EditTrace::FAILURE; 1];
        let _ = trace_row_into(&a, &b, &Ordinal, Cost::<usize>::default(), Mode::FullMatch, &mut tiny);
    }
}
