// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! the generic Levenshtein engine (C4): distance, ratio, match extraction
//! and counting over arbitrary element sequences
//!
//! every public operation funnels through [`Options`] rather than a long
//! positional argument list, so convenience overloads generated by
//! `#[momo]` can never silently swap two same-typed arguments the way the
//! two `Count` overloads originally did.

mod kernel;
mod matches;

pub use kernel::Mode;
pub use matches::{Match, MatchCollection, MatchIterator};

use crate::comparer::{ElementComparer, Ordinal};
use crate::metric::{Cost, Weight};

/// the unit costs and optional cap shared by every operation in this module
///
/// defaults to unit costs and no cap, matching `spec.md` §4.4's "unit costs
/// defaulted to 1".
#[derive(Debug, Clone, Copy)]
pub struct Options<D: Weight> {
    /// the per-operation edit costs
    pub cost: Cost<D>,
    /// the maximum distance a result may have and still count as a match
    pub max_distance: Option<D>,
}
impl<D: Weight> Default for Options<D> {
    fn default() -> Self {
        Self {
            cost: Cost::default(),
            max_distance: None,
        }
    }
}
impl<D: Weight> Options<D> {
    /// unit costs with the given cap
    pub fn capped(max_distance: D) -> Self {
        Self {
            cost: Cost::default(),
            max_distance: Some(max_distance),
        }
    }
}

/// `⌊0.25·|input|⌋`, the default `IsMatch` cap (§4.4)
fn default_cap(input_len: usize) -> usize {
    input_len / 4
}

/// the scratch-buffer size hint for [`enumerate_matches`], in scalar
/// units: `6·(|pattern|+1)`, enough for two trace rows (§9). Each
/// [`crate::trace::EditTrace`] bundles the three edit-count scalars this
/// hint counts, so a buffer sized by this hint holds exactly
/// [`kernel::trace_buffer_len`]`(pattern_len)` `EditTrace` slots — the size
/// [`enumerate_matches_with_buffer`] actually expects.
pub fn buffer_size_hint(pattern_len: usize) -> usize {
    6 * (pattern_len + 1)
}

/// full-match distance between the two whole sequences
#[momo::momo]
pub fn distance<E, D: Weight>(
    input: impl AsRef<[E]>,
    pattern: impl AsRef<[E]>,
    comparer: &impl ElementComparer<E>,
    cost: Cost<D>,
) -> D {
    kernel::distance(input.as_ref(), pattern.as_ref(), comparer, cost, Mode::FullMatch)
}

/// minimum full-match distance between `input` and any contiguous
/// sub-slice of `pattern`
#[momo::momo]
pub fn subsequence_distance<E, D: Weight>(
    input: impl AsRef<[E]>,
    pattern: impl AsRef<[E]>,
    comparer: &impl ElementComparer<E>,
    cost: Cost<D>,
) -> D {
    kernel::distance(input.as_ref(), pattern.as_ref(), comparer, cost, Mode::Subsequence)
}

/// `1 − normalize(Distance, max(|a|,|b|))`, clamped to `[0, 1]`
#[momo::momo]
pub fn ratio<E>(input: impl AsRef<[E]>, pattern: impl AsRef<[E]>, comparer: &impl ElementComparer<E>) -> f64 {
    let (input, pattern) = (input.as_ref(), pattern.as_ref());
    let longest = input.len().max(pattern.len());
    if longest == 0 {
        return 1.0;
    }
    let d: usize = distance(input, pattern, comparer, Cost::default());
    (1.0 - d as f64 / longest as f64).clamp(0.0, 1.0)
}

/// `1 − normalize(SubsequenceDistance, |input|)`, clamped to `[0, 1]`
#[momo::momo]
pub fn subsequence_ratio<E>(
    input: impl AsRef<[E]>,
    pattern: impl AsRef<[E]>,
    comparer: &impl ElementComparer<E>,
) -> f64 {
    let input = input.as_ref();
    if input.is_empty() {
        return 1.0;
    }
    let d: usize = subsequence_distance(input, pattern.as_ref(), comparer, Cost::default());
    (1.0 - d as f64 / input.len() as f64).clamp(0.0, 1.0)
}

/// `SubsequenceDistance ≤ max_distance`; default cap is `⌊0.25·|input|⌋`
#[momo::momo]
pub fn is_match<E>(
    input: impl AsRef<[E]>,
    pattern: impl AsRef<[E]>,
    comparer: &impl ElementComparer<E>,
    max_distance: Option<usize>,
) -> bool {
    let input = input.as_ref();
    let cap = max_distance.unwrap_or_else(|| default_cap(input.len()));
    let d: usize = subsequence_distance(input, pattern.as_ref(), comparer, Cost::default());
    d <= cap
}

/// `Distance ≤ max_distance`
#[momo::momo]
pub fn is_full_match<E>(
    input: impl AsRef<[E]>,
    pattern: impl AsRef<[E]>,
    comparer: &impl ElementComparer<E>,
    max_distance: Option<usize>,
) -> bool {
    let input = input.as_ref();
    let cap = max_distance.unwrap_or_else(|| default_cap(input.len()));
    let d: usize = distance(input, pattern.as_ref(), comparer, Cost::default());
    d <= cap
}

/// runs the trace kernel once in subsequence mode, as shared groundwork for
/// [`find_match`], [`find_last_match`], [`full_match`], [`matches`] and
/// [`enumerate_matches`]
fn trace_row<E, D: Weight>(
    input: &[E],
    pattern: &[E],
    comparer: &impl ElementComparer<E>,
    cost: Cost<D>,
) -> Vec<crate::trace::EditTrace> {
    kernel::trace_row(input, pattern, comparer, cost, Mode::Subsequence)
}

/// the first qualifying non-overlapping match per §4.5, scanning forward
#[momo::momo]
pub fn find_match<E, D: Weight>(
    input: impl AsRef<[E]>,
    pattern: impl AsRef<[E]>,
    comparer: &impl ElementComparer<E>,
    options: Options<D>,
) -> Match<D> {
    let (input, pattern) = (input.as_ref(), pattern.as_ref());
    let row = trace_row(input, pattern, comparer, options.cost);
    matches::extract(&row, input.len(), options.cost, options.max_distance, false)
        .into_iter()
        .next()
        .unwrap_or_else(Match::failed)
}

/// the same as [`find_match`], scanning the final row in reverse
#[momo::momo]
pub fn find_last_match<E, D: Weight>(
    input: impl AsRef<[E]>,
    pattern: impl AsRef<[E]>,
    comparer: &impl ElementComparer<E>,
    options: Options<D>,
) -> Match<D> {
    let (input, pattern) = (input.as_ref(), pattern.as_ref());
    let row = trace_row(input, pattern, comparer, options.cost);
    matches::extract(&row, input.len(), options.cost, options.max_distance, true)
        .into_iter()
        .next()
        .unwrap_or_else(Match::failed)
}

/// reads the trace cell at column `|pattern|`, i.e. the full-match trace
#[momo::momo]
pub fn full_match<E, D: Weight>(
    input: impl AsRef<[E]>,
    pattern: impl AsRef<[E]>,
    comparer: &impl ElementComparer<E>,
    options: Options<D>,
) -> Match<D> {
    let (input, pattern) = (input.as_ref(), pattern.as_ref());
    let row = kernel::trace_row(input, pattern, comparer, options.cost, Mode::FullMatch);
    let trace = row[pattern.len()];
    if !trace.success {
        return Match::failed();
    }
    let distance = trace.weighted_distance(options.cost);
    if let Some(cap) = options.max_distance {
        if distance > cap {
            return Match::failed();
        }
    }
    Match {
        index: 0,
        length: pattern.len(),
        deletions: trace.deletions,
        insertions: trace.insertions,
        substitutions: trace.substitutions,
        distance,
        success: true,
    }
}

/// eager view that owns the final trace row (§3, §4.4)
#[momo::momo]
pub fn matches<E, D: Weight>(
    input: impl AsRef<[E]>,
    pattern: impl AsRef<[E]>,
    comparer: &impl ElementComparer<E>,
    options: Options<D>,
) -> MatchCollection<D> {
    let (input, pattern) = (input.as_ref(), pattern.as_ref());
    let row = trace_row(input, pattern, comparer, options.cost);
    MatchCollection::new(row, input.len(), options.cost, options.max_distance)
}

/// lazy single-pass view over the same row layout
#[momo::momo]
pub fn enumerate_matches<E, D: Weight>(
    input: impl AsRef<[E]>,
    pattern: impl AsRef<[E]>,
    comparer: &impl ElementComparer<E>,
    options: Options<D>,
) -> MatchIterator<D> {
    let (input, pattern) = (input.as_ref(), pattern.as_ref());
    let row = trace_row(input, pattern, comparer, options.cost);
    MatchIterator::new(row, input.len(), options.cost, options.max_distance)
}

/// the same as [`enumerate_matches`], but writing the trace kernel's two
/// rolling rows into caller-supplied scratch instead of renting from the
/// pool
///
/// `buffer` must hold at least
/// [`kernel::trace_buffer_len`]`(pattern.len())` [`crate::trace::EditTrace`]
/// slots; callers size it with [`buffer_size_hint`] divided across the two
/// rows, or call `kernel::trace_buffer_len` directly. This is the buffer
/// §4.4/§9 describes callers pre-allocating to avoid the pool round-trip
/// entirely on a hot path that repeatedly searches the same-shaped pattern.
#[momo::momo]
pub fn enumerate_matches_with_buffer<E, D: Weight>(
    input: impl AsRef<[E]>,
    pattern: impl AsRef<[E]>,
    comparer: &impl ElementComparer<E>,
    options: Options<D>,
    buffer: &mut [crate::trace::EditTrace],
) -> MatchIterator<D> {
    let (input, pattern) = (input.as_ref(), pattern.as_ref());
    let row = kernel::trace_row_into(input, pattern, comparer, options.cost, Mode::Subsequence, buffer);
    MatchIterator::from_slice(row, input.len(), options.cost, options.max_distance)
}

/// the number of matches [`enumerate_matches`] would yield
#[momo::momo]
pub fn count<E, D: Weight>(
    input: impl AsRef<[E]>,
    pattern: impl AsRef<[E]>,
    comparer: &impl ElementComparer<E>,
    options: Options<D>,
) -> usize {
    enumerate_matches(input.as_ref(), pattern.as_ref(), comparer, options).count()
}

/// convenience entry point using [`Ordinal`] equality and default options
pub fn distance_str(input: &str, pattern: &str) -> usize {
    let (a, b): (Vec<char>, Vec<char>) = (input.chars().collect(), pattern.chars().collect());
    distance(&a, &b, &Ordinal, Cost::default())
}
