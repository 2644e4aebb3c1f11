// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! the inverted index (§3): a frozen `token -> items` mapping, built once
//! at provider construction

use std::collections::HashMap;

use crate::comparer::StringComparer;
use crate::tokenizer::Tokenizer;

/// a frozen mapping from token to the distinct indices of items whose name
/// contained that token after tokenization
///
/// immutable after [`InvertedIndex::build`]; every bucket is non-empty and
/// holds no duplicate index, per §3's invariants. Keys are folded through
/// the element comparer chosen at construction (§3: "Keys are compared
/// using an element comparer chosen at construction"), so e.g. an
/// `InvariantIgnoreCase`-keyed index merges `"Red"` and `"red"` into one
/// bucket instead of bucketing by `String`'s own ordinal equality.
pub(crate) struct InvertedIndex {
    buckets: HashMap<String, Vec<usize>>,
}

impl InvertedIndex {
    pub(crate) fn build<'i, T: 'i>(
        items: impl Iterator<Item = &'i T>,
        name_of: &impl Fn(&T) -> &str,
        tokenizer: &impl Tokenizer,
        comparer: &impl StringComparer,
    ) -> Self {
        let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, item) in items.enumerate() {
            for token in tokenizer.tokenize(name_of(item)) {
                let bucket = buckets.entry(comparer.fold_key(token)).or_default();
                if !bucket.contains(&index) {
                    bucket.push(index);
                }
            }
        }
        Self { buckets }
    }

    /// looks up the bucket for `token`, folded through the same comparer
    /// this index was built with
    pub(crate) fn lookup(&self, token: &str, comparer: &impl StringComparer) -> Option<&[usize]> {
        self.buckets.get(&comparer.fold_key(token)).map(Vec::as_slice)
    }

    pub(crate) fn tokens(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }
}
