// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! spell checking (C7): vocabulary membership plus BK-tree-backed fuzzy
//! suggestions

use std::collections::HashSet;

use crate::bktree::BkTree;
use crate::metric::{DistanceMetric, LevenshteinMetric, MaxDistanceMetric, RatioMaxDistance};

/// the result of [`SpellChecker::check_spelling`]
#[derive(Debug, Clone, PartialEq)]
pub struct SpellingResult {
    /// whether the word was found in the vocabulary as-is
    pub correct: bool,
    /// suggestions ordered ascending by distance; empty when `correct`
    pub suggestions: Vec<(String, usize)>,
}

/// `CheckSpelling` / `TryFixSpelling` (§4.7)
pub trait SpellChecker {
    /// checks whether `word` is in the vocabulary, producing suggestions
    /// when it is not
    fn check_spelling(&self, word: &str) -> SpellingResult;
    /// `word` itself if already correct, otherwise the single nearest
    /// vocabulary entry within its max-distance radius
    fn try_fix_spelling(&self, word: &str) -> Option<String>;
}

/// always reports the word as correctly spelled
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSpellChecker;
impl SpellChecker for NullSpellChecker {
    fn check_spelling(&self, _word: &str) -> SpellingResult {
        SpellingResult {
            correct: true,
            suggestions: Vec::new(),
        }
    }
    fn try_fix_spelling(&self, word: &str) -> Option<String> {
        Some(word.to_owned())
    }
}

/// a vocabulary set plus a BK-tree, keyed by a distance metric and a
/// per-word max-distance metric (§4.7)
pub struct BkSpellChecker<M, MX> {
    vocabulary: HashSet<String>,
    tree: BkTree<String, usize, M>,
    max_distance: MX,
    max_suggestions: Option<usize>,
}

impl BkSpellChecker<LevenshteinMetric, RatioMaxDistance> {
    /// a checker over `vocabulary` using case-sensitive Levenshtein
    /// distance and a 25% length-ratio radius, the defaults §4.8 also uses
    /// for the search provider's spell checker
    pub fn new(vocabulary: impl IntoIterator<Item = String>) -> Self {
        Self::with_metric(vocabulary, LevenshteinMetric::default(), RatioMaxDistance::default(), None)
    }
}

impl<M, MX> BkSpellChecker<M, MX>
where
    M: DistanceMetric<String, usize>,
    MX: MaxDistanceMetric<String, usize>,
{
    /// a checker over `vocabulary` using the given distance metric and
    /// per-word max-distance metric
    pub fn with_metric(
        vocabulary: impl IntoIterator<Item = String>,
        metric: M,
        max_distance: MX,
        max_suggestions: Option<usize>,
    ) -> Self {
        let words: Vec<String> = vocabulary.into_iter().collect();
        let mut tree = BkTree::new(metric);
        for word in &words {
            tree.insert(word.clone());
        }
        Self {
            vocabulary: words.into_iter().collect(),
            tree,
            max_distance,
            max_suggestions,
        }
    }
}

impl<M, MX> SpellChecker for BkSpellChecker<M, MX>
where
    M: DistanceMetric<String, usize>,
    MX: MaxDistanceMetric<String, usize>,
{
    fn check_spelling(&self, word: &str) -> SpellingResult {
        if self.vocabulary.contains(word) {
            return SpellingResult {
                correct: true,
                suggestions: Vec::new(),
            };
        }
        let key = word.to_owned();
        let radius = self.max_distance.max_distance(&key);
        let suggestions = self
            .tree
            .find_all(&key, radius, self.max_suggestions)
            .into_iter()
            .map(|(value, d)| (value.clone(), d))
            .collect();
        SpellingResult {
            correct: false,
            suggestions,
        }
    }

    fn try_fix_spelling(&self, word: &str) -> Option<String> {
        if self.vocabulary.contains(word) {
            return Some(word.to_owned());
        }
        let key = word.to_owned();
        let radius = self.max_distance.max_distance(&key);
        self.tree.find(&key, Some(radius)).map(|(value, _)| value.clone())
    }
}

#[cfg(feature = "async")]
mod r#async {
    use super::{SpellChecker, SpellingResult};

    /// a thin, non-suspending async wrapper around [`SpellChecker`] (§4.8,
    /// §5), mirroring [`crate::search::AsyncSearchProvider`]: present for
    /// interface symmetry, it never actually suspends
    #[async_trait::async_trait]
    pub trait AsyncSpellChecker {
        /// the async counterpart of [`SpellChecker::check_spelling`]
        async fn check_spelling(&self, word: &str) -> SpellingResult;
        /// the async counterpart of [`SpellChecker::try_fix_spelling`]
        async fn try_fix_spelling(&self, word: &str) -> Option<String>;
    }

    #[async_trait::async_trait]
    impl<C: SpellChecker + Sync> AsyncSpellChecker for C {
        async fn check_spelling(&self, word: &str) -> SpellingResult {
            SpellChecker::check_spelling(self, word)
        }
        async fn try_fix_spelling(&self, word: &str) -> Option<String> {
            SpellChecker::try_fix_spelling(self, word)
        }
    }
}
#[cfg(feature = "async")]
pub use r#async::AsyncSpellChecker;


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;

    #[tokio::test]
    async fn async_check_spelling_matches_sync() {
        let checker = BkSpellChecker::new(words());
        let result = AsyncSpellChecker::check_spelling(&checker, "cool").await;
        assert_eq!(checker.check_spelling("cool"), result);
    }
}
