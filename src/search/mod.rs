// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! the search provider (C8): inverted-index lookup over spell-normalized
//! query tokens, producing a primary hit plus ranked suggestions

mod index;

use index::InvertedIndex;
use itertools::Itertools as _;

use crate::comparer::{Ordinal, StringComparer};
use crate::metric::{LevenshteinMetric, RatioMaxDistance};
use crate::spellcheck::{BkSpellChecker, SpellChecker};
use crate::tokenizer::{Tokenizer, WordTokenizer};

/// `max_suggestions`, per §3: `0` emits none (the default), `-1` means no
/// cap, and any positive `n` caps the suggestion list at `n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxSuggestions {
    /// emit no suggestions
    #[default]
    None,
    /// no cap
    Unbounded,
    /// at most this many suggestions
    Capped(usize),
}
impl MaxSuggestions {
    fn as_cap(self) -> Option<usize> {
        match self {
            Self::None => Some(0),
            Self::Unbounded => None,
            Self::Capped(n) => Some(n),
        }
    }
}

/// a search provider's configuration record (§3)
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// how many suggestions to emit
    pub max_suggestions: MaxSuggestions,
}

/// `(success, value?, suggestions)` (§3)
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<'a, T> {
    /// the primary hit, present iff the search succeeded
    pub value: Option<&'a T>,
    /// suggestions, sorted ascending by rank then the relative-length
    /// tiebreak (§4.8)
    pub suggestions: Vec<(&'a T, f64)>,
}
impl<'a, T> SearchResult<'a, T> {
    /// whether this result has a primary hit
    pub fn success(&self) -> bool {
        self.value.is_some()
    }
}

/// `compare(x, y) = |len(x) − len(query)| − |len(y) − len(query)|` (§4.8)
fn relative_length_distance(name: &str, query_char_len: usize) -> usize {
    (name.chars().count() as isize - query_char_len as isize).unsigned_abs()
}

/// the capability a query is run against: inverted-index lookup, tree
/// combinators and async wrappers all implement this
pub trait SearchProvider<T> {
    /// runs a query, per §4.8's five-step procedure
    fn search(&self, query: &str, options: SearchOptions) -> SearchResult<'_, T>;

    /// exists for parity with the Levenshtein engine's match-style APIs;
    /// semantically identical to [`SearchProvider::search`] for this
    /// provider family (§4.8)
    fn search_last(&self, query: &str, options: SearchOptions) -> SearchResult<'_, T> {
        self.search(query, options)
    }
}

/// an inverted index of tokenized item names plus a spell checker over the
/// vocabulary of tokens (§4.8)
pub struct InvertedIndexProvider<T, F, C = Ordinal> {
    items: Vec<T>,
    name_of: F,
    index: InvertedIndex,
    spell_checker: BkSpellChecker<LevenshteinMetric<C>, RatioMaxDistance>,
    tokenizer: WordTokenizer,
    name_comparer: C,
}

impl<T, F: Fn(&T) -> &str> InvertedIndexProvider<T, F, Ordinal> {
    /// builds a provider over `items`, using case-sensitive Levenshtein
    /// distance, a 25% max-distance ratio and the default word tokenizer —
    /// the defaults §4.8 names for construction
    pub fn new(items: impl IntoIterator<Item = T>, name_of: F) -> Self {
        Self::with_metric(items, name_of, Ordinal)
    }
}

impl<T, F: Fn(&T) -> &str, C: StringComparer + Clone> InvertedIndexProvider<T, F, C> {
    /// builds a provider using `comparer` for both token distance (via
    /// [`LevenshteinMetric`]) and final name equality (§4.8 step 5)
    pub fn with_metric(items: impl IntoIterator<Item = T>, name_of: F, comparer: C) -> Self {
        let items: Vec<T> = items.into_iter().collect();
        let tokenizer = WordTokenizer;
        let index = InvertedIndex::build(items.iter(), &name_of, &tokenizer, &comparer);
        let tokens: Vec<String> = index.tokens().map(str::to_owned).collect();
        log::debug!(
            "built inverted index over {} items, {} distinct tokens",
            items.len(),
            tokens.len()
        );
        let spell_checker = BkSpellChecker::with_metric(
            tokens,
            LevenshteinMetric(comparer.clone()),
            RatioMaxDistance::default(),
            None,
        );
        Self {
            items,
            name_of,
            index,
            spell_checker,
            tokenizer,
            name_comparer: comparer,
        }
    }
}

impl<T, F: Fn(&T) -> &str, C: StringComparer> SearchProvider<T> for InvertedIndexProvider<T, F, C> {
    fn search(&self, query: &str, options: SearchOptions) -> SearchResult<'_, T> {
        let corrected_tokens: Vec<String> = self
            .tokenizer
            .tokenize(query)
            .map(|token| {
                self.spell_checker
                    .try_fix_spelling(token)
                    .unwrap_or_else(|| token.to_owned())
            })
            .collect_vec();
        let total = corrected_tokens.len();
        if total == 0 {
            return SearchResult {
                value: None,
                suggestions: Vec::new(),
            };
        }

        let mut hits: std::collections::HashMap<usize, usize> = std::collections::HashMap::new();
        for token in &corrected_tokens {
            if let Some(bucket) = self.index.lookup(token, &self.name_comparer) {
                for &item_index in bucket {
                    *hits.entry(item_index).or_insert(0) += 1;
                }
            }
        }

        let query_char_len = query.chars().count();
        let candidates = hits
            .into_iter()
            .map(|(item_index, hit_count)| (item_index, 1.0 - hit_count as f64 / total as f64))
            .sorted_by(|&(a_idx, a_rank), &(b_idx, b_rank)| {
                a_rank
                    .partial_cmp(&b_rank)
                    .expect("ranks are always finite")
                    .then_with(|| {
                        let a_tiebreak = relative_length_distance((self.name_of)(&self.items[a_idx]), query_char_len);
                        let b_tiebreak = relative_length_distance((self.name_of)(&self.items[b_idx]), query_char_len);
                        a_tiebreak.cmp(&b_tiebreak)
                    })
                    // §4.8's ordering is `(rank, relative-length tiebreak)`;
                    // ties surviving both (HashMap draining in arbitrary,
                    // per-process-randomized order) still need a stable,
                    // deterministic resolution, so the item's own index is
                    // the final tiebreak
                    .then_with(|| a_idx.cmp(&b_idx))
            });

        let cap = options.max_suggestions.as_cap();
        let mut value = None;
        let mut suggestions = Vec::new();
        for (item_index, rank) in candidates {
            let item = &self.items[item_index];
            if value.is_none() && rank == 0.0 && self.name_comparer.strings_equal((self.name_of)(item), query) {
                value = Some(item);
                continue;
            }
            if cap.is_none_or(|cap| suggestions.len() < cap) {
                suggestions.push((item, rank));
            }
        }
        SearchResult { value, suggestions }
    }
}

/// given an ordered sequence of providers, returns the first successful
/// result, concatenating every provider's suggestions and re-sorting by
/// rank, capped at `max_suggestions` (§4.8)
pub struct Combine<'p, T> {
    providers: Vec<&'p dyn SearchProvider<T>>,
}
impl<'p, T> Combine<'p, T> {
    /// combines `providers`, tried in order
    pub fn new(providers: Vec<&'p dyn SearchProvider<T>>) -> Self {
        Self { providers }
    }

    /// runs `query` against every provider, in order
    pub fn search(&self, query: &str, options: SearchOptions) -> SearchResult<'p, T> {
        let mut value = None;
        let mut suggestions = Vec::new();
        for provider in &self.providers {
            let result = provider.search(
                query,
                SearchOptions {
                    max_suggestions: MaxSuggestions::Unbounded,
                },
            );
            if value.is_none() && result.value.is_some() {
                value = result.value;
            }
            suggestions.extend(result.suggestions);
        }
        let mut suggestions = suggestions
            .into_iter()
            .sorted_by(|a, b| a.1.partial_cmp(&b.1).expect("ranks are always finite"))
            .collect_vec();
        if let Some(cap) = options.max_suggestions.as_cap() {
            suggestions.truncate(cap);
        }
        SearchResult { value, suggestions }
    }
}

#[cfg(feature = "async")]
mod r#async {
    use super::{SearchOptions, SearchProvider, SearchResult};

    /// a thin, non-suspending async wrapper around [`SearchProvider`] (§4.8,
    /// §5): present purely for interface symmetry, it never actually
    /// suspends
    #[async_trait::async_trait]
    pub trait AsyncSearchProvider<T: Sync> {
        /// the async counterpart of [`SearchProvider::search`]
        async fn search(&self, query: &str, options: SearchOptions) -> SearchResult<'_, T>;
    }

    #[async_trait::async_trait]
    impl<T: Sync, P: SearchProvider<T> + Sync> AsyncSearchProvider<T> for P {
        async fn search(&self, query: &str, options: SearchOptions) -> SearchResult<'_, T> {
            SearchProvider::search(self, query, options)
        }
    }
}
#[cfg(feature = "async")]
pub use r#async::AsyncSearchProvider;

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) struct Item {
        pub(super) name: String,
    }

    pub(super) fn provider() -> InvertedIndexProvider<Item, fn(&Item) -> &str> {
        let items = ["red apple", "green apple", "red car", "blue boat"]
            .into_iter()
            .map(|name| Item { name: name.to_owned() })
            .collect::<Vec<_>>();
        InvertedIndexProvider::new(items, |item: &Item| item.name.as_str())
    }

    #[test]
    fn exact_name_is_the_primary_hit() {
        let provider = provider();
        let result = provider.search("red apple", SearchOptions::default());
        assert!(result.success());
        assert_eq!("red apple", result.value.unwrap().name);
    }

    #[test]
    fn partial_token_overlap_ranks_below_exact_match() {
        let provider = provider();
        let result = provider.search(
            "red",
            SearchOptions {
                max_suggestions: MaxSuggestions::Unbounded,
            },
        );
        assert!(!result.success(), "\"red\" alone never equals a two-token name");
        let names: Vec<_> = result.suggestions.iter().map(|(item, _)| item.name.as_str()).collect();
        assert!(names.contains(&"red apple"));
        assert!(names.contains(&"red car"));
        assert!(!names.contains(&"blue boat"));
    }

    #[test]
    fn default_options_emit_no_suggestions() {
        let provider = provider();
        let result = provider.search("red", SearchOptions::default());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn case_insensitive_metric_finds_differently_cased_token_bucket() {
        use crate::comparer::InvariantIgnoreCase;

        let items = ["Red Apple", "Green Apple"]
            .into_iter()
            .map(|name| Item { name: name.to_owned() })
            .collect::<Vec<_>>();
        let provider =
            InvertedIndexProvider::with_metric(items, |item: &Item| item.name.as_str(), InvariantIgnoreCase);

        let result = provider.search(
            "red",
            SearchOptions {
                max_suggestions: MaxSuggestions::Unbounded,
            },
        );
        let names: Vec<_> = result.suggestions.iter().map(|(item, _)| item.name.as_str()).collect();
        assert!(
            names.contains(&"Red Apple"),
            "lowercase query token must hit the bucket built from the capitalized \"Red\" token"
        );
    }

    #[test]
    fn misspelled_token_is_corrected_before_lookup() {
        let provider = provider();
        // "redd" is within the spell checker's radius of the "red" token
        let result = provider.search(
            "redd apple",
            SearchOptions {
                max_suggestions: MaxSuggestions::Unbounded,
            },
        );
        assert!(result.success());
        assert_eq!("red apple", result.value.unwrap().name);
    }

    #[test]
    fn search_last_agrees_with_search() {
        let provider = provider();
        let options = SearchOptions::default();
        let search = provider.search("red apple", options);
        let search_last = provider.search_last("red apple", options);
        assert_eq!(search.value.map(|item| &item.name), search_last.value.map(|item| &item.name));
    }

    #[test]
    fn combine_returns_first_success_and_merges_suggestions() {
        let empty_items: Vec<Item> = Vec::new();
        let empty_provider = InvertedIndexProvider::new(empty_items, |item: &Item| item.name.as_str());
        let main_provider = provider();
        let combined = Combine::new(vec![&empty_provider, &main_provider]);
        let result = combined.search(
            "red apple",
            SearchOptions {
                max_suggestions: MaxSuggestions::Unbounded,
            },
        );
        assert!(result.success());
        assert_eq!("red apple", result.value.unwrap().name);
    }
}

#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::tests::*;
    use super::*;

    #[tokio::test]
    async fn async_search_matches_sync_search() {
        let provider = provider();
        let result = AsyncSearchProvider::search(&provider, "red apple", SearchOptions::default()).await;
        assert!(result.success());
        assert_eq!("red apple", result.value.unwrap().name);
    }
}
