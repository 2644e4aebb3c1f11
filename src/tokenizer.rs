// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! tokenizers (C6): splitting names into searchable tokens

/// splits an input string into a lazy sequence of tokens
pub trait Tokenizer {
    /// the token iterator this tokenizer produces for `input`
    type Tokens<'a>: Iterator<Item = &'a str>
    where
        Self: 'a;

    /// tokenizes `input`
    fn tokenize<'a>(&'a self, input: &'a str) -> Self::Tokens<'a>;
}

/// splits on runs of non-word characters and discards empty pieces,
/// preserving the original case of each token (§6)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    type Tokens<'a> = std::iter::Filter<std::str::Split<'a, fn(char) -> bool>, fn(&&str) -> bool>;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::Tokens<'a> {
        fn is_non_word(c: char) -> bool {
            !(c.is_alphanumeric() || c == '_')
        }
        fn is_non_empty(piece: &&str) -> bool {
            !piece.is_empty()
        }
        input.split(is_non_word as fn(char) -> bool).filter(is_non_empty as fn(&&str) -> bool)
    }
}
