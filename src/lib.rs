// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

#![warn(
    clippy::nursery,
    clippy::pedantic,
    clippy::empty_structs_with_brackets,
    clippy::format_push_string,
    clippy::if_then_some_else_none,
    clippy::impl_trait_in_params,
    clippy::missing_assert_message,
    clippy::multiple_inherent_impl,
    clippy::non_ascii_literal,
    clippy::self_named_module_files,
    clippy::semicolon_inside_block,
    clippy::separated_literal_suffix,
    clippy::str_to_string,
    clippy::string_to_string,
    missing_docs,
    unsafe_op_in_unsafe_fn
)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::cast_sign_loss,
    clippy::single_match_else,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! generic Levenshtein matching, a BK-tree metric index and an
//! inverted-index search provider
//!
//! the engine is built from small capabilities, leaves first:
//! [`comparer`] (element equality) composes into [`metric`] (distance and
//! max-distance), which [`levenshtein`] and [`bktree`] both consume.
//! [`tokenizer`] and [`spellcheck`] sit above the tree, and [`search`] ties
//! everything together into a query-answering provider. [`buffer`] and
//! [`trace`] are the Levenshtein engine's supporting scratch/result types,
//! and [`error`] collects every error kind the public surface can signal.

pub mod bktree;
pub mod buffer;
pub mod comparer;
pub mod error;
pub mod levenshtein;
pub mod metric;
pub mod search;
pub mod spellcheck;
pub mod tokenizer;
pub mod trace;
