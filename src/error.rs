// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! error kinds signalled by this crate's capabilities
use thiserror::Error;

/// a capability argument that must not be absent was absent, or had an
/// unexpected runtime shape (from the object-typed comparer entry points)
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    /// a required argument was missing
    #[error("required argument was missing")]
    Null,
    /// a type-erased comparison received a value of unexpected runtime shape
    #[error("value had an unexpected runtime type")]
    WrongType,
}

/// indexed access past the end of a [`crate::levenshtein::MatchCollection`]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("index {index} is out of range for a match collection of length {len}")]
pub struct OutOfRangeError {
    /// the index that was requested
    pub index: usize,
    /// the number of matches actually held by the collection
    pub len: usize,
}

/// `copy_to(dst, index)` where `dst` cannot fit the remaining elements
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error(
    "destination of length {destination_len} cannot hold the {required} elements remaining from index {index}"
)]
pub struct InsufficientDestinationError {
    /// the length of the destination slice that was offered
    pub destination_len: usize,
    /// the number of elements that would need to be written
    pub required: usize,
    /// the index copying was requested to start at
    pub index: usize,
}

/// mutation attempted on a read-only view
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Default)]
#[error("this view is read-only and cannot be mutated")]
pub struct ReadOnlyError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        assert_eq!(
            "required argument was missing",
            ArgumentError::Null.to_string()
        );
        assert_eq!(
            "index 5 is out of range for a match collection of length 3",
            OutOfRangeError { index: 5, len: 3 }.to_string()
        );
    }
}
