// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0

//! element comparers (C1): equality over sequence elements, with
//! ordinal and case-folded variants for text

/// equality over elements of type `E`
///
/// this is the stateless capability composed by [`crate::metric::DistanceMetric`]
/// to derive its value-equality from `distance(a, b) == 0`
pub trait ElementComparer<E: ?Sized> {
    /// returns whether `a` and `b` should be treated as the same element
    fn equals(&self, a: &E, b: &E) -> bool;
}

/// exact, codepoint-for-codepoint equality
///
/// works over any `E: PartialEq`, not just characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ordinal;
impl<E: PartialEq + ?Sized> ElementComparer<E> for Ordinal {
    #[inline]
    fn equals(&self, a: &E, b: &E) -> bool {
        a == b
    }
}

/// folds case using Rust's locale-independent `char::to_lowercase`
///
/// this is the "invariant" case fold: the same result regardless of the
/// running process's locale settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InvariantIgnoreCase;
impl ElementComparer<char> for InvariantIgnoreCase {
    fn equals(&self, a: &char, b: &char) -> bool {
        a == b || a.to_lowercase().eq(b.to_lowercase())
    }
}

/// folds case the way the ambient locale would
///
/// the standard library has no locale-sensitive casing beyond the
/// locale-independent Unicode fold (real locale collation is explicitly a
/// non-goal, see `spec.md` §1), so this behaves identically to
/// [`InvariantIgnoreCase`]. It is kept as a distinct, documented type so
/// callers porting code that distinguishes the two have a place to plug in a
/// real locale backend later without changing call sites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CurrentCultureIgnoreCase;
impl ElementComparer<char> for CurrentCultureIgnoreCase {
    #[inline]
    fn equals(&self, a: &char, b: &char) -> bool {
        InvariantIgnoreCase.equals(a, b)
    }
}

/// lets any comparer over `char` also compare whole strings
///
/// used by [`crate::metric::DistanceMetric::values_equal`] so that, e.g.,
/// two strings differing only in case hash identically under the
/// case-folded variants
pub trait StringComparer: ElementComparer<char> {
    /// returns whether `a` and `b` are equal length-for-length under `self`
    fn strings_equal(&self, a: &str, b: &str) -> bool {
        let mut a = a.chars();
        let mut b = b.chars();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) if self.equals(&x, &y) => {}
                _ => return false,
            }
        }
    }

    /// a canonical hash-map key for `s` under this comparer: two strings for
    /// which [`StringComparer::strings_equal`] holds must fold to the same
    /// key, so [`crate::search::InvertedIndex`] can bucket tokens by the
    /// comparer chosen at construction (`spec.md` §3) instead of always by
    /// `String`'s own ordinal equality
    fn fold_key(&self, s: &str) -> String {
        s.to_owned()
    }
}
impl StringComparer for Ordinal {}
impl StringComparer for InvariantIgnoreCase {
    fn fold_key(&self, s: &str) -> String {
        s.chars().flat_map(char::to_lowercase).collect()
    }
}
impl StringComparer for CurrentCultureIgnoreCase {
    fn fold_key(&self, s: &str) -> String {
        InvariantIgnoreCase.fold_key(s)
    }
}
/// closures fold to the identity key: an arbitrary `Fn(&char, &char) -> bool`
/// carries no general way to derive a canonical form from equality alone, so
/// [`InvertedIndexProvider`](crate::search::InvertedIndexProvider) built over
/// a [`FnComparer`] keeps ordinal bucketing, the same as [`Ordinal`]
impl<F: Fn(&char, &char) -> bool> StringComparer for FnComparer<F> {}

/// adapts a plain equality closure into an [`ElementComparer`]
///
/// mirrors the teacher's blanket `impl<F: StrFilter> StrMetric for F`: a
/// one-argument predicate is all a caller should need to supply
#[derive(Clone, Copy)]
pub struct FnComparer<F>(pub F);
impl<E: ?Sized, F: Fn(&E, &E) -> bool> ElementComparer<E> for FnComparer<F> {
    fn equals(&self, a: &E, b: &E) -> bool {
        (self.0)(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_is_exact() {
        assert!(Ordinal.equals(&'a', &'a'));
        assert!(!Ordinal.equals(&'a', &'A'));
        assert!(Ordinal.equals(&1_u32, &1_u32));
    }

    #[test]
    fn invariant_folds_case() {
        assert!(InvariantIgnoreCase.equals(&'a', &'A'));
        assert!(!InvariantIgnoreCase.equals(&'a', &'b'));
    }

    #[test]
    fn string_comparer_folds_whole_strings() {
        assert!(InvariantIgnoreCase.strings_equal("Hello", "HELLo"));
        assert!(!InvariantIgnoreCase.strings_equal("Hello", "Hellos"));
        assert!(Ordinal.strings_equal("abc", "abc"));
        assert!(!Ordinal.strings_equal("abc", "Abc"));
    }

    #[test]
    fn fn_comparer_wraps_closure() {
        let comparer = FnComparer(|a: &i32, b: &i32| a.abs() == b.abs());
        assert!(comparer.equals(&-3, &3));
        assert!(!comparer.equals(&-3, &4));
    }

    #[test]
    fn ordinal_fold_key_is_identity() {
        assert_eq!("Hello", Ordinal.fold_key("Hello"));
    }

    #[test]
    fn invariant_fold_key_merges_differently_cased_strings() {
        assert_eq!(InvariantIgnoreCase.fold_key("Hello"), InvariantIgnoreCase.fold_key("HELLo"));
        assert_ne!(InvariantIgnoreCase.fold_key("Hello"), InvariantIgnoreCase.fold_key("Goodbye"));
    }
}
