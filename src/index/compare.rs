//! Key comparators
//!
//! The total order an index sorts its keys by. It is fixed when the index
//! is constructed and used for every descent, insert and lookup.

use std::cmp::Ordering;

/// A total order over index keys
pub trait KeyComparator<K: ?Sized> {
    /// Compare two keys
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The key type's own `Ord`
///
/// For `String` keys this is lexicographic order of the UTF-8 bytes, which
/// agrees with code point order. Column values are never type-inferred, so
/// `"10" < "9"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lexicographic;

impl<K: Ord + ?Sized> KeyComparator<K> for Lexicographic {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Adapts a closure into a comparator
///
/// ```
/// use tabula::index::{FnComparator, OrderedIndex};
///
/// let by_len = FnComparator(|a: &String, b: &String| a.len().cmp(&b.len()).then(a.cmp(b)));
/// let mut index = OrderedIndex::with_comparator(3, by_len).unwrap();
/// index.insert("ccc".to_string(), 0);
/// index.insert("a".to_string(), 1);
/// assert_eq!(index.keys(), vec!["a", "ccc"]);
/// ```
#[derive(Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<K: ?Sized, F> KeyComparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> std::fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnComparator")
    }
}
