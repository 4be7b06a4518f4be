//! Key extraction and strict-weak-order adapters.

use core::cmp::Ordering;
use core::fmt;

use compare::Compare;

/// Extracts the ordering key from a stored value.
///
/// A tree stores whole values; the comparator only ever sees what `key` returns.
pub trait KeyOf<T> {
    /// The key type.
    type Key;

    /// Returns the key embedded in `value`.
    fn key(value: &T) -> &Self::Key;
}

/// Uses the whole value as its own key, as an ordered set does.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Identity;

impl<T> KeyOf<T> for Identity {
    type Key = T;

    #[inline]
    fn key(value: &T) -> &T {
        value
    }
}

/// Uses the first field of a pair as the key, as an ordered map does.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SelectFirst;

impl<K, V> KeyOf<(K, V)> for SelectFirst {
    type Key = K;

    #[inline]
    fn key(value: &(K, V)) -> &K {
        &value.0
    }
}

/// Adapts a "strictly orders before" predicate into a [`Compare`].
///
/// Equivalence is derived the usual way: `a` and `b` are equivalent when neither orders
/// before the other.
///
/// # Examples
///
/// ```
/// use bst_tree::{BstMap, LessBy};
///
/// let mut map = BstMap::with_comparator(LessBy::new(|a: &i32, b: &i32| a > b));
/// map.insert(1, "one");
/// map.insert(3, "three");
/// map.insert(2, "two");
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Default)]
pub struct LessBy<F>(F);

impl<F> LessBy<F> {
    /// Wraps `less`, which must be a strict weak order.
    pub const fn new(less: F) -> Self {
        Self(less)
    }
}

impl<F> fmt::Debug for LessBy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LessBy")
    }
}

impl<K: ?Sized, F> Compare<K> for LessBy<F>
where
    F: Fn(&K, &K) -> bool,
{
    fn compare(&self, l: &K, r: &K) -> Ordering {
        if (self.0)(l, r) {
            Ordering::Less
        } else if (self.0)(r, l) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    fn compares_lt(&self, l: &K, r: &K) -> bool {
        (self.0)(l, r)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn select_first_and_identity() {
        let pair = (4, "four");
        assert_eq!(*SelectFirst::key(&pair), 4);
        assert_eq!(*Identity::key(&9_u8), 9);
    }

    #[test]
    fn less_by_derives_equivalence() {
        // Case-insensitive ordering: "a" and "A" are equivalent.
        let cmp = LessBy::new(|a: &&str, b: &&str| {
            a.bytes().map(|c| c.to_ascii_lowercase()).lt(b.bytes().map(|c| c.to_ascii_lowercase()))
        });
        assert_eq!(cmp.compare(&"a", &"A"), Ordering::Equal);
        assert_eq!(cmp.compare(&"a", &"B"), Ordering::Less);
        assert_eq!(cmp.compare(&"c", &"B"), Ordering::Greater);
        assert!(cmp.compares_lt(&"a", &"b"));
    }
}
