//! Sorted-map contract.
//!
//! Declares the interface of an ordered map keyed by `Ord`. No
//! implementation ships in this crate; the trait exists so callers can
//! program against the contract, with equality defined pairwise over
//! entries via [`sorted_map_eq`].

/// An ordered map over `Ord` keys.
///
/// Iteration (`iter`, `keys`, `values`) visits entries in ascending key
/// order.
pub trait SortedMap<K: Ord, V> {
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type Keys<'a>: Iterator<Item = &'a K>
    where
        Self: 'a,
        K: 'a,
        V: 'a;
    type Values<'a>: Iterator<Item = &'a V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Inserts `key -> value`, overwriting any existing value for the key.
    fn set(&mut self, key: K, value: V);

    fn get(&self, key: &K) -> Option<&V>;

    /// Removes `key`, returning its value; a no-op on absent keys.
    fn remove(&mut self, key: &K) -> Option<V>;

    fn contains_key(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn iter(&self) -> Self::Iter<'_>;

    fn keys(&self) -> Self::Keys<'_>;

    fn values(&self) -> Self::Values<'_>;
}

/// Pairwise entry equality between two sorted maps: equal lengths and equal
/// `(key, value)` pairs position by position. Because both iterations are
/// ascending in key order, this is set equality over entries.
pub fn sorted_map_eq<K, V, A, B>(a: &A, b: &B) -> bool
where
    K: Ord,
    V: PartialEq,
    A: SortedMap<K, V>,
    B: SortedMap<K, V>,
{
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
}
