//! RobinHoodMap: open-addressed hash map with Robin Hood displacement and
//! backward-shift deletion.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;

/// Smallest slot count a table will ever have.
const MIN_CAPACITY: i32 = 8;

/// Slot count used by `new()`; one doubling above the floor so a handful of
/// inserts does not immediately trigger growth.
const DEFAULT_CAPACITY: i32 = 16;

/// Returns the smallest power of two >= `n`, starting the doubling search at
/// `start` (itself a power of two). If the next doubling would flip the sign
/// bit, the search stops and the last valid power is returned instead of
/// wrapping negative.
pub fn round_up_power_of_two(start: i32, n: i32) -> i32 {
    debug_assert!(start > 0 && start.count_ones() == 1);
    let mut p = start;
    while p < n {
        match p.checked_mul(2) {
            Some(next) => p = next,
            None => break,
        }
    }
    p
}

#[derive(Debug)]
struct Entry<K, V> {
    /// Probe steps taken from `hash & (capacity-1)` to this entry's slot.
    psl: u32,
    hash: u64,
    key: K,
    value: V,
}

/// An open-addressed hash map using Robin Hood linear probing.
///
/// Entries record their probe sequence length (PSL). During insertion an
/// entry that has probed further than a resident swaps with it, keeping the
/// variance of probe distances low; lookups terminate early once the probe
/// distance exceeds a resident's PSL. Deletion shifts the following chain
/// one slot backward instead of leaving tombstones.
///
/// The slot array length is always a power of two (minimum 8) and the table
/// grows before it would exceed half load, so `len() <= capacity() / 2`
/// holds immediately after every `set`.
///
/// Keys must hash deterministically for the lifetime of the table; mutating
/// a key in place after insertion breaks the probe invariants.
pub struct RobinHoodMap<K, V, S = foldhash::fast::RandomState> {
    hasher: S,
    slots: Vec<Option<Entry<K, V>>>,
    size: usize,
}

impl<K, V> RobinHoodMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty map with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY as usize)
    }

    /// Creates an empty map whose capacity is the requested size rounded up
    /// to a power of two (floor 8).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }

    /// Builds a map sized to the input length, inserting every pair via
    /// `set`; later pairs with duplicate keys overwrite earlier ones.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        let mut map = Self::with_capacity(pairs.len());
        for (key, value) in pairs {
            map.set(key, value);
        }
        map
    }
}

impl<K, V> Default for RobinHoodMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> RobinHoodMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Creates an empty map with the default capacity and the given hasher
    /// builder.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY as usize, hasher)
    }

    /// Creates an empty map with the requested capacity (rounded up to a
    /// power of two, floor 8) and the given hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let requested = i32::try_from(capacity).unwrap_or(i32::MAX);
        let capacity = round_up_power_of_two(MIN_CAPACITY, requested) as usize;
        Self {
            hasher,
            slots: empty_slots(capacity),
            size: 0,
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Number of entries in the map.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of slots. Always a power of two >= 8; never shrinks.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Inserts `key -> value`, overwriting the value in place if the key is
    /// already present. Grows the table first when it has reached half load.
    pub fn set(&mut self, key: K, value: V) {
        if self.size >= self.slots.len() / 2 {
            self.grow();
        }

        let hash = self.make_hash(&key);
        let mask = self.slots.len() - 1;
        let mut idx = (hash as usize) & mask;
        let mut entry = Entry {
            psl: 0,
            hash,
            key,
            value,
        };

        loop {
            let slot = &mut self.slots[idx];
            match slot {
                None => {
                    *slot = Some(entry);
                    self.size += 1;
                    return;
                }
                Some(resident) => {
                    if resident.hash == entry.hash && resident.key == entry.key {
                        resident.value = entry.value;
                        return;
                    }
                    // Strictly greater PSL takes the slot; ties favor the
                    // resident. The displaced entry keeps probing with its
                    // own PSL continuing to increment.
                    if entry.psl > resident.psl {
                        mem::swap(resident, &mut entry);
                    }
                    entry.psl += 1;
                    idx = (idx + 1) & mask;
                }
            }
        }
    }

    /// Returns a reference to the value for `key`, if present.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.locate(key)?;
        let entry = self.slots[idx]
            .as_ref()
            .expect("located slot must be occupied");
        Some(&entry.value)
    }

    /// Returns a mutable reference to the value for `key`, if present.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.locate(key)?;
        let entry = self.slots[idx]
            .as_mut()
            .expect("located slot must be occupied");
        Some(&mut entry.value)
    }

    /// Returns the value for `key`, or `V::default()` when absent.
    pub fn get_or_default<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone + Default,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate(key).is_some()
    }

    /// Probe walk shared by the read paths and `remove`. Terminates on an
    /// empty slot, or as soon as the probe distance exceeds a resident's
    /// PSL: the Robin Hood discipline guarantees no entry with a smaller
    /// required PSL sits beyond one with a larger PSL on the same chain.
    fn locate<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        let mask = self.slots.len() - 1;
        let mut idx = (hash as usize) & mask;
        let mut distance: u32 = 0;

        loop {
            match &self.slots[idx] {
                None => return None,
                Some(entry) => {
                    if entry.hash == hash && entry.key.borrow() == key {
                        return Some(idx);
                    }
                    if distance > entry.psl {
                        return None;
                    }
                    distance += 1;
                    idx = (idx + 1) & mask;
                }
            }
        }
    }

    /// Removes `key` and returns its value. Absent keys are a no-op.
    ///
    /// After clearing the slot, the following chain is shifted one slot
    /// backward (each moved entry's PSL decremented) until an empty slot or
    /// an entry already in its home slot (PSL 0) is reached. This restores
    /// the contiguous-chain property without tombstones.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.locate(key)?;
        let entry = self.slots[idx]
            .take()
            .expect("located slot must be occupied");
        self.size -= 1;

        let mask = self.slots.len() - 1;
        let mut gap = idx;
        loop {
            let next = (gap + 1) & mask;
            match self.slots[next].take() {
                Some(mut moved) if moved.psl > 0 => {
                    moved.psl -= 1;
                    self.slots[gap] = Some(moved);
                    gap = next;
                }
                other => {
                    // Empty slot or home-slot entry: chain ends here.
                    self.slots[next] = other;
                    break;
                }
            }
        }

        Some(entry.value)
    }

    /// Empties every slot and resets the size to zero. Capacity is left
    /// unchanged; the table never shrinks.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.size = 0;
    }

    /// Doubles capacity and reinserts every entry through `set`, so PSLs
    /// are recomputed against the new mask.
    fn grow(&mut self) {
        let doubled = self.slots.len() * 2;
        let old = mem::replace(&mut self.slots, empty_slots(doubled));
        self.size = 0;
        for entry in old.into_iter().flatten() {
            self.set(entry.key, entry.value);
        }
    }

    /// Iterates `(key, value)` pairs in slot order. The order is whatever
    /// the probing layout happens to produce; it is not a stability
    /// guarantee.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.slots.iter(),
        }
    }

    /// Iterates with mutable access to values, in slot order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.slots.iter_mut(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Option<Entry<K, V>>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

impl<K, V, S> RobinHoodMap<K, V, S>
where
    K: Eq + Hash + fmt::Display,
    V: fmt::Display,
    S: BuildHasher,
{
    /// Deterministic rendering of all slots in order: `_` for an empty
    /// slot, `(psl,key,value)` for an occupied one, comma-separated. Used
    /// to pin exact internal layout in tests.
    pub fn dump(&self) -> String {
        use fmt::Write;

        let mut out = String::new();
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            match slot {
                None => out.push('_'),
                Some(e) => {
                    write!(out, "({},{},{})", e.psl, e.key, e.value)
                        .expect("writing to a String cannot fail");
                }
            }
        }
        out
    }
}

/// Iterator over `(&K, &V)` pairs in slot order.
pub struct Iter<'a, K, V> {
    inner: core::slice::Iter<'a, Option<Entry<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .by_ref()
            .find_map(|slot| slot.as_ref().map(|e| (&e.key, &e.value)))
    }
}

/// Iterator over `(&K, &mut V)` pairs in slot order.
pub struct IterMut<'a, K, V> {
    inner: core::slice::IterMut<'a, Option<Entry<K, V>>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .by_ref()
            .find_map(|slot| slot.as_mut().map(|e| (&e.key, &mut e.value)))
    }
}

impl<'a, K, V, S> IntoIterator for &'a RobinHoodMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for RobinHoodMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K, V, S> Extend<(K, V)> for RobinHoodMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V, S> fmt::Debug for RobinHoodMap<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for RobinHoodMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .iter()
                .all(|(k, v)| other.get(k).map_or(false, |ov| ov == v))
    }
}

impl<K, V, S> Eq for RobinHoodMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

#[cfg(test)]
impl<K, V, S> RobinHoodMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Test-only structural audit: power-of-two capacity with floor 8,
    /// at-most-half load, size matching the occupied slot count, and every
    /// occupied slot's stored PSL equal to its wrap-around probe distance.
    pub(crate) fn check_invariants(&self) {
        let capacity = self.slots.len();
        assert!(capacity >= MIN_CAPACITY as usize);
        assert!(capacity.is_power_of_two());
        assert!(
            self.size <= capacity / 2,
            "table must never exceed half load (size {} capacity {})",
            self.size,
            capacity
        );

        let mask = capacity - 1;
        let mut occupied = 0;
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(entry) = slot {
                occupied += 1;
                let home = (entry.hash as usize) & mask;
                let distance = i.wrapping_sub(home) & mask;
                assert_eq!(
                    distance, entry.psl as usize,
                    "stored PSL must equal probe distance at slot {i}"
                );
            }
        }
        assert_eq!(occupied, self.size);
    }
}
