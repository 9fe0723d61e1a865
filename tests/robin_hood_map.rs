// RobinHoodMap integration test suite (consolidated).
//
// Each test documents what behavior is being verified and which invariants
// are assumed or asserted. The core invariants exercised:
// - Round-trip: the last value set for a key is the value retrieved.
// - Load: capacity is a power of two >= 8 and size <= capacity/2 holds
//   immediately after every set (growth is pre-emptive).
// - Removal: present keys disappear with size decremented by one; absent
//   keys are a no-op for both size and layout.
// - Layout: with a deterministic hasher, displacement and backward-shift
//   compaction produce exact, pinned slot arrangements.
// - Clear: contents reset, capacity retained (the table never shrinks).
use rh_hashmap::{round_up_power_of_two, RobinHoodMap};
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

// Deterministic test hasher: a key's hash is the number of bytes it feeds
// to the hasher. `Key` hashes only its string bytes, so hash == length.
#[derive(Clone, PartialEq, Eq)]
struct Key(&'static str);

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.0.as_bytes());
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Clone, Default)]
struct LenBuildHasher;

struct LenHasher(u64);

impl BuildHasher for LenBuildHasher {
    type Hasher = LenHasher;
    fn build_hasher(&self) -> Self::Hasher {
        LenHasher(0)
    }
}

impl Hasher for LenHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.0 += bytes.len() as u64;
    }
    fn finish(&self) -> u64 {
        self.0
    }
}

fn len_map(capacity: usize) -> RobinHoodMap<Key, usize, LenBuildHasher> {
    RobinHoodMap::with_capacity_and_hasher(capacity, LenBuildHasher)
}

// Test: insert/lookup round-trip with overwrites.
// Assumes: set semantics (later duplicates overwrite earlier values).
// Verifies: for every key, get returns the last value set.
#[test]
fn round_trip_last_write_wins() {
    let mut m: RobinHoodMap<String, u32> = RobinHoodMap::new();
    for i in 0..200u32 {
        m.set(format!("key-{i}"), i);
    }
    for i in 0..200u32 {
        if i % 3 == 0 {
            m.set(format!("key-{i}"), i * 10);
        }
    }
    assert_eq!(m.len(), 200);
    for i in 0..200u32 {
        let expected = if i % 3 == 0 { i * 10 } else { i };
        assert_eq!(m.get(format!("key-{i}").as_str()), Some(&expected));
    }
}

// Test: load invariant across sustained insertion.
// Assumes: growth triggers at size >= capacity/2 before the insert.
// Verifies: power-of-two capacity >= 8 and size <= capacity/2 after every
// set.
#[test]
fn half_load_invariant_after_every_set() {
    let mut m: RobinHoodMap<u64, u64> = RobinHoodMap::with_capacity(1);
    assert_eq!(m.capacity(), 8, "capacity requests are floored at 8");
    for i in 0..1000u64 {
        m.set(i, i);
        let cap = m.capacity();
        assert!(cap.is_power_of_two() && cap >= 8);
        assert!(m.len() <= cap / 2, "over half load at len {}", m.len());
    }
    assert_eq!(m.len(), 1000);
}

// Test: exact growth boundaries.
// Assumes: a fresh capacity-8 table and distinct-hash keys.
// Verifies: six inserts land at capacity 16, a seventh stays at 16, and by
// the tenth the table has doubled to 32.
#[test]
fn growth_trigger_is_exact() {
    let keys = [
        "a", "ab", "abc", "abcd", "abcde", "abcdef", "abcdefg", "abcdefgh", "abcdefghi",
        "abcdefghij",
    ];
    let mut m = len_map(8);
    for &k in &keys[..6] {
        m.set(Key(k), k.len());
    }
    assert_eq!(m.capacity(), 16);

    m.set(Key(keys[6]), keys[6].len());
    assert_eq!(m.capacity(), 16);

    for &k in &keys[7..] {
        m.set(Key(k), k.len());
    }
    assert_eq!(m.capacity(), 32);
    assert_eq!(m.len(), 10);
}

// Test: pinned displacement layout.
// Assumes: length-hashed keys starting from capacity 8 (one growth to 16).
// Verifies: the exact slot arrangement including Robin Hood swaps.
#[test]
fn displacement_layout() {
    let mut m = len_map(8);
    for k in ["a", "b", "bc", "abc", "cd", "c", "d"] {
        m.set(Key(k), k.len());
    }
    assert_eq!(m.len(), 7);
    assert_eq!(
        m.dump(),
        "_,(0,a,1),(1,b,1),(2,c,1),(3,d,1),(3,bc,2),(4,cd,2),(4,abc,3),_,_,_,_,_,_,_,_"
    );
}

// Test: pinned backward-shift layout after removal.
// Assumes: the displacement chain built by the listed insert order.
// Verifies: removal closes the gap, decrements shifted PSLs, and stops at
// a home-slot entry; size drops by exactly one.
#[test]
fn backward_shift_layout_after_remove() {
    let mut m = len_map(8);
    for k in ["a", "ab", "bc", "cd", "abc", "abcdef"] {
        m.set(Key(k), k.len());
    }
    assert_eq!(m.len(), 6);
    assert_eq!(m.remove(&Key("ab")), Some(2));
    assert_eq!(m.len(), 5);
    assert_eq!(
        m.dump(),
        "_,(0,a,1),(0,bc,2),(1,cd,2),(1,abc,3),_,(0,abcdef,6),_,_,_,_,_,_,_,_,_"
    );

    // Every surviving key still resolves after compaction.
    for k in ["a", "bc", "cd", "abc", "abcdef"] {
        assert_eq!(m.get(&Key(k)), Some(&k.len()));
    }
    assert!(m.get(&Key("ab")).is_none());
}

// Test: removal semantics for present and absent keys.
// Assumes: dump() renders the full slot array deterministically.
// Verifies: present-key removal decrements size by one and makes the key
// absent; absent-key removal changes neither size nor layout.
#[test]
fn remove_present_and_absent() {
    let mut m: RobinHoodMap<String, i32> = RobinHoodMap::new();
    for (i, k) in ["p", "q", "r"].iter().enumerate() {
        m.set((*k).to_string(), i as i32);
    }

    assert_eq!(m.remove("q"), Some(1));
    assert_eq!(m.len(), 2);
    assert!(m.get("q").is_none());

    let before = m.len();
    assert_eq!(m.remove("q"), None);
    assert_eq!(m.remove("never-inserted"), None);
    assert_eq!(m.len(), before);
}

// Test: clear resets contents but not capacity.
// Assumes: the table grew past its initial capacity first.
// Verifies: size 0, every key absent, capacity unchanged, and the table is
// immediately reusable.
#[test]
fn clear_retains_capacity_and_is_reusable() {
    let mut m: RobinHoodMap<u32, u32> = RobinHoodMap::with_capacity(8);
    for i in 0..100 {
        m.set(i, i);
    }
    let grown = m.capacity();
    assert!(grown > 8);

    m.clear();
    assert_eq!(m.len(), 0);
    assert!(m.is_empty());
    assert_eq!(m.capacity(), grown);
    assert!(m.get(&42).is_none());

    m.set(7, 70);
    assert_eq!(m.get(&7), Some(&70));
    assert_eq!(m.capacity(), grown);
}

// Test: capacity rounding and its overflow cap.
// Assumes: doubling stops when the next step would flip the i32 sign bit.
// Verifies: the pinned cap value and ordinary rounding results.
#[test]
fn capacity_rounding_caps_instead_of_wrapping() {
    assert_eq!(round_up_power_of_two(1, 2147483647), 1073741824);
    assert_eq!(round_up_power_of_two(8, 0), 8);
    assert_eq!(round_up_power_of_two(8, 8), 8);
    assert_eq!(round_up_power_of_two(8, 17), 32);
    assert_eq!(round_up_power_of_two(16, 17), 32);
}

// Test: bulk construction.
// Assumes: from_pairs routes every pair through set.
// Verifies: sizing from the input length and last-duplicate-wins.
#[test]
fn from_pairs_and_collect() {
    let pairs = vec![("a", 1), ("b", 2), ("c", 3), ("a", 9)];
    let m = RobinHoodMap::from_pairs(pairs.clone());
    assert_eq!(m.len(), 3);
    assert_eq!(m.get("a"), Some(&9));

    let collected: RobinHoodMap<&str, i32> = pairs.into_iter().collect();
    assert_eq!(m, collected);

    let mut extended: RobinHoodMap<&str, i32> = RobinHoodMap::new();
    extended.extend([("a", 9), ("b", 2)]);
    extended.extend([("c", 3)]);
    assert_eq!(extended, m);
}

// Test: interleaved insert/remove churn keeps lookups correct.
// Assumes: backward-shift deletion leaves no tombstones to mislead probes.
// Verifies: after heavy churn every live key resolves and every removed
// key reports absent.
#[test]
fn churn_insert_remove_interleaved() {
    let mut m: RobinHoodMap<u64, u64> = RobinHoodMap::new();
    for i in 0..512u64 {
        m.set(i, i * 2);
    }
    for i in (0..512u64).step_by(2) {
        assert_eq!(m.remove(&i), Some(i * 2));
    }
    assert_eq!(m.len(), 256);
    for i in 512..640u64 {
        m.set(i, i * 2);
    }
    for i in 0..640u64 {
        let live = (i < 512 && i % 2 == 1) || i >= 512;
        assert_eq!(m.get(&i).is_some(), live, "key {i}");
        if live {
            assert_eq!(m.get(&i), Some(&(i * 2)));
        }
    }
}
