//! rh-hashmap: a single-threaded associative container built on Robin Hood
//! open addressing with backward-shift deletion.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a self-contained open-addressed hash map whose probe behavior is
//!   fully observable and testable, plus the small collaborators layered on
//!   top of it.
//! - Pieces:
//!   - RobinHoodMap<K, V, S>: the core table. A power-of-two array of
//!     optional entries, each entry carrying its probe sequence length
//!     (PSL) and precomputed hash. Inserts displace residents with
//!     strictly smaller PSLs; lookups terminate early once the probe
//!     distance exceeds a resident's PSL; removals backward-shift the
//!     following chain so no tombstones ever exist.
//!   - Value: a closed tagged union (null/bool/number/string/array/object)
//!     with escaping serialization; objects are backed by RobinHoodMap.
//!   - ArrayIter / ArrayKeyValueIter: thin named wrappers over slice
//!     iteration used by the Value layer.
//!   - SortedMap: a declared ordered-map contract (no implementation in
//!     this crate) with pairwise entry equality.
//!
//! Constraints
//! - Single-threaded semantics: all mutation goes through `&mut self`, no
//!   internal synchronization, every operation runs to completion.
//! - Capacity is always a power of two, minimum 8, and never shrinks
//!   (`clear` resets contents only).
//! - Growth is pre-emptive: the table doubles before an insert would push
//!   it past half load, so `len() <= capacity() / 2` holds immediately
//!   after every `set`.
//! - Keys must hash deterministically for the table's lifetime; each entry
//!   stores its `u64` hash so rehashing on growth never re-invokes
//!   `K: Hash`.
//!
//! Error handling
//! - No error paths in the public surface: absence is reported through
//!   `Option` (or a default value), `remove` of an absent key is a no-op,
//!   and `set` cannot fail under correct use because growth is proactive.
//!
//! Notes and non-goals
//! - No concurrency, no persistence, no iteration-order guarantees beyond
//!   what the probing layout happens to produce.
//! - The default hasher is `foldhash::fast::RandomState`; any
//!   `BuildHasher` can be supplied for deterministic layouts (tests pin
//!   exact slot arrangements with a length hasher through `dump()`).

pub mod array_iter;
pub mod robin_hood;
mod robin_hood_proptest;
pub mod sorted;
pub mod value;

// Public surface
pub use array_iter::{ArrayIter, ArrayKeyValueIter};
pub use robin_hood::{round_up_power_of_two, RobinHoodMap};
pub use sorted::{sorted_map_eq, SortedMap};
pub use value::Value;
