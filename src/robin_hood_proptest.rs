#![cfg(test)]

// Property tests for RobinHoodMap kept inside the crate so they can run the
// structural invariant checker after every operation.

use crate::robin_hood::RobinHoodMap;
use proptest::prelude::*;
use std::collections::HashMap;
use std::collections::BTreeSet;
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            8 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            4 => idx.clone().prop_map(OpI::Remove),
            4 => idx.clone().prop_map(OpI::Get),
            2 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            2 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Shared state-machine driver checked against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `set` semantics match model insertion (later duplicates overwrite).
// - `get`/`contains_key` parity with the model; `get_mut` updates persist.
// - `remove` returns the model's value and is a no-op on absent keys.
// - `iter` yields each live entry exactly once; key set equals the model's.
// - After every op the structural audit passes: power-of-two capacity with
//   floor 8, at-most-half load, and stored PSLs equal to probe distances.
fn run_scenario<S>(mut sut: RobinHoodMap<String, i32, S>, pool: Vec<String>, ops: Vec<OpI>)
where
    S: BuildHasher,
{
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Set(i, v) => {
                let k = pool[i].clone();
                sut.set(k.clone(), v);
                model.insert(k, v);
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                assert_eq!(sut.remove(k.as_str()), model.remove(k));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                assert_eq!(sut.get(k.as_str()), model.get(k));
                assert_eq!(sut.get_or_default(k.as_str()), model.get(k).copied().unwrap_or(0));
            }
            OpI::Contains(s) => {
                assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match sut.get_mut(k.as_str()) {
                    Some(v) => {
                        *v = v.saturating_add(d);
                        let mv = model.get_mut(k).expect("model must agree on presence");
                        *mv = mv.saturating_add(d);
                    }
                    None => assert!(!model.contains_key(k)),
                }
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<String> = sut.keys().cloned().collect();
                let m_keys: BTreeSet<String> = model.keys().cloned().collect();
                assert_eq!(s_keys, m_keys);
                for (k, v) in sut.iter() {
                    assert_eq!(model.get(k), Some(v));
                }
            }
            OpI::Clear => {
                let capacity = sut.capacity();
                sut.clear();
                model.clear();
                assert_eq!(sut.capacity(), capacity, "clear must not shrink");
            }
        }

        // Post-conditions after each op
        sut.check_invariants();
        assert_eq!(sut.len(), model.len());
        assert_eq!(sut.is_empty(), model.is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(RobinHoodMap::new(), pool, ops);
    }
}

// Collision variant using a constant hasher: every key shares one home
// slot, so probing, displacement swaps, and backward-shift compaction all
// operate on a single maximal chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(RobinHoodMap::with_hasher(ConstBuildHasher), pool, ops);
    }
}
