#![no_main]

use std::collections::HashMap as NatMap;
use std::iter::FromIterator;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use champ_map::ChampMap;

#[derive(Arbitrary, Debug)]
enum Action<K, V> {
    Insert(K, V),
    Remove(K),
    // Drop the current map and go back to an earlier version.
    Rewind(u8),
}

fuzz_target!(|actions: Vec<Action<u16, u32>>| {
    let mut map = ChampMap::new();
    let mut nat = NatMap::new();
    let mut history = vec![(map.clone(), nat.clone())];
    for action in actions {
        match action {
            Action::Insert(key, value) => {
                assert_eq!(nat.insert(key, value), map.insert(key, value));
            }
            Action::Remove(key) => {
                assert_eq!(nat.remove(&key), map.remove(&key));
            }
            Action::Rewind(back) => {
                let idx = history.len().saturating_sub(1 + back as usize);
                let (old_map, old_nat) = history[idx].clone();
                map = old_map;
                nat = old_nat;
            }
        }
        map.assert_invariants();
        assert_eq!(nat.len(), map.len());
        history.push((map.clone(), nat.clone()));
    }
    // Every version still holds exactly what it held when it was made.
    for (old_map, old_nat) in &history {
        assert_eq!(old_nat.len(), old_map.len());
        for (k, v) in old_nat {
            assert_eq!(Some(v), old_map.get(k));
        }
    }
    let rebuilt: ChampMap<u16, u32> = nat.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(rebuilt, map);
    assert_eq!(rebuilt.tree().to_string(), map.tree().to_string());
    assert_eq!(NatMap::from_iter(map.iter().map(|(k, v)| (*k, *v))), nat);
    assert_eq!(map.into_iter().count(), nat.len());
});
