// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use archery::SharedPointerKind;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use crate::champmap::GenericChampMap;

/// Collects a serialized map's entries and builds `M` from them. Later
/// duplicates of a key replace earlier ones.
struct MapVisitor<M, K, V>(PhantomData<fn() -> (M, K, V)>);

impl<'de, M, K, V> Visitor<'de> for MapVisitor<M, K, V>
where
    M: From<Vec<(K, V)>>,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = M;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<Access>(self, mut access: Access) -> Result<Self::Value, Access::Error>
    where
        Access: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry()? {
            entries.push(entry);
        }
        Ok(M::from(entries))
    }
}

impl<'de, K, V, S, P: SharedPointerKind> Deserialize<'de> for GenericChampMap<K, V, S, P>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de> + Clone,
    S: BuildHasher + Default + Clone,
    P: SharedPointerKind,
{
    fn deserialize<D>(des: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        des.deserialize_map(MapVisitor::<Self, K, V>(PhantomData))
    }
}

impl<K, V, S, P> Serialize for GenericChampMap<K, V, S, P>
where
    K: Serialize + Hash + Eq,
    V: Serialize,
    P: SharedPointerKind,
{
    fn serialize<Ser>(&self, ser: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut s = ser.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            s.serialize_entry(k, v)?;
        }
        s.end()
    }
}

// Tests

#[cfg(test)]
mod test {
    use crate::{proptest::champ_map, ChampMap};
    use proptest::num::i32;
    use proptest::proptest;
    use serde_json::{from_str, to_string};

    #[test]
    fn ser_empty() {
        let map = ChampMap::<String, i32>::new();
        assert_eq!("{}", to_string(&map).unwrap());
        assert_eq!(map, from_str::<ChampMap<String, i32>>("{}").unwrap());
    }

    #[test]
    fn de_duplicate_keys_keep_last() {
        let map: ChampMap<String, i32> = from_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(2, map.len());
        assert_eq!(Some(&3), map.get("a"));
    }

    #[test]
    fn de_rejects_non_map() {
        let err = from_str::<ChampMap<String, i32>>("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("expected a map"), "{}", err);
    }

    proptest! {
        #[cfg_attr(miri, ignore)]
        #[test]
        fn ser_champmap(ref v in champ_map(i32::ANY, i32::ANY, 0..100)) {
            let round: ChampMap<i32, i32> = from_str(&to_string(&v).unwrap()).unwrap();
            assert_eq!(v, &round);
            assert_eq!(v.tree().to_string(), round.tree().to_string());
        }
    }
}
