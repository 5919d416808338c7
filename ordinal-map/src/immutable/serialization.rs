use std::{fmt, marker::PhantomData};

use serde::{
    de::{Error, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::EnumKey;

use super::{ImmutableEnumMap, Slots};

/// Serializes as a map, in ordinal order.
impl<K: Serialize, V: Serialize> Serialize for ImmutableEnumMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Deserializes from a map, which must not contain any key more than once.
impl<'de, K, V> Deserialize<'de> for ImmutableEnumMap<K, V>
where
    K: EnumKey + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

struct EntriesVisitor<K, V>(PhantomData<fn() -> (K, V)>);

impl<'de, K, V> Visitor<'de> for EntriesVisitor<K, V>
where
    K: EnumKey + Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = ImmutableEnumMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut slots = Slots::new();
        while let Some((key, value)) = access.next_entry::<K, V>()? {
            slots.insert_unique(key, value).map_err(A::Error::custom)?;
        }
        Ok(slots.into_map())
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use crate::{MapError, ImmutableEnumMap};

    crate::enum_key! {
        #[derive(Serialize, Deserialize)]
        enum Planet { Mercury, Venus, Earth, Mars }
    }

    #[test]
    fn serializes_in_ordinal_order() {
        let map = ImmutableEnumMap::from([(Planet::Mars, 4), (Planet::Mercury, 1), (Planet::Earth, 3)]);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Mercury":1,"Earth":3,"Mars":4}"#);
    }

    #[test]
    fn deserialization_restores_ordinal_order() {
        let json = r#"{"Mars":"red","Venus":"hot","Mercury":"small"}"#;

        let map: ImmutableEnumMap<Planet, String> = serde_json::from_str(json).unwrap();
        assert!(map
            .keys()
            .copied()
            .eq([Planet::Mercury, Planet::Venus, Planet::Mars]));
        assert_eq!(map[Planet::Venus], "hot");
    }

    #[test]
    fn deserialize_empty() {
        let map: ImmutableEnumMap<Planet, u8> = serde_json::from_str("{}").unwrap();
        assert_eq!(map, ImmutableEnumMap::new());
        assert_eq!(serde_json::to_string(&map).unwrap(), "{}");
    }

    #[test]
    fn deserialize_rejects_duplicate_keys() {
        let json = r#"{"Earth":1,"Earth":2}"#;

        let error = serde_json::from_str::<ImmutableEnumMap<Planet, u8>>(json).unwrap_err();
        assert!(error
            .to_string()
            .starts_with(&MapError::DuplicateKey { ordinal: 2 }.to_string()));
    }

    #[test]
    fn deserialize_rejects_unknown_keys() {
        let json = r#"{"Pluto":9}"#;
        assert!(serde_json::from_str::<ImmutableEnumMap<Planet, u8>>(json).is_err());
    }
}
