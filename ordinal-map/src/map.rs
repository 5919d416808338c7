use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

use tracing::debug;

use crate::{EnumKey, ImmutableEnumMap, MapError};

/// A generic key-value map.
///
/// Lookups are infallible. Mutations return a [`Result`], since not every map supports them:
/// [`ImmutableEnumMap`] rejects all of them with [`MapError::UnsupportedOperation`] and stays
/// unchanged.
pub trait Map<K, V> {
    fn get(&self, key: &K) -> Option<&V>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a value, returning the one it replaced.
    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, MapError>;

    /// Removes the entry for `key`, returning its value.
    fn remove(&mut self, key: &K) -> Result<Option<V>, MapError>;

    fn clear(&mut self) -> Result<(), MapError>;
}

impl<K: EnumKey, V> ImmutableEnumMap<K, V> {
    fn reject(&self, operation: &'static str) -> MapError {
        debug!(operation, len = self.len(), "rejected mutation of immutable enum map");
        MapError::unsupported(operation)
    }
}

impl<K: EnumKey, V> Map<K, V> for ImmutableEnumMap<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        ImmutableEnumMap::get(self, key)
    }

    fn len(&self) -> usize {
        ImmutableEnumMap::len(self)
    }

    fn contains_key(&self, key: &K) -> bool {
        ImmutableEnumMap::contains_key(self, key)
    }

    fn insert(&mut self, _key: K, _value: V) -> Result<Option<V>, MapError> {
        Err(self.reject("insert"))
    }

    fn remove(&mut self, _key: &K) -> Result<Option<V>, MapError> {
        Err(self.reject("remove"))
    }

    fn clear(&mut self) -> Result<(), MapError> {
        Err(self.reject("clear"))
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Map<K, V> for HashMap<K, V, S> {
    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, MapError> {
        Ok(HashMap::insert(self, key, value))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>, MapError> {
        Ok(HashMap::remove(self, key))
    }

    fn clear(&mut self) -> Result<(), MapError> {
        HashMap::clear(self);
        Ok(())
    }
}

impl<K: Ord, V> Map<K, V> for BTreeMap<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn insert(&mut self, key: K, value: V) -> Result<Option<V>, MapError> {
        Ok(BTreeMap::insert(self, key, value))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>, MapError> {
        Ok(BTreeMap::remove(self, key))
    }

    fn clear(&mut self) -> Result<(), MapError> {
        BTreeMap::clear(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::enum_key! {
        enum Weekday { Monday, Tuesday, Wednesday, Thursday, Friday }
    }

    fn fill(map: &mut impl Map<Weekday, u8>) -> Result<(), MapError> {
        map.insert(Weekday::Friday, 5)?;
        map.insert(Weekday::Monday, 1)?;
        Ok(())
    }

    #[test]
    fn immutable_map_rejects_mutation() {
        let mut map = ImmutableEnumMap::from([(Weekday::Tuesday, 2), (Weekday::Thursday, 4)]);
        let before = map.clone();

        let error = Map::insert(&mut map, Weekday::Monday, 1).unwrap_err();
        assert_eq!(error, MapError::UnsupportedOperation { operation: "insert" });

        let error = Map::insert(&mut map, Weekday::Tuesday, 9).unwrap_err();
        assert!(error.is_unsupported_operation());

        let error = Map::remove(&mut map, &Weekday::Tuesday).unwrap_err();
        assert_eq!(error, MapError::UnsupportedOperation { operation: "remove" });

        let error = Map::remove(&mut map, &Weekday::Friday).unwrap_err();
        assert!(error.is_unsupported_operation());

        let error = Map::clear(&mut map).unwrap_err();
        assert_eq!(error, MapError::UnsupportedOperation { operation: "clear" });

        assert_eq!(map, before);
        assert_eq!(map.get(&Weekday::Tuesday), Some(&2));
    }

    #[test]
    fn empty_immutable_map_rejects_mutation() {
        let mut map = ImmutableEnumMap::<Weekday, u8>::new();

        assert!(fill(&mut map).unwrap_err().is_unsupported_operation());
        assert!(Map::clear(&mut map).unwrap_err().is_unsupported_operation());
        assert!(Map::is_empty(&map));
    }

    #[test]
    fn std_maps_accept_mutation() {
        let mut hash_map = HashMap::new();
        fill(&mut hash_map).unwrap();
        let mut btree_map = BTreeMap::new();
        fill(&mut btree_map).unwrap();

        assert_eq!(Map::len(&hash_map), 2);
        assert_eq!(Map::get(&btree_map, &Weekday::Friday), Some(&5));
        assert_eq!(Map::remove(&mut btree_map, &Weekday::Friday), Ok(Some(5)));
        assert_eq!(Map::insert(&mut hash_map, Weekday::Monday, 7), Ok(Some(1)));

        Map::clear(&mut hash_map).unwrap();
        assert!(Map::is_empty(&hash_map));
    }

    #[test]
    fn reads_through_interface() {
        fn describe(map: &impl Map<Weekday, u8>) -> (usize, bool, bool) {
            (
                map.len(),
                map.contains_key(&Weekday::Wednesday),
                map.contains_key(&Weekday::Monday),
            )
        }

        let map = ImmutableEnumMap::from([(Weekday::Wednesday, 3)]);
        assert_eq!(describe(&map), (1, true, false));

        let hash_map = HashMap::from([(Weekday::Wednesday, 3)]);
        assert_eq!(describe(&hash_map), (1, true, false));
    }
}
