#[cfg(feature = "serde")]
mod serialization;

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    hash::{BuildHasher, Hash, Hasher},
    iter::{repeat_with, FusedIterator},
    ops::Index,
    slice,
    sync::Arc,
};

use tracing::trace;

use crate::{EnumKey, MapError};

/// An immutable map keyed by an [`EnumKey`].
///
/// Iterates in ascending ordinal order of its keys, independent of the order in which entries
/// were supplied. Once built, it cannot be modified; mutation through the [`Map`] interface
/// fails with [`MapError::UnsupportedOperation`].
///
/// Two maps are equal if they contain the same entries. Cloning is cheap, since the entries are
/// shared.
///
/// [`Map`]: crate::Map
pub struct ImmutableEnumMap<K, V> {
    repr: Repr<K, V>,
}

enum Repr<K, V> {
    Empty,
    NonEmpty(Arc<Table<K, V>>),
}

struct Table<K, V> {
    /// Indexed by ordinal, pointing into `entries`.
    positions: Box<[Option<usize>]>,
    /// Sorted by ordinal.
    entries: Box<[(K, V)]>,
}

impl<K, V> Clone for Repr<K, V> {
    fn clone(&self) -> Self {
        match self {
            Repr::Empty => Repr::Empty,
            Repr::NonEmpty(table) => Repr::NonEmpty(table.clone()),
        }
    }
}

impl<K, V> Clone for ImmutableEnumMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            repr: self.repr.clone(),
        }
    }
}

impl<K, V> Default for ImmutableEnumMap<K, V> {
    fn default() -> Self {
        Self { repr: Repr::Empty }
    }
}

impl<K, V> ImmutableEnumMap<K, V> {
    /// Creates an empty map.
    pub const fn new() -> Self {
        Self { repr: Repr::Empty }
    }

    fn table(&self) -> Option<&Table<K, V>> {
        match &self.repr {
            Repr::Empty => None,
            Repr::NonEmpty(table) => Some(table),
        }
    }

    fn entries(&self) -> &[(K, V)] {
        match self.table() {
            Some(table) => &table.entries,
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Returns an iterator over all entries in ascending ordinal order.
    ///
    /// The iterator borrows the map and can be cloned to restart iteration at any point.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries().iter(),
        }
    }

    /// Returns an iterator over all keys in ascending ordinal order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.entries().iter(),
        }
    }

    /// Returns an iterator over all values, ordered by their keys.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.entries().iter(),
        }
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|candidate| candidate == value)
    }
}

impl<K: EnumKey, V> ImmutableEnumMap<K, V> {
    /// Copies all entries of `source` into a new map.
    ///
    /// Accepts anything that iterates borrowed key-value pairs, such as a reference to a
    /// [`HashMap`], a [`BTreeMap`] or another [`ImmutableEnumMap`]. The new map owns clones of the
    /// values and is unaffected by later changes to `source`.
    ///
    /// If `source` yields the same key more than once, the last value wins.
    ///
    /// # Panics
    ///
    /// Panics if the [`EnumKey`] implementation reports an ordinal outside of its domain.
    pub fn copy_of<'a, I>(source: I) -> Self
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        K: 'a,
        V: Clone + 'a,
    {
        source
            .into_iter()
            .map(|(key, value)| (*key, value.clone()))
            .collect()
    }

    /// Creates a map from owned entries, rejecting any key that occurs more than once.
    pub fn try_from_entries(entries: impl IntoIterator<Item = (K, V)>) -> Result<Self, MapError> {
        let mut slots = Slots::new();
        for (key, value) in entries {
            slots.insert_unique(key, value)?;
        }
        Ok(slots.into_map())
    }

    /// Returns the value stored for `key`, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Like [`ImmutableEnumMap::get`], but also accepts the absence of a key, which is never
    /// present.
    pub fn get_opt(&self, key: Option<&K>) -> Option<&V> {
        key.and_then(|key| self.get(key))
    }

    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let table = self.table()?;
        let position = (*table.positions.get(key.ordinal())?)?;
        let (key, value) = &table.entries[position];
        Some((key, value))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// The entry with the lowest ordinal.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.iter().next()
    }

    /// The entry with the highest ordinal.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.iter().next_back()
    }
}

/// Dense staging area with one slot per ordinal of the key domain.
struct Slots<K, V> {
    slots: Vec<Option<(K, V)>>,
    len: usize,
}

impl<K: EnumKey, V> Slots<K, V> {
    fn new() -> Self {
        Self {
            slots: repeat_with(|| None).take(K::CARDINALITY).collect(),
            len: 0,
        }
    }

    /// Stores the entry in the slot of its key and returns the entry it replaced.
    fn insert(&mut self, key: K, value: V) -> Result<Option<(K, V)>, MapError> {
        let ordinal = key.ordinal();
        let slot = self
            .slots
            .get_mut(ordinal)
            .ok_or(MapError::OrdinalOutOfRange {
                ordinal,
                cardinality: K::CARDINALITY,
            })?;
        let replaced = slot.replace((key, value));
        if replaced.is_none() {
            self.len += 1;
        }
        Ok(replaced)
    }

    fn insert_unique(&mut self, key: K, value: V) -> Result<(), MapError> {
        let ordinal = key.ordinal();
        match self.slots.get(ordinal) {
            Some(Some(_)) => Err(MapError::DuplicateKey { ordinal }),
            _ => self.insert(key, value).map(drop),
        }
    }

    /// Compacts the occupied slots, keeping them in ordinal order.
    fn into_map(self) -> ImmutableEnumMap<K, V> {
        trace!(
            len = self.len,
            cardinality = K::CARDINALITY,
            "building immutable enum map"
        );

        if self.len == 0 {
            return ImmutableEnumMap::new();
        }

        let mut positions = vec![None; K::CARDINALITY];
        let mut entries = Vec::with_capacity(self.len);
        for (ordinal, slot) in self.slots.into_iter().enumerate() {
            if let Some(entry) = slot {
                positions[ordinal] = Some(entries.len());
                entries.push(entry);
            }
        }

        ImmutableEnumMap {
            repr: Repr::NonEmpty(Arc::new(Table {
                positions: positions.into_boxed_slice(),
                entries: entries.into_boxed_slice(),
            })),
        }
    }
}

/// Later duplicates replace earlier entries.
///
/// # Panics
///
/// Panics if the [`EnumKey`] implementation reports an ordinal outside of its domain.
impl<K: EnumKey, V> FromIterator<(K, V)> for ImmutableEnumMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut slots = Slots::new();
        for (key, value) in iter {
            if let Err(error) = slots.insert(key, value) {
                panic!("invalid EnumKey implementation: {error}");
            }
        }
        slots.into_map()
    }
}

impl<K: EnumKey, V, const N: usize> From<[(K, V); N]> for ImmutableEnumMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: EnumKey, V> Index<K> for ImmutableEnumMap<K, V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: K) -> &V {
        self.get(&key).expect("no entry found for key")
    }
}

impl<'a, K, V> IntoIterator for &'a ImmutableEnumMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: EnumKey, V: PartialEq> PartialEq for ImmutableEnumMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        // entries are kept in ordinal order, so equal maps have equal entry sequences
        match (&self.repr, &other.repr) {
            (Repr::NonEmpty(lhs), Repr::NonEmpty(rhs)) if Arc::ptr_eq(lhs, rhs) => true,
            _ => {
                self.len() == other.len()
                    && self
                        .iter()
                        .zip(other.iter())
                        .all(|((lhs_key, lhs), (rhs_key, rhs))| {
                            lhs_key.ordinal() == rhs_key.ordinal() && lhs == rhs
                        })
            }
        }
    }
}

impl<K: EnumKey, V: Eq> Eq for ImmutableEnumMap<K, V> {}

impl<K: EnumKey, V: Hash> Hash for ImmutableEnumMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for (key, value) in self {
            key.ordinal().hash(state);
            value.hash(state);
        }
    }
}

impl<K, V, S> PartialEq<HashMap<K, V, S>> for ImmutableEnumMap<K, V>
where
    K: EnumKey + Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &HashMap<K, V, S>) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V, S> PartialEq<ImmutableEnumMap<K, V>> for HashMap<K, V, S>
where
    K: EnumKey + Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &ImmutableEnumMap<K, V>) -> bool {
        other == self
    }
}

impl<K, V> PartialEq<BTreeMap<K, V>> for ImmutableEnumMap<K, V>
where
    K: EnumKey + Ord,
    V: PartialEq,
{
    fn eq(&self, other: &BTreeMap<K, V>) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V> PartialEq<ImmutableEnumMap<K, V>> for BTreeMap<K, V>
where
    K: EnumKey + Ord,
    V: PartialEq,
{
    fn eq(&self, other: &ImmutableEnumMap<K, V>) -> bool {
        other == self
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ImmutableEnumMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Formats as `{A=a, C=c}`.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for ImmutableEnumMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

/// Iterator over the entries of an [`ImmutableEnumMap`], see [`ImmutableEnumMap::iter`].
pub struct Iter<'a, K, V> {
    inner: slice::Iter<'a, (K, V)>,
}

/// Iterator over the keys of an [`ImmutableEnumMap`], see [`ImmutableEnumMap::keys`].
pub struct Keys<'a, K, V> {
    inner: slice::Iter<'a, (K, V)>,
}

/// Iterator over the values of an [`ImmutableEnumMap`], see [`ImmutableEnumMap::values`].
pub struct Values<'a, K, V> {
    inner: slice::Iter<'a, (K, V)>,
}

macro_rules! impl_entry_iterator {
    ( $Iter:ident => $Item:ty, |$entry:ident| $map:expr ) => {
        impl<'a, K, V> Iterator for $Iter<'a, K, V> {
            type Item = $Item;

            fn next(&mut self) -> Option<Self::Item> {
                self.inner.next().map(|$entry| $map)
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.inner.size_hint()
            }
        }

        impl<K, V> DoubleEndedIterator for $Iter<'_, K, V> {
            fn next_back(&mut self) -> Option<Self::Item> {
                self.inner.next_back().map(|$entry| $map)
            }
        }

        impl<K, V> ExactSizeIterator for $Iter<'_, K, V> {}

        impl<K, V> FusedIterator for $Iter<'_, K, V> {}

        impl<K, V> Clone for $Iter<'_, K, V> {
            fn clone(&self) -> Self {
                Self {
                    inner: self.inner.clone(),
                }
            }
        }

        impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for $Iter<'_, K, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($Iter))
                    .field(&self.inner.as_slice())
                    .finish()
            }
        }
    };
}

impl_entry_iterator!(Iter => (&'a K, &'a V), |entry| (&entry.0, &entry.1));
impl_entry_iterator!(Keys => &'a K, |entry| &entry.0);
impl_entry_iterator!(Values => &'a V, |entry| &entry.1);
