//! Immutable maps keyed by a finite, ordered key domain.
//!
//! A key domain is any type implementing [`EnumKey`], usually a fieldless enum declared with
//! [`enum_key!`]. An [`ImmutableEnumMap`] always iterates in the domain's ordinal order and
//! cannot be modified once built.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use ordinal_map::{enum_key, immutable_enum_map};
//!
//! enum_key! {
//!     pub enum AnEnum { A, B, C, D, E }
//! }
//!
//! let source = HashMap::from([(AnEnum::C, "c"), (AnEnum::A, "a"), (AnEnum::E, "e")]);
//! let map = immutable_enum_map(&source);
//!
//! assert_eq!(map.to_string(), "{A=a, C=c, E=e}");
//! ```

mod error;
pub mod immutable;
pub mod key;
pub mod map;

pub use error::MapError;
pub use immutable::ImmutableEnumMap;
pub use key::{domain, EnumKey};
pub use map::Map;

/// Copies the entries of `source` into a new [`ImmutableEnumMap`].
///
/// See [`ImmutableEnumMap::copy_of`].
pub fn immutable_enum_map<'a, K, V, I>(source: I) -> ImmutableEnumMap<K, V>
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: EnumKey + 'a,
    V: Clone + 'a,
{
    ImmutableEnumMap::copy_of(source)
}
