/// A finite, totally ordered key domain.
///
/// Every value of the domain has a fixed ordinal in `0..CARDINALITY`. Maps keyed by an
/// [`EnumKey`] iterate in ascending ordinal order, no matter in which order their entries were
/// supplied.
///
/// Usually implemented through [`enum_key!`](crate::enum_key), which assigns ordinals in
/// declaration order.
pub trait EnumKey: Copy {
    /// Number of distinct values in the domain.
    const CARDINALITY: usize;

    /// The position of this key within the domain.
    ///
    /// Must be less than [`EnumKey::CARDINALITY`] and distinct for distinct keys.
    fn ordinal(self) -> usize;

    /// Inverse of [`EnumKey::ordinal`].
    ///
    /// Returns [`None`] if `ordinal` is not less than [`EnumKey::CARDINALITY`].
    fn from_ordinal(ordinal: usize) -> Option<Self>;
}

/// Every key of the domain `K`, in ordinal order.
pub fn domain<K: EnumKey>() -> impl DoubleEndedIterator<Item = K> + Clone {
    (0..K::CARDINALITY).filter_map(K::from_ordinal)
}

impl EnumKey for bool {
    const CARDINALITY: usize = 2;

    fn ordinal(self) -> usize {
        self.into()
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        match ordinal {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }
}

/// Declares a fieldless enum and implements [`EnumKey`] for it.
///
/// Ordinals follow declaration order. Besides [`EnumKey`], the enum gets `Clone`, `Copy`,
/// `Debug`, `PartialEq`, `Eq`, `PartialOrd`, `Ord` and `Hash` derives, a [`Display`] impl that
/// prints the variant name and an associated `ALL` constant listing every variant.
///
/// ```
/// ordinal_map::enum_key! {
///     pub enum Suit { Clubs, Diamonds, Hearts, Spades }
/// }
///
/// use ordinal_map::EnumKey;
///
/// assert_eq!(Suit::CARDINALITY, 4);
/// assert_eq!(Suit::Hearts.ordinal(), 2);
/// assert_eq!(Suit::from_ordinal(3), Some(Suit::Spades));
/// assert_eq!(Suit::Diamonds.to_string(), "Diamonds");
/// ```
///
/// [`Display`]: std::fmt::Display
#[macro_export]
macro_rules! enum_key {
    ( @count ) => { 0 };
    ( @count $head:ident $( $tail:ident )* ) => { 1 + $crate::enum_key!(@count $( $tail )*) };
    (
        $( #[$meta:meta] )*
        $vis:vis enum $Name:ident {
            $( $( #[$variant_meta:meta] )* $Variant:ident ),+ $(,)?
        }
    ) => {
        $( #[$meta] )*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $Name {
            $( $( #[$variant_meta] )* $Variant, )+
        }

        impl $Name {
            /// Every variant, in declaration order.
            pub const ALL: [Self; $crate::enum_key!(@count $( $Variant )+)] = [$( Self::$Variant, )+];
        }

        impl $crate::EnumKey for $Name {
            const CARDINALITY: usize = Self::ALL.len();

            fn ordinal(self) -> usize {
                self as usize
            }

            fn from_ordinal(ordinal: usize) -> ::core::option::Option<Self> {
                Self::ALL.get(ordinal).copied()
            }
        }

        impl ::core::fmt::Display for $Name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(match self {
                    $( Self::$Variant => ::core::stringify!($Variant), )+
                })
            }
        }
    };
}
