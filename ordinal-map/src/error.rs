use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    /// The map does not support the operation, e.g. because it is immutable.
    #[error("unsupported operation: {operation}")]
    UnsupportedOperation { operation: &'static str },
    #[error("duplicate key with ordinal {ordinal}")]
    DuplicateKey { ordinal: usize },
    /// An [`EnumKey`](crate::EnumKey) implementation reported an ordinal outside its domain.
    #[error("ordinal {ordinal} is outside of a key domain with {cardinality} keys")]
    OrdinalOutOfRange { ordinal: usize, cardinality: usize },
}

impl MapError {
    pub(crate) fn unsupported(operation: &'static str) -> Self {
        Self::UnsupportedOperation { operation }
    }

    /// Whether this is [`MapError::UnsupportedOperation`].
    pub fn is_unsupported_operation(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            MapError::unsupported("insert").to_string(),
            "unsupported operation: insert"
        );
        assert_eq!(
            MapError::DuplicateKey { ordinal: 3 }.to_string(),
            "duplicate key with ordinal 3"
        );
        assert_eq!(
            MapError::OrdinalOutOfRange {
                ordinal: 9,
                cardinality: 5
            }
            .to_string(),
            "ordinal 9 is outside of a key domain with 5 keys"
        );
    }

    #[test]
    fn unsupported_operation_kind() {
        assert!(MapError::unsupported("clear").is_unsupported_operation());
        assert!(!MapError::DuplicateKey { ordinal: 0 }.is_unsupported_operation());
    }
}
