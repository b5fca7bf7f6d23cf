mod cbor;

use crate::error::{ErrorClass, ErrorOrigin, InternalError};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error as ThisError;

/// Max serialized bytes for a single cached payload to keep decodes bounded.
pub const MAX_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

///
/// SerializeError
///

#[derive(Debug, ThisError)]
pub enum SerializeError {
    #[error("serialize error: {0}")]
    Serialize(String),
    #[error("deserialize error: {0}")]
    Deserialize(String),
}

impl SerializeError {
    pub(crate) const fn class() -> ErrorClass {
        ErrorClass::Internal
    }
}

impl From<SerializeError> for InternalError {
    fn from(err: SerializeError) -> Self {
        Self::new(
            SerializeError::class(),
            ErrorOrigin::Serialize,
            err.to_string(),
        )
    }
}

/// Serialize a value into the cache payload encoding.
pub fn serialize<T>(ty: &T) -> Result<Vec<u8>, SerializeError>
where
    T: Serialize,
{
    cbor::serialize(ty)
}

/// Deserialize a value produced by [`serialize`].
pub fn deserialize<T>(bytes: &[u8]) -> Result<T, SerializeError>
where
    T: DeserializeOwned,
{
    cbor::deserialize(bytes)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Term;

    #[test]
    fn roundtrip_term_vec() {
        let terms = vec![
            Term::new("alpha").with_id(1).with_count(1),
            Term::new("beta").with_id(2).with_parent(1),
        ];
        let bytes = serialize(&terms).expect("serialize");
        let decoded: Vec<Term> = deserialize(&bytes).expect("deserialize");
        assert_eq!(decoded, terms);
    }

    #[test]
    fn truncated_payload_fails_to_decode() {
        let terms = vec![Term::new("alpha").with_id(1)];
        let mut bytes = serialize(&terms).expect("serialize");
        bytes.truncate(bytes.len() - 1);
        assert!(deserialize::<Vec<Term>>(&bytes).is_err());
    }

    #[test]
    fn oversized_payload_is_rejected_before_decode() {
        let bytes = vec![0u8; MAX_PAYLOAD_BYTES + 1];
        let err = deserialize::<Vec<Term>>(&bytes).unwrap_err();
        assert!(matches!(err, SerializeError::Deserialize(_)));
    }
}
