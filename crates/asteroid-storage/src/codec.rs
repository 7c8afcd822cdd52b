//! Record codec: entities travel as base64-encoded JSON inside a [`Document`].

use crate::{errors::RepositoryError, types::Document};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{de::DeserializeOwned, Serialize};

/// Encode an entity as base64(json)
pub fn encode<T: Serialize + ?Sized>(entity: &T) -> Result<String, RepositoryError> {
    let json =
        serde_json::to_vec(entity).map_err(|e| RepositoryError::SerializationFailed(e.to_string()))?;
    Ok(STANDARD.encode(json))
}

/// Decode a base64(json) payload into a typed entity
pub fn decode<T: DeserializeOwned>(data: &str) -> Result<T, RepositoryError> {
    let json = STANDARD
        .decode(data)
        .map_err(|e| RepositoryError::DecodeFailed(format!("invalid base64 payload: {}", e)))?;
    serde_json::from_slice(&json).map_err(|e| RepositoryError::DecodeFailed(e.to_string()))
}

impl Document {
    /// Wrap an entity into the persisted envelope
    pub fn wrap<T: Serialize + ?Sized>(
        id: impl Into<String>,
        entity: &T,
    ) -> Result<Self, RepositoryError> {
        Ok(Self {
            id: id.into(),
            data: encode(entity)?,
        })
    }

    /// Decode the payload of this envelope
    pub fn unwrap_as<T: DeserializeOwned>(&self) -> Result<T, RepositoryError> {
        decode(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_payload_is_base64_of_json() {
        let document = Document::wrap(
            "k",
            &Sample {
                name: "n".into(),
                count: 3,
            },
        )
        .unwrap();

        let raw = STANDARD.decode(&document.data).unwrap();
        assert_eq!(raw, br#"{"name":"n","count":3}"#);
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        let err = decode::<Sample>("not base64!").unwrap_err();
        assert!(matches!(err, RepositoryError::DecodeFailed(_)));
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let data = STANDARD.encode(br#"{"name":1}"#);
        let err = decode::<Sample>(&data).unwrap_err();
        assert!(matches!(err, RepositoryError::DecodeFailed(_)));
    }

    #[test]
    fn test_envelope_serializes_with_underscore_id() {
        let document = Document {
            id: "abc".into(),
            data: "e30=".into(),
        };
        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json, serde_json::json!({ "_id": "abc", "data": "e30=" }));
    }
}
