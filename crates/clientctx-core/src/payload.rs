//! Header encoding of aggregated context data.
//!
//! The merged map travels to the remote service as a single header value:
//! a JSON envelope, base64 encoded.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collector::ContextData;

/// Error type for payload encoding and decoding.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Context data envelope sent with authentication requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextPayload {
    pub context_data: ContextData,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_pool_id: Option<String>,
    /// Creation time, epoch milliseconds as a decimal string.
    pub timestamp: String,
}

impl ContextPayload {
    /// Wraps `context_data`, stamped with the current time.
    pub fn new(context_data: ContextData) -> Self {
        Self::with_timestamp(context_data, Utc::now().timestamp_millis())
    }

    pub fn with_timestamp(context_data: ContextData, timestamp_ms: i64) -> Self {
        Self {
            context_data,
            username: None,
            user_pool_id: None,
            timestamp: timestamp_ms.to_string(),
        }
    }

    pub fn with_user(mut self, username: impl Into<String>, user_pool_id: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.user_pool_id = Some(user_pool_id.into());
        self
    }

    /// Serializes the envelope as JSON.
    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encodes the envelope as a header value.
    pub fn encode(&self) -> Result<String, PayloadError> {
        Ok(STANDARD.encode(self.to_json()?))
    }

    /// Decodes a header value produced by [`encode`](Self::encode).
    pub fn decode(encoded: &str) -> Result<Self, PayloadError> {
        let bytes = STANDARD.decode(encoded.trim())?;
        let json = String::from_utf8(bytes)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> ContextData {
        ContextData::from([
            ("DeviceBrand".to_string(), "google".to_string()),
            ("Platform".to_string(), "ANDROID".to_string()),
        ])
    }

    #[test]
    fn test_payload_json_shape() {
        let payload = ContextPayload::with_timestamp(sample_data(), 1_700_000_000_000)
            .with_user("alice", "us-east-1_Example");
        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

        assert_eq!(json["contextData"]["DeviceBrand"], "google");
        assert_eq!(json["username"], "alice");
        assert_eq!(json["userPoolId"], "us-east-1_Example");
        assert_eq!(json["timestamp"], "1700000000000");
    }

    #[test]
    fn test_payload_omits_missing_user() {
        let payload = ContextPayload::with_timestamp(sample_data(), 1);
        let json = payload.to_json().unwrap();
        assert!(!json.contains("username"));
        assert!(!json.contains("userPoolId"));
    }

    #[test]
    fn test_payload_decode_restores_data() {
        let payload = ContextPayload::new(sample_data()).with_user("bob", "pool");
        let encoded = payload.encode().unwrap();

        assert!(!encoded.contains('{'));
        assert_eq!(ContextPayload::decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_payload_decode_rejects_garbage() {
        assert!(matches!(
            ContextPayload::decode("***"),
            Err(PayloadError::Base64(_))
        ));
        let not_json = STANDARD.encode("plain text");
        assert!(matches!(
            ContextPayload::decode(&not_json),
            Err(PayloadError::Json(_))
        ));
    }
}
