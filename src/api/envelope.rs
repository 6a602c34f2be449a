//! Response envelope handling.
//!
//! Every backend response is wrapped as `{code, message, data}`. A `code`
//! other than 200 is an application-level failure even when the transport
//! status is 200 OK, so unwrapping happens in exactly one place.

use serde::Deserialize;

use super::error::{ApiError, CODE_OK};

/// The backend's uniform response wrapper.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T> {
    /// Application status code; 200 means success.
    pub code: i32,
    /// Human-readable status message, usually absent on success.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload; absent for ack-only responses and on failure.
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwraps the envelope, turning a non-200 code into [`ApiError::RequestFailed`].
    pub(crate) fn into_data(self, endpoint: &str) -> Result<Option<T>, ApiError> {
        if self.code == CODE_OK {
            Ok(self.data)
        } else {
            Err(ApiError::request_failed(
                endpoint,
                self.code,
                self.message.unwrap_or_else(|| "Error".to_string()),
            ))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::error::CODE_QUOTA_EXHAUSTED;

    #[test]
    fn test_envelope_success_yields_data() {
        let envelope: Envelope<i64> =
            serde_json::from_str(r#"{"code": 200, "message": null, "data": 2}"#).unwrap();
        assert_eq!(envelope.into_data("/api/test").unwrap(), Some(2));
    }

    #[test]
    fn test_envelope_success_without_data_is_ack() {
        let envelope: Envelope<i64> = serde_json::from_str(r#"{"code": 200}"#).unwrap();
        assert_eq!(envelope.into_data("/api/test").unwrap(), None);
    }

    #[test]
    fn test_envelope_non_200_code_is_failure_even_with_data() {
        let envelope: Envelope<i64> =
            serde_json::from_str(r#"{"code": 429, "message": "limit reached", "data": 0}"#)
                .unwrap();
        let error = envelope.into_data("/api/test").unwrap_err();
        match error {
            ApiError::RequestFailed { code, message, .. } => {
                assert_eq!(code, CODE_QUOTA_EXHAUSTED);
                assert_eq!(message, "limit reached");
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_missing_message_gets_placeholder() {
        let envelope: Envelope<i64> = serde_json::from_str(r#"{"code": 500}"#).unwrap();
        let error = envelope.into_data("/api/test").unwrap_err();
        assert!(error.to_string().contains("Error"));
    }
}
