//! Error types for backend API calls.
//!
//! The backend wraps every response as `{code, message, data}`; a `code`
//! other than 200 is an application-level failure regardless of the
//! transport status, and is distinguished here from transport failures so
//! callers can react to the well-known application codes.

use thiserror::Error;

/// Application code for a successful response.
pub const CODE_OK: i32 = 200;

/// Application code the backend returns when the identity already downloaded
/// the resource; the repeat is acknowledged but not counted.
pub const CODE_REPEAT_DOWNLOAD: i32 = 208;

/// Application code for an exhausted download quota.
pub const CODE_QUOTA_EXHAUSTED: i32 = 429;

/// Errors that can occur while calling the backend collaborator.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL could not be parsed or uses an unsupported scheme.
    #[error("invalid base URL: {url}")]
    InvalidBaseUrl {
        /// The rejected base URL string.
        url: String,
    },

    /// HTTP client construction failed.
    #[error("HTTP client construction failed: {source}")]
    ClientConstruction {
        /// The underlying reqwest builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Network or transport-level failure (DNS, connection refused, timeout,
    /// non-2xx transport status).
    #[error("service unavailable calling {endpoint}: {source}")]
    ServiceUnavailable {
        /// The endpoint path that failed.
        endpoint: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Application-level failure: the envelope carried a non-200 code.
    #[error("request to {endpoint} failed ({code}): {message}")]
    RequestFailed {
        /// The endpoint path that failed.
        endpoint: String,
        /// The application code from the response envelope.
        code: i32,
        /// The message from the response envelope.
        message: String,
    },

    /// The response body could not be decoded as the expected envelope.
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        /// The endpoint path that returned the body.
        endpoint: String,
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// The envelope decoded cleanly but carried no data payload where one
    /// was required.
    #[error("response from {endpoint} is missing its data payload")]
    MissingData {
        /// The endpoint path that returned the envelope.
        endpoint: String,
    },
}

impl ApiError {
    /// Creates a transport-failure error.
    pub fn service_unavailable(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::ServiceUnavailable {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates an application-level failure from an envelope code/message.
    pub fn request_failed(
        endpoint: impl Into<String>,
        code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::RequestFailed {
            endpoint: endpoint.into(),
            code,
            message: message.into(),
        }
    }

    /// Creates a body-decode error.
    pub fn decode(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates a missing-data error.
    pub fn missing_data(endpoint: impl Into<String>) -> Self {
        Self::MissingData {
            endpoint: endpoint.into(),
        }
    }

    /// Whether this is the benign "already downloaded, not counted" response.
    #[must_use]
    pub fn is_repeat_download(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed {
                code: CODE_REPEAT_DOWNLOAD,
                ..
            }
        )
    }

    /// Whether the backend authoritatively denied the download for quota.
    #[must_use]
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed {
                code: CODE_QUOTA_EXHAUSTED,
                ..
            }
        )
    }
}
