//! HTTP backend collaborator.
//!
//! The site backend is a plain key-value REST service; this module exposes it
//! through the [`Backend`] trait so the core can be exercised against mocks,
//! and provides [`HttpBackend`], the reqwest implementation used by the
//! binary. All endpoint paths and the `{code, message, data}` envelope are
//! fixed by the backend contract.

mod envelope;
mod error;

pub use error::{ApiError, CODE_OK, CODE_QUOTA_EXHAUSTED, CODE_REPEAT_DOWNLOAD};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::model::{Feedback, FriendLink, LinkTypeDescriptor, Promotion, Quota, Resource};

use envelope::Envelope;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 10;

/// Supplies the optional bearer token attached to backend requests.
///
/// The credential is an injected capability rather than ambient global
/// state: the public client uses [`AnonymousAccess`], while an
/// administrative front-end would plug in a provider backed by its own
/// token storage.
pub trait TokenProvider: Send + Sync {
    /// Returns the current token, or `None` for anonymous access.
    fn token(&self) -> Option<String>;
}

/// Token provider for the public client: never authenticates.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousAccess;

impl TokenProvider for AnonymousAccess {
    fn token(&self) -> Option<String> {
        None
    }
}

/// The fixed interface the core uses to reach the site backend.
///
/// Every method maps to exactly one endpoint; the implementations own the
/// envelope unwrapping so callers only see decoded payloads or [`ApiError`].
#[async_trait]
pub trait Backend: Send + Sync {
    /// Lists all publicly visible resources. `GET /api/resources/public/list`
    async fn list_resources(&self) -> Result<Vec<Resource>, ApiError>;

    /// Records a download of the resource and commits it against the
    /// caller's quota ledger. `POST /api/resources/public/download/{id}`
    async fn record_download(&self, resource_id: u64) -> Result<(), ApiError>;

    /// Records a page visit. `POST /api/resources/public/visit/{id}`
    async fn record_visit(&self, resource_id: u64) -> Result<(), ApiError>;

    /// Returns the caller's remaining download allowance.
    /// `GET /api/resources/public/remaining-downloads`
    async fn remaining_downloads(&self) -> Result<Quota, ApiError>;

    /// Whether the caller already downloaded the resource.
    /// `GET /api/resources/public/check-downloaded/{id}`
    async fn check_downloaded(&self, resource_id: u64) -> Result<bool, ApiError>;

    /// Lists the enabled storage-provider link types.
    /// `GET /api/link-types/public/list`
    async fn list_link_types(&self) -> Result<Vec<LinkTypeDescriptor>, ApiError>;

    /// Fetches the public site configuration. `GET /api/config/public`
    async fn public_config(&self) -> Result<HashMap<String, String>, ApiError>;

    /// Submits user feedback. `POST /api/feedback/public/submit`
    async fn submit_feedback(&self, feedback: &Feedback) -> Result<(), ApiError>;

    /// Lists enabled partner-site links. `GET /api/friendlinks/enabled`
    async fn enabled_friend_links(&self) -> Result<Vec<FriendLink>, ApiError>;

    /// Lists active promotions for a page position.
    /// `GET /api/promotion/active?position={position}`
    async fn active_promotions(&self, position: &str) -> Result<Vec<Promotion>, ApiError>;

    /// Records a promotion click. `POST /api/promotion/{id}/click`
    async fn record_promotion_click(&self, promotion_id: u64) -> Result<(), ApiError>;
}

/// Reqwest-backed [`Backend`] implementation.
///
/// Created once per process and reused for all calls, taking advantage of
/// connection pooling. The base URL is validated eagerly so a typo fails at
/// startup rather than on the first request.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpBackend {
    /// Creates a backend client for the given base URL with anonymous access.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] for unparseable or non-HTTP base
    /// URLs and [`ApiError::ClientConstruction`] when the HTTP client cannot
    /// be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_token_provider(base_url, Arc::new(AnonymousAccess))
    }

    /// Creates a backend client with an injected credential provider.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`HttpBackend::new`].
    pub fn with_token_provider(
        base_url: impl Into<String>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url).map_err(|_| ApiError::InvalidBaseUrl {
            url: base_url.clone(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl { url: base_url });
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(default_user_agent())
            .gzip(true)
            .build()
            .map_err(|source| ApiError::ClientConstruction { source })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a prepared request and unwraps the response envelope.
    async fn run<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        debug!(endpoint = path, "calling backend");
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|source| ApiError::service_unavailable(path, source))?
            .error_for_status()
            .map_err(|source| ApiError::service_unavailable(path, source))?;

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|source| ApiError::decode(path, source))?;
        envelope.into_data(path)
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.client.get(self.endpoint(path));
        self.run(path, request)
            .await?
            .ok_or_else(|| ApiError::missing_data(path))
    }

    async fn get_data_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let request = self.client.get(self.endpoint(path)).query(query);
        self.run(path, request)
            .await?
            .ok_or_else(|| ApiError::missing_data(path))
    }

    /// POST whose envelope is an acknowledgement; any data payload is ignored.
    async fn post_ack(&self, path: &str) -> Result<(), ApiError> {
        let request = self.client.post(self.endpoint(path));
        self.run::<serde_json::Value>(path, request).await.map(|_| ())
    }

    async fn post_body<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = self.client.post(self.endpoint(path)).json(body);
        self.run::<serde_json::Value>(path, request).await.map(|_| ())
    }
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_resources(&self) -> Result<Vec<Resource>, ApiError> {
        self.get_data("/api/resources/public/list").await
    }

    async fn record_download(&self, resource_id: u64) -> Result<(), ApiError> {
        self.post_ack(&format!("/api/resources/public/download/{resource_id}"))
            .await
    }

    async fn record_visit(&self, resource_id: u64) -> Result<(), ApiError> {
        self.post_ack(&format!("/api/resources/public/visit/{resource_id}"))
            .await
    }

    async fn remaining_downloads(&self) -> Result<Quota, ApiError> {
        self.get_data("/api/resources/public/remaining-downloads")
            .await
    }

    async fn check_downloaded(&self, resource_id: u64) -> Result<bool, ApiError> {
        self.get_data(&format!("/api/resources/public/check-downloaded/{resource_id}"))
            .await
    }

    async fn list_link_types(&self) -> Result<Vec<LinkTypeDescriptor>, ApiError> {
        self.get_data("/api/link-types/public/list").await
    }

    async fn public_config(&self) -> Result<HashMap<String, String>, ApiError> {
        self.get_data("/api/config/public").await
    }

    async fn submit_feedback(&self, feedback: &Feedback) -> Result<(), ApiError> {
        self.post_body("/api/feedback/public/submit", feedback).await
    }

    async fn enabled_friend_links(&self) -> Result<Vec<FriendLink>, ApiError> {
        self.get_data("/api/friendlinks/enabled").await
    }

    async fn active_promotions(&self, position: &str) -> Result<Vec<Promotion>, ApiError> {
        self.get_data_with_query("/api/promotion/active", &[("position", position)])
            .await
    }

    async fn record_promotion_click(&self, promotion_id: u64) -> Result<(), ApiError> {
        self.post_ack(&format!("/api/promotion/{promotion_id}/click"))
            .await
    }
}

/// Builds the client-identifying User-Agent string.
#[must_use]
pub fn default_user_agent() -> String {
    format!("panshare/{} (resource-client)", env!("CARGO_PKG_VERSION"))
}
