//! Resource page state machine.
//!
//! One controller drives a page activation through
//! `Loading -> Ready | LoadFailed`, and each download click through
//! `DownloadRequested -> Authorizing -> {Downloading | Denied} -> Ready`.
//! Loading-stage failures are terminal for the activation and page-level;
//! download-stage failures are inline and leave the rest of the page intact.
//! No automatic retries anywhere - retry is a user-initiated re-navigation.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiError, Backend};
use crate::authorize::{DenyReason, authorize_download, resolve_visible_links};
use crate::linktypes::LinkTypeRegistry;
use crate::model::{DownloadLink, QuotaState, Resource};
use crate::telemetry::TelemetryEmitter;

/// Errors surfaced by the view controller.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A Loading-stage fetch failed; the activation is over, shown page-level.
    #[error("page load failed: {source}")]
    LoadFailed {
        /// The failing backend call.
        #[source]
        source: ApiError,
    },

    /// A download-stage fetch failed; shown inline near the control.
    #[error("download request failed: {source}")]
    RequestFailed {
        /// The failing backend call.
        #[source]
        source: ApiError,
    },

    /// The requested id is absent from the public resource list.
    #[error("resource {id} not found")]
    ResourceNotFound {
        /// The missing resource id.
        id: u64,
    },

    /// A newer navigation started while this activation was loading; its
    /// results are stale and must be ignored, not rendered.
    #[error("page activation superseded by a newer navigation")]
    Superseded,
}

/// A loaded resource page: everything the Ready state renders.
#[derive(Debug, Clone)]
pub struct PageView {
    /// The resource being viewed.
    pub resource: Resource,
    /// Links visible after filtering (never empty due to filtering alone).
    pub visible_links: Vec<DownloadLink>,
    /// Advisory quota snapshot taken at load time.
    pub quota: QuotaState,
    /// Enabled link types, for rendering filter controls.
    pub link_types: LinkTypeRegistry,
}

/// Outcome of one download click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The click was authorized and the download commit emitted; the UI may
    /// open the chosen link.
    Authorized {
        /// Whether this was a repeat of an already-downloaded resource
        /// (repeats never consume quota).
        already_downloaded: bool,
    },
    /// The click was denied; no telemetry was emitted, the page is intact.
    Denied {
        /// Why the download was refused.
        reason: DenyReason,
    },
    /// A request for the same resource is still in flight; this click is
    /// debounced and ignored.
    InFlight,
}

/// Orchestrates resource page activations and download clicks.
pub struct ResourceViewController {
    backend: Arc<dyn Backend>,
    telemetry: TelemetryEmitter,
    /// Activation generation; bumped on every navigation so in-flight loads
    /// from an older navigation can detect they are stale.
    activation: AtomicU64,
    /// Resource ids with a download request in flight. The quota
    /// read-then-commit is one logical step from the UI's perspective, so a
    /// second click for the same resource is ignored while the first runs.
    downloads_in_flight: Mutex<HashSet<u64>>,
}

impl ResourceViewController {
    /// Creates a controller over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let telemetry = TelemetryEmitter::new(Arc::clone(&backend));
        Self {
            backend,
            telemetry,
            activation: AtomicU64::new(0),
            downloads_in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// The controller's telemetry emitter, for shutdown flushing.
    #[must_use]
    pub fn telemetry(&self) -> &TelemetryEmitter {
        &self.telemetry
    }

    /// Opens a resource page: the `Loading -> Ready | LoadFailed` transition.
    ///
    /// Resource list, link types, and the quota snapshot are fetched
    /// concurrently. A resource-list or quota failure is terminal for the
    /// activation; a link-type failure degrades to an unfiltered page
    /// instead of blocking it. On entering Ready the visit event is fired
    /// exactly once.
    ///
    /// # Errors
    ///
    /// [`ViewError::LoadFailed`] on resource/quota fetch failure,
    /// [`ViewError::ResourceNotFound`] when the id is absent from the list,
    /// [`ViewError::Superseded`] when a newer `open` started meanwhile.
    pub async fn open(
        &self,
        resource_id: u64,
        requested_type: Option<&str>,
    ) -> Result<PageView, ViewError> {
        let activation = self.activation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(resource_id, ?requested_type, activation, "loading resource page");

        let (resources, link_types, remaining, downloaded) = tokio::join!(
            self.backend.list_resources(),
            LinkTypeRegistry::fetch(self.backend.as_ref()),
            self.backend.remaining_downloads(),
            self.backend.check_downloaded(resource_id),
        );

        // Stale-response guard: a newer navigation owns the page now.
        if self.activation.load(Ordering::SeqCst) != activation {
            debug!(resource_id, activation, "discarding stale page load");
            return Err(ViewError::Superseded);
        }

        let resources = resources.map_err(|source| ViewError::LoadFailed { source })?;
        let remaining = remaining.map_err(|source| ViewError::LoadFailed { source })?;
        let downloaded = downloaded.map_err(|source| ViewError::LoadFailed { source })?;

        let link_types = match link_types {
            Ok(registry) => registry,
            Err(error) => {
                warn!(error = %error, "link-type registry unavailable; showing links unfiltered");
                LinkTypeRegistry::none_enabled()
            }
        };

        let resource = resources
            .into_iter()
            .find(|resource| resource.id == resource_id)
            .ok_or(ViewError::ResourceNotFound { id: resource_id })?;

        let mut quota = QuotaState::new(remaining);
        if downloaded {
            quota.mark_downloaded(resource_id);
        }

        let visible_links = resolve_visible_links(&resource, requested_type, &link_types);
        info!(
            resource_id,
            visible = visible_links.len(),
            total = resource.download_links.len(),
            remaining = %quota.remaining,
            "resource page ready"
        );

        // Exactly once per activation, on entry to Ready.
        self.telemetry.record_visit(resource_id);

        Ok(PageView {
            resource,
            visible_links,
            quota,
            link_types,
        })
    }

    /// Handles one download click: `DownloadRequested -> Authorizing ->
    /// {Downloading | Denied}`.
    ///
    /// The quota snapshot is re-fetched immediately before the decision,
    /// closing the window between "quota shown" and "quota consumed". On an
    /// allowed click the download commit is emitted exactly once and the UI
    /// may open the link; on a denied click nothing is emitted.
    ///
    /// # Errors
    ///
    /// [`ViewError::RequestFailed`] when re-validation fails; surfaced inline
    /// without invalidating the rest of the page.
    pub async fn request_download(&self, resource_id: u64) -> Result<DownloadOutcome, ViewError> {
        if !self.begin_download(resource_id) {
            debug!(resource_id, "download already in flight; click ignored");
            return Ok(DownloadOutcome::InFlight);
        }

        let outcome = self.authorize_and_commit(resource_id).await;
        self.end_download(resource_id);
        outcome
    }

    async fn authorize_and_commit(&self, resource_id: u64) -> Result<DownloadOutcome, ViewError> {
        // Re-validate against the authoritative ledger before deciding.
        let (remaining, downloaded) = tokio::join!(
            self.backend.remaining_downloads(),
            self.backend.check_downloaded(resource_id),
        );
        let remaining = remaining.map_err(|source| ViewError::RequestFailed { source })?;
        let downloaded = downloaded.map_err(|source| ViewError::RequestFailed { source })?;

        let mut quota = QuotaState::new(remaining);
        if downloaded {
            quota.mark_downloaded(resource_id);
        }

        let authorization = authorize_download(resource_id, &quota);
        match authorization.reason {
            Some(reason) => {
                info!(resource_id, %reason, "download denied");
                Ok(DownloadOutcome::Denied { reason })
            }
            None => {
                info!(resource_id, already_downloaded = downloaded, "download authorized");
                self.telemetry.record_download(resource_id);
                Ok(DownloadOutcome::Authorized {
                    already_downloaded: downloaded,
                })
            }
        }
    }

    fn begin_download(&self, resource_id: u64) -> bool {
        let mut in_flight = match self.downloads_in_flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        in_flight.insert(resource_id)
    }

    fn end_download(&self, resource_id: u64) {
        let mut in_flight = match self.downloads_in_flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        in_flight.remove(&resource_id);
    }
}

impl std::fmt::Debug for ResourceViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceViewController")
            .field("activation", &self.activation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
