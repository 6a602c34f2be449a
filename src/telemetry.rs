//! Fire-and-forget telemetry events.
//!
//! Visit, download, and promotion-click events are analytics signals: the UI
//! path never awaits them and a failed send is logged, never surfaced as an
//! error. The emitter has no notion of a "click" - preventing a double send
//! for one user action is the view controller's debounce responsibility.

use std::sync::{Arc, Mutex};

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::api::{ApiError, Backend};

/// Emits telemetry events as detached tokio tasks.
///
/// Outstanding sends are tracked in a [`JoinSet`] so shutdown paths and tests
/// can [`flush`](TelemetryEmitter::flush) them; page navigation never cancels
/// an in-flight send.
pub struct TelemetryEmitter {
    backend: Arc<dyn Backend>,
    tasks: Mutex<JoinSet<()>>,
}

impl TelemetryEmitter {
    /// Creates an emitter over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    /// Records a resource page visit. Called exactly once per page activation.
    pub fn record_visit(&self, resource_id: u64) {
        let backend = Arc::clone(&self.backend);
        self.spawn_send("visit", resource_id, async move {
            backend.record_visit(resource_id).await
        });
    }

    /// Records an authorized download click.
    ///
    /// The backend performs its own authoritative quota check on this commit;
    /// a send the backend refuses to count is logged and otherwise ignored.
    pub fn record_download(&self, resource_id: u64) {
        let backend = Arc::clone(&self.backend);
        self.spawn_send("download", resource_id, async move {
            backend.record_download(resource_id).await
        });
    }

    /// Records a promotion click.
    pub fn record_promotion_click(&self, promotion_id: u64) {
        let backend = Arc::clone(&self.backend);
        self.spawn_send("promotion_click", promotion_id, async move {
            backend.record_promotion_click(promotion_id).await
        });
    }

    fn spawn_send<F>(&self, event: &'static str, id: u64, send: F)
    where
        F: Future<Output = Result<(), ApiError>> + Send + 'static,
    {
        let mut tasks = match self.tasks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        tasks.spawn(async move {
            match send.await {
                Ok(()) => debug!(event, id, "telemetry event delivered"),
                Err(ref error) if error.is_repeat_download() => {
                    debug!(event, id, "repeat download acknowledged, not counted");
                }
                Err(error) => warn!(event, id, error = %error, "telemetry event dropped"),
            }
        });
    }

    /// Awaits all outstanding sends.
    ///
    /// The UI path never calls this; it exists for orderly process shutdown
    /// and deterministic tests.
    pub async fn flush(&self) {
        let mut tasks = {
            let mut guard = match self.tasks.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            std::mem::take(&mut *guard)
        };
        while tasks.join_next().await.is_some() {}
    }
}

impl std::fmt::Debug for TelemetryEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryEmitter").finish_non_exhaustive()
    }
}
