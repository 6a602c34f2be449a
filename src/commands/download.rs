//! Download command handler: one full page activation plus a download click.

use std::sync::Arc;

use anyhow::{Result, bail};
use panshare_core::{Backend, DownloadOutcome, ResourceViewController};

pub async fn run_download_command(
    backend: &Arc<dyn Backend>,
    id: u64,
    link_type: Option<&str>,
) -> Result<()> {
    let controller = ResourceViewController::new(Arc::clone(backend));
    let page = controller.open(id, link_type).await?;
    let outcome = controller.request_download(id).await;

    // Telemetry (visit, and the download commit when authorized) must leave
    // the process before exit; the UI path itself never awaited it.
    controller.telemetry().flush().await;

    match outcome? {
        DownloadOutcome::Authorized { already_downloaded } => {
            if already_downloaded {
                println!("already downloaded; re-access does not consume quota");
            }
            println!("download authorized, open one of:");
            for link in &page.visible_links {
                println!("  [{}] {}", link.link_type, link.link_url);
            }
            Ok(())
        }
        DownloadOutcome::Denied { reason } => bail!("download denied: {reason}"),
        DownloadOutcome::InFlight => bail!("a download request for resource {id} is already in flight"),
    }
}
