//! Quota command handler: show the remaining download allowance.

use std::sync::Arc;

use anyhow::Result;
use panshare_core::Backend;

pub async fn run_quota_command(backend: &Arc<dyn Backend>) -> Result<()> {
    let remaining = backend.remaining_downloads().await?;
    println!("remaining downloads: {remaining}");
    Ok(())
}
