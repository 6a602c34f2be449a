//! Links command handler: list enabled partner-site links.

use std::sync::Arc;

use anyhow::Result;
use panshare_core::Backend;

pub async fn run_links_command(backend: &Arc<dyn Backend>) -> Result<()> {
    let links = backend.enabled_friend_links().await?;

    if links.is_empty() {
        println!("no partner links");
        return Ok(());
    }

    for link in &links {
        println!("{}  {}", link.name, link.url);
    }

    Ok(())
}
