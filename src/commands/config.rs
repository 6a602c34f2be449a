//! Config command handler: show the public site configuration.

use std::sync::Arc;

use anyhow::Result;
use panshare_core::{Backend, SiteConfig};

pub async fn run_config_command(backend: &Arc<dyn Backend>) -> Result<()> {
    let config = SiteConfig::fetch(backend.as_ref()).await?;

    if config.is_empty() {
        println!("no public configuration");
        return Ok(());
    }

    let mut entries: Vec<(&str, &str)> = config.iter().collect();
    entries.sort_unstable();
    for (key, value) in entries {
        println!("{key} = {value}");
    }

    Ok(())
}
