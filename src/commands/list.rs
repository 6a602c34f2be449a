//! List command handler: print the public resource list.

use std::sync::Arc;

use anyhow::Result;
use panshare_core::Backend;

pub async fn run_list_command(backend: &Arc<dyn Backend>) -> Result<()> {
    let resources = backend.list_resources().await?;

    if resources.is_empty() {
        println!("no public resources");
        return Ok(());
    }

    for resource in &resources {
        let mirrors: Vec<&str> = resource
            .download_links
            .iter()
            .map(|link| link.link_type.as_str())
            .collect();
        println!(
            "{:>6}  {}  [{}]",
            resource.id,
            resource.title,
            mirrors.join(", ")
        );
    }
    println!("{} resource(s)", resources.len());

    Ok(())
}
