//! Show command handler: render one resource page.

use std::sync::Arc;

use anyhow::Result;
use panshare_core::{Backend, PageView, ResourceViewController};

pub async fn run_show_command(
    backend: &Arc<dyn Backend>,
    id: u64,
    link_type: Option<&str>,
) -> Result<()> {
    let controller = ResourceViewController::new(Arc::clone(backend));
    let page = controller.open(id, link_type).await?;

    if let Some(code) = link_type {
        if !page.resource.offers_link_type(code) {
            println!("note: no '{code}' mirror for this resource; showing all links");
        }
    }
    print_page(&page);

    // Let the visit event leave the process before exit.
    controller.telemetry().flush().await;
    Ok(())
}

pub(crate) fn print_page(page: &PageView) {
    println!("#{} {}", page.resource.id, page.resource.title);
    if !page.resource.description.is_empty() {
        println!("{}", page.resource.description);
    }
    println!();

    if page.visible_links.is_empty() {
        println!("no download links for this resource");
    } else {
        println!("download links:");
        for link in &page.visible_links {
            let label = page
                .link_types
                .get(&link.link_type)
                .map_or(link.link_type.as_str(), |descriptor| {
                    descriptor.type_name.as_str()
                });
            println!("  [{label}] {}", link.link_url);
        }
    }

    println!();
    println!("remaining downloads: {}", page.quota.remaining);
    if page.quota.has_downloaded(page.resource.id) {
        println!("already downloaded (repeats are not counted)");
    }
}
