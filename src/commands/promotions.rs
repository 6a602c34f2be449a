//! Promotions command handler: list active promotion slots for a position.

use std::sync::Arc;

use anyhow::Result;
use panshare_core::Backend;

pub async fn run_promotions_command(backend: &Arc<dyn Backend>, position: &str) -> Result<()> {
    let promotions = backend.active_promotions(position).await?;

    if promotions.is_empty() {
        println!("no active promotions for position '{position}'");
        return Ok(());
    }

    for promotion in &promotions {
        println!("{:>6}  {}  {}", promotion.id, promotion.title, promotion.target_url);
    }

    Ok(())
}
