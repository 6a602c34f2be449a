//! Feedback command handler: submit user feedback.

use std::sync::Arc;

use anyhow::Result;
use panshare_core::{Backend, Feedback};

pub async fn run_feedback_command(
    backend: &Arc<dyn Backend>,
    feedback_type: String,
    content: String,
    contact: Option<String>,
    resource_id: Option<u64>,
) -> Result<()> {
    let feedback = Feedback {
        feedback_type,
        content,
        contact,
        resource_id,
    };
    backend.submit_feedback(&feedback).await?;
    println!("feedback submitted, thank you");
    Ok(())
}
