//! CLI command handlers.

mod config;
mod download;
mod feedback;
mod links;
mod list;
mod promotions;
mod quota;
mod show;

pub use config::run_config_command;
pub use download::run_download_command;
pub use feedback::run_feedback_command;
pub use links::run_links_command;
pub use list::run_list_command;
pub use promotions::run_promotions_command;
pub use quota::run_quota_command;
pub use show::run_show_command;
