//! Panshare Client Core Library
//!
//! This library implements the public-client core of a link-sharing
//! resource-distribution site: given a resource mirrored across several
//! storage providers, it decides which download links are visible, whether
//! a download may be recorded against the caller's quota, and emits
//! visit/download telemetry. The backend is an external HTTP collaborator
//! reached through the [`api::Backend`] trait.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`api`] - HTTP backend collaborator (trait + reqwest implementation)
//! - [`model`] - Wire types: resources, links, link types, quota
//! - [`linktypes`] - Registry of enabled storage-provider link types
//! - [`authorize`] - Link filtering and download authorization decisions
//! - [`telemetry`] - Fire-and-forget visit/download/click event emitter
//! - [`view`] - Resource page state machine orchestrating the above
//! - [`config`] - Public site configuration (key/value map)

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod authorize;
pub mod config;
pub mod linktypes;
pub mod model;
pub mod telemetry;
pub mod view;

// Re-export commonly used types
pub use api::{AnonymousAccess, ApiError, Backend, HttpBackend, TokenProvider};
pub use authorize::{Authorization, DenyReason, authorize_download, resolve_visible_links};
pub use config::SiteConfig;
pub use linktypes::LinkTypeRegistry;
pub use model::{
    DownloadLink, Feedback, FriendLink, LinkTypeDescriptor, Promotion, Quota, QuotaState, Resource,
};
pub use telemetry::TelemetryEmitter;
pub use view::{DownloadOutcome, PageView, ResourceViewController, ViewError};
