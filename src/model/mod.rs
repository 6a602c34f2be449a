//! Wire types shared between the client core and the HTTP backend.
//!
//! All JSON field names follow the backend's camelCase convention. A
//! [`Resource`] is immutable once fetched for a page activation and is
//! re-fetched on every navigation; there is no cross-resource caching.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A shareable resource with one download mirror per storage provider.
///
/// Fetched from `/api/resources/public/list`; the detail view is derived
/// client-side by id match since the backend has no dedicated detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Unique identifier (>= 1).
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Optional longer description shown on the detail page.
    #[serde(default)]
    pub description: String,
    /// Ordered download mirrors, one per storage-provider link type.
    /// Owned exclusively by this resource; links have no independent lifecycle.
    #[serde(default)]
    pub download_links: Vec<DownloadLink>,
}

impl Resource {
    /// Returns true when the resource offers at least one link of `link_type`.
    #[must_use]
    pub fn offers_link_type(&self, link_type: &str) -> bool {
        self.download_links
            .iter()
            .any(|link| link.link_type == link_type)
    }
}

/// A single download mirror belonging to a [`Resource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLink {
    /// Unique identifier.
    pub id: u64,
    /// Storage-provider code (e.g. `quark`, `baidu`, `aliyun`).
    pub link_type: String,
    /// Download URL at that provider.
    pub link_url: String,
    /// Display name for the mirror.
    #[serde(default)]
    pub link_name: String,
}

/// A storage-provider link type as published by the backend registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTypeDescriptor {
    /// Unique provider code; the registry key.
    pub type_code: String,
    /// Display label for the provider.
    pub type_name: String,
    /// Whether the provider is currently enabled. Older backend versions
    /// omit the flag from the public list, which only contains enabled types.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

/// Remaining download allowance for a caller identity.
///
/// The wire form is a plain integer; any negative value is the backend's
/// "unlimited" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quota {
    /// A bounded number of downloads left (possibly zero).
    Limited(u32),
    /// No download cap for this identity.
    Unlimited,
}

impl Quota {
    /// Decodes the backend's integer representation.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            Self::Unlimited
        } else {
            Self::Limited(u32::try_from(raw).unwrap_or(u32::MAX))
        }
    }

    /// Encodes back to the backend's integer representation.
    #[must_use]
    pub fn as_raw(&self) -> i64 {
        match self {
            Self::Limited(n) => i64::from(*n),
            Self::Unlimited => -1,
        }
    }

    /// Whether at least one more download is allowed under this quota alone.
    #[must_use]
    pub fn allows_download(&self) -> bool {
        match self {
            Self::Limited(n) => *n > 0,
            Self::Unlimited => true,
        }
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

impl Serialize for Quota {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_raw())
    }
}

impl<'de> Deserialize<'de> for Quota {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(Self::from_raw(raw))
    }
}

/// Advisory per-identity quota snapshot.
///
/// This is a read-through cache of the backend's authoritative ledger, never
/// a source of truth: it is read on page load and re-fetched immediately
/// before a download is committed. The `downloaded` set is sticky - a
/// resource already downloaded never consumes quota again.
#[derive(Debug, Clone)]
pub struct QuotaState {
    /// Remaining download allowance.
    pub remaining: Quota,
    /// Resource ids this identity has already downloaded.
    pub downloaded: HashSet<u64>,
}

impl QuotaState {
    /// Creates a snapshot with an empty downloaded set.
    #[must_use]
    pub fn new(remaining: Quota) -> Self {
        Self {
            remaining,
            downloaded: HashSet::new(),
        }
    }

    /// Marks a resource as already downloaded by this identity.
    pub fn mark_downloaded(&mut self, resource_id: u64) {
        self.downloaded.insert(resource_id);
    }

    /// Whether this identity has already downloaded the resource.
    #[must_use]
    pub fn has_downloaded(&self, resource_id: u64) -> bool {
        self.downloaded.contains(&resource_id)
    }
}

/// User feedback submitted through the public client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Feedback category (`bug`, `suggestion`, `complaint`, ...).
    #[serde(rename = "type")]
    pub feedback_type: String,
    /// Feedback body.
    pub content: String,
    /// Optional contact channel for follow-up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Optional resource the feedback refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<u64>,
}

/// An enabled partner-site link shown in the public footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendLink {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Target URL.
    pub url: String,
}

/// An active promotion slot returned for a given page position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    /// Unique identifier, used for click telemetry.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Optional banner image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Landing URL opened on click.
    pub target_url: String,
    /// Page position the slot belongs to (`header`, `sidebar`, ...).
    pub position: String,
}
