//! Registry of enabled storage-provider link types.
//!
//! The registry validates requested link-type filters against the set the
//! backend currently has enabled. It is fetched fresh per page view; when the
//! backing call fails, callers fall back to [`LinkTypeRegistry::none_enabled`]
//! so the page renders unfiltered instead of blocking.

use std::collections::HashMap;

use crate::api::{ApiError, Backend};
use crate::model::LinkTypeDescriptor;

/// Set of enabled link types, keyed by `type_code`.
#[derive(Debug, Clone, Default)]
pub struct LinkTypeRegistry {
    types: HashMap<String, LinkTypeDescriptor>,
}

impl LinkTypeRegistry {
    /// Fetches the enabled link types from the backend.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`] when the backing call fails;
    /// callers must degrade to no filtering rather than propagate this as a
    /// page failure.
    pub async fn fetch(backend: &dyn Backend) -> Result<Self, ApiError> {
        let descriptors = backend.list_link_types().await?;
        Ok(Self::from_descriptors(descriptors))
    }

    /// Builds a registry from descriptors, keeping only enabled entries.
    ///
    /// Disabled descriptors are dropped here even though the public list
    /// endpoint should only return enabled ones; stale codes then fail the
    /// filter check and fall through to the unfiltered link set.
    #[must_use]
    pub fn from_descriptors(descriptors: Vec<LinkTypeDescriptor>) -> Self {
        let types = descriptors
            .into_iter()
            .filter(|descriptor| descriptor.enabled)
            .map(|descriptor| (descriptor.type_code.clone(), descriptor))
            .collect();
        Self { types }
    }

    /// An empty registry: no type is considered enabled, so every filter
    /// request falls back to showing all links.
    #[must_use]
    pub fn none_enabled() -> Self {
        Self::default()
    }

    /// Whether the given provider code is enabled.
    #[must_use]
    pub fn is_enabled(&self, type_code: &str) -> bool {
        self.types.contains_key(type_code)
    }

    /// Looks up the descriptor for a provider code.
    #[must_use]
    pub fn get(&self, type_code: &str) -> Option<&LinkTypeDescriptor> {
        self.types.get(type_code)
    }

    /// Iterates over the enabled descriptors in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &LinkTypeDescriptor> {
        self.types.values()
    }

    /// Number of enabled types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no types are enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
