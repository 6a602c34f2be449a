//! Public site configuration.
//!
//! The backend publishes a key/value map of front-end settings. It is
//! fetched per use, not cached across navigations.

use std::collections::HashMap;

use crate::api::{ApiError, Backend};

/// The public site configuration map with typed accessors for the keys the
/// client renders.
#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
    values: HashMap<String, String>,
}

impl SiteConfig {
    /// Fetches the public configuration from the backend.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ApiError`] when the call fails.
    pub async fn fetch(backend: &dyn Backend) -> Result<Self, ApiError> {
        let values = backend.public_config().await?;
        Ok(Self { values })
    }

    /// Looks up a raw configuration value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The site display name, when configured.
    #[must_use]
    pub fn site_name(&self) -> Option<&str> {
        self.get("site_name")
    }

    /// The site description, when configured.
    #[must_use]
    pub fn site_description(&self) -> Option<&str> {
        self.get("site_description")
    }

    /// Iterates over all key/value pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of configured keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, String>> for SiteConfig {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors_read_known_keys() {
        let mut values = HashMap::new();
        values.insert("site_name".to_string(), "Panshare".to_string());
        values.insert("site_description".to_string(), "shared links".to_string());
        let config = SiteConfig::from(values);

        assert_eq!(config.site_name(), Some("Panshare"));
        assert_eq!(config.site_description(), Some("shared links"));
        assert_eq!(config.get("missing"), None);
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn test_empty_config() {
        let config = SiteConfig::default();
        assert!(config.is_empty());
        assert_eq!(config.site_name(), None);
    }
}
