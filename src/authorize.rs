//! Download authorization decisions.
//!
//! Two pure decision functions: which download links a page shows, and
//! whether a download click may be recorded. Both are synchronous functions
//! of their inputs with no hidden state; the quota ledger itself is owned by
//! the backend, so [`authorize_download`] is advisory only and short-circuits
//! obviously-denied or already-downloaded cases before the network round trip
//! makes the binding decision.

use crate::linktypes::LinkTypeRegistry;
use crate::model::{DownloadLink, QuotaState, Resource};

/// Why a download was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The identity has no remaining download allowance.
    QuotaExhausted,
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExhausted => write!(f, "download quota exhausted"),
        }
    }
}

/// Outcome of a download authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorization {
    /// Whether the download may proceed.
    pub allowed: bool,
    /// Denial reason; present exactly when `allowed` is false.
    pub reason: Option<DenyReason>,
}

impl Authorization {
    /// An allowing decision.
    #[must_use]
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// A denying decision with its reason.
    #[must_use]
    pub fn denied(reason: DenyReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// Computes the download links visible for a page activation.
///
/// With no requested type, all of the resource's links are returned in their
/// original order. With a requested type, the result is the ordered subset of
/// links whose type matches AND is enabled in the registry (defense against
/// stale or invalid codes).
///
/// When that subset is empty - the code is unknown, disabled, or the resource
/// simply does not offer that provider - the full unfiltered set is returned
/// instead. The fallback is a deliberate product decision, not a bug: an
/// invalid or unavailable filter must never leave the user with zero download
/// options.
#[must_use]
pub fn resolve_visible_links(
    resource: &Resource,
    requested_type: Option<&str>,
    enabled: &LinkTypeRegistry,
) -> Vec<DownloadLink> {
    let Some(requested) = requested_type else {
        return resource.download_links.clone();
    };

    let filtered: Vec<DownloadLink> = resource
        .download_links
        .iter()
        .filter(|link| link.link_type == requested && enabled.is_enabled(&link.link_type))
        .cloned()
        .collect();

    if filtered.is_empty() {
        resource.download_links.clone()
    } else {
        filtered
    }
}

/// Decides whether a download of `resource_id` may be recorded for the
/// identity described by `state`.
///
/// Policy, in order:
/// 1. already downloaded - always allowed, quota untouched ("downloaded" is
///    sticky, repeats are never re-counted);
/// 2. unlimited quota - allowed, quota untouched;
/// 3. remaining allowance - allowed; the caller commits the decrement and the
///    downloaded-set addition atomically with the backend's authoritative
///    record;
/// 4. otherwise denied with [`DenyReason::QuotaExhausted`].
#[must_use]
pub fn authorize_download(resource_id: u64, state: &QuotaState) -> Authorization {
    if state.has_downloaded(resource_id) {
        return Authorization::allowed();
    }
    if state.remaining.allows_download() {
        Authorization::allowed()
    } else {
        Authorization::denied(DenyReason::QuotaExhausted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{LinkTypeDescriptor, Quota};

    fn link(id: u64, link_type: &str) -> DownloadLink {
        DownloadLink {
            id,
            link_type: link_type.to_string(),
            link_url: format!("https://{link_type}.example/share/{id}"),
            link_name: format!("{link_type} mirror"),
        }
    }

    fn resource_with_links(links: Vec<DownloadLink>) -> Resource {
        Resource {
            id: 1,
            title: "Sample resource".to_string(),
            description: String::new(),
            download_links: links,
        }
    }

    fn registry(codes: &[&str]) -> LinkTypeRegistry {
        LinkTypeRegistry::from_descriptors(
            codes
                .iter()
                .map(|code| LinkTypeDescriptor {
                    type_code: (*code).to_string(),
                    type_name: (*code).to_string(),
                    enabled: true,
                })
                .collect(),
        )
    }

    fn three_mirror_resource() -> Resource {
        resource_with_links(vec![
            link(1, "quark"),
            link(2, "baidu"),
            link(3, "aliyun"),
        ])
    }

    #[test]
    fn test_no_requested_type_returns_all_links_in_order() {
        let resource = three_mirror_resource();
        let visible = resolve_visible_links(&resource, None, &registry(&["quark", "baidu"]));
        assert_eq!(visible, resource.download_links);
    }

    #[test]
    fn test_requested_type_filters_to_matching_links() {
        let resource = three_mirror_resource();
        let visible = resolve_visible_links(
            &resource,
            Some("quark"),
            &registry(&["quark", "baidu", "aliyun"]),
        );
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].link_type, "quark");
    }

    #[test]
    fn test_filter_preserves_relative_order_of_matches() {
        let resource = resource_with_links(vec![
            link(1, "baidu"),
            link(2, "quark"),
            link(3, "baidu"),
            link(4, "quark"),
        ]);
        let visible = resolve_visible_links(&resource, Some("quark"), &registry(&["quark"]));
        assert_eq!(
            visible.iter().map(|l| l.id).collect::<Vec<_>>(),
            vec![2, 4]
        );
    }

    #[test]
    fn test_unknown_requested_type_falls_back_to_all_links() {
        let resource = three_mirror_resource();
        let visible = resolve_visible_links(
            &resource,
            Some("invalid"),
            &registry(&["quark", "baidu", "aliyun"]),
        );
        assert_eq!(visible, resource.download_links);
    }

    #[test]
    fn test_disabled_requested_type_falls_back_to_all_links() {
        // "baidu" exists on the resource but is not in the enabled registry.
        let resource = three_mirror_resource();
        let visible = resolve_visible_links(&resource, Some("baidu"), &registry(&["quark"]));
        assert_eq!(visible, resource.download_links);
    }

    #[test]
    fn test_type_absent_from_resource_falls_back_to_available_link() {
        let resource = resource_with_links(vec![link(1, "quark")]);
        let visible = resolve_visible_links(
            &resource,
            Some("baidu"),
            &registry(&["quark", "baidu"]),
        );
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].link_type, "quark");
    }

    #[test]
    fn test_resolve_is_pure_and_repeatable() {
        let resource = three_mirror_resource();
        let enabled = registry(&["quark", "baidu", "aliyun"]);
        let first = resolve_visible_links(&resource, Some("quark"), &enabled);
        let second = resolve_visible_links(&resource, Some("quark"), &enabled);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resource_without_links_stays_empty() {
        // Emptiness here comes from the resource itself, never from filtering.
        let resource = resource_with_links(vec![]);
        let visible = resolve_visible_links(&resource, Some("quark"), &registry(&["quark"]));
        assert!(visible.is_empty());
    }

    #[test]
    fn test_exhausted_quota_denies_new_download() {
        let state = QuotaState::new(Quota::Limited(0));
        let authorization = authorize_download(1, &state);
        assert!(!authorization.allowed);
        assert_eq!(authorization.reason, Some(DenyReason::QuotaExhausted));
    }

    #[test]
    fn test_already_downloaded_is_allowed_even_with_exhausted_quota() {
        let mut state = QuotaState::new(Quota::Limited(0));
        state.mark_downloaded(1);
        let authorization = authorize_download(1, &state);
        assert!(authorization.allowed);
        assert_eq!(authorization.reason, None);
    }

    #[test]
    fn test_unlimited_quota_always_allows() {
        let state = QuotaState::new(Quota::Unlimited);
        assert!(authorize_download(1, &state).allowed);
    }

    #[test]
    fn test_positive_remaining_allows() {
        let state = QuotaState::new(Quota::Limited(2));
        assert!(authorize_download(1, &state).allowed);
    }
}
