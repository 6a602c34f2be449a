//! In-memory backend that records which calls were made.
//!
//! Used where a test needs to observe exactly which backend operations the
//! core performed (or did not perform), with optional per-call delay to
//! stage races and optional failure injection for telemetry paths.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use panshare_core::api::{ApiError, Backend};
use panshare_core::model::{
    DownloadLink, Feedback, FriendLink, LinkTypeDescriptor, Promotion, Quota, Resource,
};

pub fn link(id: u64, link_type: &str) -> DownloadLink {
    DownloadLink {
        id,
        link_type: link_type.to_string(),
        link_url: format!("https://{link_type}.example/s/{id}"),
        link_name: format!("{link_type} mirror"),
    }
}

pub fn sample_resource(id: u64) -> Resource {
    Resource {
        id,
        title: format!("Resource {id}"),
        description: String::new(),
        download_links: vec![link(1, "quark"), link(2, "baidu"), link(3, "aliyun")],
    }
}

pub fn descriptor(code: &str) -> LinkTypeDescriptor {
    LinkTypeDescriptor {
        type_code: code.to_string(),
        type_name: format!("{code} drive"),
        enabled: true,
    }
}

pub struct RecordingBackend {
    resources: Vec<Resource>,
    link_types: Vec<LinkTypeDescriptor>,
    remaining: Quota,
    downloaded: HashSet<u64>,
    delay: Option<Duration>,
    fail_visits: bool,
    calls: Mutex<Vec<String>>,
}

impl RecordingBackend {
    pub fn new(remaining: Quota) -> Self {
        Self {
            resources: vec![sample_resource(1), sample_resource(2)],
            link_types: vec![descriptor("quark"), descriptor("baidu"), descriptor("aliyun")],
            remaining,
            downloaded: HashSet::new(),
            delay: None,
            fail_visits: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_downloaded(mut self, resource_id: u64) -> Self {
        self.downloaded.insert(resource_id);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_failing_visits(mut self) -> Self {
        self.fail_visits = true;
        self
    }

    async fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn list_resources(&self) -> Result<Vec<Resource>, ApiError> {
        self.record("list_resources").await;
        Ok(self.resources.clone())
    }

    async fn record_download(&self, resource_id: u64) -> Result<(), ApiError> {
        self.record(format!("record_download/{resource_id}")).await;
        Ok(())
    }

    async fn record_visit(&self, resource_id: u64) -> Result<(), ApiError> {
        self.record(format!("record_visit/{resource_id}")).await;
        if self.fail_visits {
            return Err(ApiError::request_failed(
                format!("/api/resources/public/visit/{resource_id}"),
                500,
                "visit logging down",
            ));
        }
        Ok(())
    }

    async fn remaining_downloads(&self) -> Result<Quota, ApiError> {
        self.record("remaining_downloads").await;
        Ok(self.remaining)
    }

    async fn check_downloaded(&self, resource_id: u64) -> Result<bool, ApiError> {
        self.record(format!("check_downloaded/{resource_id}")).await;
        Ok(self.downloaded.contains(&resource_id))
    }

    async fn list_link_types(&self) -> Result<Vec<LinkTypeDescriptor>, ApiError> {
        self.record("list_link_types").await;
        Ok(self.link_types.clone())
    }

    async fn public_config(&self) -> Result<HashMap<String, String>, ApiError> {
        self.record("public_config").await;
        Ok(HashMap::new())
    }

    async fn submit_feedback(&self, _feedback: &Feedback) -> Result<(), ApiError> {
        self.record("submit_feedback").await;
        Ok(())
    }

    async fn enabled_friend_links(&self) -> Result<Vec<FriendLink>, ApiError> {
        self.record("enabled_friend_links").await;
        Ok(Vec::new())
    }

    async fn active_promotions(&self, _position: &str) -> Result<Vec<Promotion>, ApiError> {
        self.record("active_promotions").await;
        Ok(Vec::new())
    }

    async fn record_promotion_click(&self, promotion_id: u64) -> Result<(), ApiError> {
        self.record(format!("record_promotion_click/{promotion_id}"))
            .await;
        Ok(())
    }
}
