//! Object storage client
//!
//! Gallery files live in a hosted storage bucket reachable over its REST API.
//! Rows in the database reference files by their public URL.

use crate::config::StorageConfig;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `bytes` to `path` inside the bucket. Never overwrites.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), AppError>;

    /// Remove objects by path
    async fn remove(&self, paths: &[String]) -> Result<(), AppError>;

    /// Public URL for an object path
    fn public_url(&self, path: &str) -> String;

    fn bucket(&self) -> &str;

    /// Inverse of [`ObjectStore::public_url`]
    fn path_from_public_url(&self, public_url: &str) -> Option<String> {
        object_path(public_url, self.bucket())
    }
}

/// Derive the storage path from a public URL.
///
/// URLs minted by this service contain `/object/public/<bucket>/<path>`; for
/// anything else the last path segment is taken as the object name.
pub fn object_path(public_url: &str, bucket: &str) -> Option<String> {
    let parsed = Url::parse(public_url).ok()?;
    let path = parsed.path();
    let marker = format!("/object/public/{}/", bucket);

    let object = match path.find(&marker) {
        Some(idx) => &path[idx + marker.len()..],
        None => path.rsplit('/').next().unwrap_or_default(),
    };

    if object.is_empty() {
        None
    } else {
        Some(object.to_string())
    }
}

/// Error body returned by the storage API
#[derive(Deserialize, Debug, Default)]
struct StorageErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Storage REST API client (`/storage/v1/object/...`)
pub struct HttpObjectStore {
    http: reqwest::Client,
    base: String,
    bucket: String,
    service_key: String,
}

impl HttpObjectStore {
    pub fn new(config: &StorageConfig) -> Result<Self, AppError> {
        let base = Url::parse(&config.url)
            .map_err(|e| AppError::Internal(format!("Invalid STORAGE_URL: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            http,
            base: base.as_str().trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            service_key: config.service_key.clone(),
        })
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base, self.bucket, path)
    }

    async fn check(response: reqwest::Response, action: &str) -> Result<(), AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body: StorageErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .message
            .or(body.error)
            .unwrap_or_else(|| format!("{} failed with status {}", action, status));
        Err(AppError::Storage(message))
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        let size = bytes.len();
        let response = self
            .http
            .post(self.object_url(path))
            .header(AUTHORIZATION, format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .header("cache-control", "max-age=3600")
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Upload failed: {}", e)))?;

        Self::check(response, "Upload").await?;
        info!("Uploaded {} ({} bytes) to bucket {}", path, size, self.bucket);
        Ok(())
    }

    async fn remove(&self, paths: &[String]) -> Result<(), AppError> {
        if paths.is_empty() {
            return Ok(());
        }
        let response = self
            .http
            .delete(format!("{}/storage/v1/object/{}", self.base, self.bucket))
            .header(AUTHORIZATION, format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
            .json(&json!({ "prefixes": paths }))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Remove failed: {}", e)))?;

        Self::check(response, "Remove").await?;
        debug!("Removed {:?} from bucket {}", paths, self.bucket);
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base, self.bucket, path)
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
