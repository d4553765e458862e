//! Headless CMS content client
//!
//! Read-only access to the CMS HTTP query API. Every page accessor returns
//! `None` (or an empty list) when the store is unconfigured, the document is
//! missing, or the fetch fails; pages then render their fallback copy.

pub mod queries;
pub mod types;

pub use types::*;

use crate::config::ContentConfig;
use crate::error::AppError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

static PROJECT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("project id pattern is valid"));

/// Envelope returned by the query endpoint
#[derive(Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
}

#[derive(Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    endpoint: Option<Url>,
}

impl ContentClient {
    pub fn new(config: &ContentConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        let endpoint = Self::endpoint(config)?;
        match &endpoint {
            Some(url) => info!("📰 Content store: {}", url),
            None => warn!("⚠️  Content store not configured - pages will use fallback copy"),
        }

        Ok(Self { http, endpoint })
    }

    /// Query endpoint for a configured project, `None` otherwise
    fn endpoint(config: &ContentConfig) -> Result<Option<Url>, AppError> {
        if !PROJECT_ID.is_match(&config.project_id) {
            return Ok(None);
        }

        let host = match &config.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => {
                let api = if config.use_cdn { "apicdn" } else { "api" };
                format!("https://{}.{}.sanity.io", config.project_id, api)
            }
        };

        let url = format!(
            "{}/v{}/data/query/{}",
            host, config.api_version, config.dataset
        );
        Url::parse(&url)
            .map(Some)
            .map_err(|e| AppError::Internal(format!("Invalid content store URL {}: {}", url, e)))
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Run a GROQ query. Parameters are bound as `$name` and JSON-encoded.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, Value)],
    ) -> Result<Option<T>, AppError> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(None);
        };

        let mut pairs: Vec<(String, String)> = vec![("query".to_string(), query.to_string())];
        for (name, value) in params {
            pairs.push((format!("${}", name), value.to_string()));
        }

        let response = self
            .http
            .get(endpoint.clone())
            .query(&pairs)
            .send()
            .await?
            .error_for_status()?;

        let body: QueryResponse<T> = response.json().await?;
        Ok(body.result)
    }

    /// Singleton page document; failures degrade to `None`
    async fn document<T: DeserializeOwned>(&self, doc_type: &str, fields: &str) -> Option<T> {
        let query = queries::singleton(fields);
        match self
            .fetch::<T>(&query, &[("type", Value::from(doc_type))])
            .await
        {
            Ok(doc) => {
                if doc.is_none() && self.is_configured() {
                    debug!("No {} document published", doc_type);
                }
                doc
            }
            Err(e) => {
                warn!("Failed to fetch {} content: {}", doc_type, e);
                None
            }
        }
    }

    pub async fn home_page(&self) -> Option<HomePageContent> {
        self.document(queries::HOME_PAGE, queries::HOME_PAGE_FIELDS).await
    }

    pub async fn about_page(&self) -> Option<AboutPageContent> {
        self.document(queries::ABOUT_PAGE, queries::ABOUT_PAGE_FIELDS).await
    }

    pub async fn services_page(&self) -> Option<ServicesPageContent> {
        self.document(queries::SERVICES_PAGE, queries::SERVICES_PAGE_FIELDS).await
    }

    pub async fn gallery_page(&self) -> Option<GalleryPageContent> {
        self.document(queries::GALLERY_PAGE, queries::GALLERY_PAGE_FIELDS).await
    }

    pub async fn contact_page(&self) -> Option<ContactPageContent> {
        self.document(queries::CONTACT_PAGE, queries::CONTACT_PAGE_FIELDS).await
    }

    pub async fn site_settings(&self) -> Option<SiteSettings> {
        self.document(queries::SITE_SETTINGS, queries::SITE_SETTINGS_FIELDS).await
    }

    /// Service documents ordered by `displayOrder`; empty on any failure
    pub async fn services(&self) -> Vec<Service> {
        match self
            .fetch::<Vec<Service>>(queries::SERVICES, &[("type", Value::from(queries::SERVICE))])
            .await
        {
            Ok(services) => services.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to fetch services: {}", e);
                Vec::new()
            }
        }
    }
}
