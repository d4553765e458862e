//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use serde::Deserialize;
use std::net::Ipv4Addr;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0), // Bind to 0.0.0.0 for Docker
            port: 3000,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_pool_size: usize,
    pub require_tls: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "postgres".to_string(),
            max_pool_size: 10,
            require_tls: false,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// Headless CMS (content store) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    /// Full base URL overriding the project-derived host (local mirrors, tests)
    pub api_host: Option<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: true,
            api_host: None,
        }
    }
}

/// CAPTCHA (Turnstile) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CaptchaConfig {
    pub site_key: String,
    pub secret_key: String,
    pub verify_url: String,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            site_key: String::new(),
            secret_key: String::new(),
            verify_url: "https://challenges.cloudflare.com/turnstile/v0/siteverify".to_string(),
        }
    }
}

/// Object storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub url: String,
    pub service_key: String,
    pub bucket: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            service_key: String::new(),
            bucket: "gallery".to_string(),
        }
    }
}

/// Admin account and session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    pub password_hash: String,
    /// Empty disables admin sessions
    pub jwt_secret: String,
    /// Mark the session cookie `Secure`; off only for plain-HTTP local development
    pub secure_cookie: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            password_hash: String::new(),
            jwt_secret: String::new(),
            secure_cookie: true,
        }
    }
}

/// Page cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub revalidate_seconds: u64,
    pub webhook_secret: String,
}

impl CacheConfig {
    pub fn revalidate_after(&self) -> Duration {
        Duration::from_secs(self.revalidate_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            revalidate_seconds: 60,
            webhook_secret: String::new(),
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub content: ContentConfig,
    pub captcha: CaptchaConfig,
    pub storage: StorageConfig,
    pub admin: AdminConfig,
    pub cache: CacheConfig,
}

fn env_or(key: &str, default: impl Into<String>) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.into())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Secrets are a deployment concern: absence is logged, not fatal
fn env_secret(key: &str) -> String {
    let value = env_or(key, "");
    if value.is_empty() {
        warn!("⚠️  {} not set - dependent features will reject requests", key);
    }
    value
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let server = ServerConfig {
            host: env_parse("HOST").unwrap_or_else(|| ServerConfig::default().host),
            port: env_parse("PORT").unwrap_or_else(|| ServerConfig::default().port),
        };

        // Try to load DATABASE_URL first (modern format), fall back to individual vars
        let database = if let Ok(database_url) = std::env::var("DATABASE_URL") {
            Self::parse_database_url(&database_url)?
        } else {
            DatabaseConfig {
                host: env_or("DB_HOST", "localhost"),
                port: env_parse("DB_PORT").unwrap_or(5432),
                user: env_or("DB_USER", "postgres"),
                password: env_or("DB_PASSWORD", ""),
                database: env_or("DB_NAME", "postgres"),
                max_pool_size: env_parse("DB_MAX_CONNECTIONS").unwrap_or(10),
                require_tls: env_parse("DB_REQUIRE_TLS").unwrap_or(false),
            }
        };

        let cors = CorsConfig {
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|| CorsConfig::default().allowed_origins),
        };

        let content_defaults = ContentConfig::default();
        let content = ContentConfig {
            project_id: env_or("SANITY_PROJECT_ID", ""),
            dataset: env_or("SANITY_DATASET", content_defaults.dataset),
            api_version: env_or("SANITY_API_VERSION", content_defaults.api_version),
            use_cdn: env_parse("SANITY_USE_CDN").unwrap_or(content_defaults.use_cdn),
            api_host: std::env::var("SANITY_API_HOST").ok().filter(|h| !h.is_empty()),
        };

        let captcha = CaptchaConfig {
            site_key: env_secret("TURNSTILE_SITE_KEY"),
            secret_key: env_secret("TURNSTILE_SECRET_KEY"),
            verify_url: env_or("TURNSTILE_VERIFY_URL", CaptchaConfig::default().verify_url),
        };

        let storage = StorageConfig {
            url: env_or("STORAGE_URL", StorageConfig::default().url),
            service_key: env_secret("STORAGE_SERVICE_KEY"),
            bucket: env_or("STORAGE_BUCKET", StorageConfig::default().bucket),
        };

        let admin = AdminConfig {
            email: env_secret("ADMIN_EMAIL"),
            password_hash: env_secret("ADMIN_PASSWORD_HASH"),
            jwt_secret: env_secret("JWT_SECRET"),
            secure_cookie: env_parse("ADMIN_SECURE_COOKIE")
                .unwrap_or_else(|| AdminConfig::default().secure_cookie),
        };

        let cache = CacheConfig {
            revalidate_seconds: env_parse("REVALIDATE_SECONDS")
                .unwrap_or_else(|| CacheConfig::default().revalidate_seconds),
            webhook_secret: env_secret("SANITY_REVALIDATE_SECRET"),
        };

        Ok(Self {
            server,
            database,
            cors,
            content,
            captcha,
            storage,
            admin,
            cache,
        })
    }

    /// Parse a DATABASE_URL connection string (postgresql://...)
    fn parse_database_url(url: &str) -> Result<DatabaseConfig, ConfigError> {
        let parsed = url::Url::parse(url).map_err(|_| {
            ConfigError::InvalidValue(
                "Invalid DATABASE_URL format (expected postgresql://...)".to_string(),
            )
        })?;

        let host = parsed
            .host_str()
            .ok_or_else(|| ConfigError::InvalidValue("Missing host in DATABASE_URL".to_string()))?
            .to_string();

        let database = parsed.path().trim_start_matches('/').to_string();
        if database.is_empty() {
            return Err(ConfigError::InvalidValue(
                "Missing database name in DATABASE_URL".to_string(),
            ));
        }

        // Hosted Postgres providers require TLS; honour an explicit sslmode too
        let require_tls = parsed
            .query_pairs()
            .any(|(k, v)| k == "sslmode" && (v == "require" || v == "verify-full"))
            || host.ends_with("supabase.co")
            || host.ends_with("supabase.com");

        Ok(DatabaseConfig {
            host,
            port: parsed.port().unwrap_or(5432),
            user: parsed.username().to_string(),
            password: parsed.password().map(|p| p.to_string()).unwrap_or_default(),
            database,
            max_pool_size: env_parse("DB_MAX_CONNECTIONS").unwrap_or(10),
            require_tls,
        })
    }
}
