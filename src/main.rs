//! Beyond Blithe - event studio website
//!
//! Serves the public marketing pages from headless-CMS content, accepts
//! CAPTCHA-gated event inquiries, and hosts a small admin area for the
//! gallery and the inquiry inbox.
//!
//! Rendered pages are cached per path and dropped when the CMS webhook (or an
//! admin media change) reports a change to a content type they were built from.

mod auth;
mod cache;
mod captcha;
mod config;
mod content;
mod db;
mod error;
mod form;
mod inquiry;
mod media;
mod models;
mod pages;
mod routes;
mod state;
mod storage;
mod store;
mod webhook;

use crate::captcha::TurnstileVerifier;
use crate::config::Settings;
use crate::content::ContentClient;
use crate::db::{PgGalleryRepository, PgInquiryRepository};
use crate::routes::create_router;
use crate::state::{AppState, Backends};
use crate::storage::HttpObjectStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("🚀 Starting Beyond Blithe site...");

    // Load configuration
    let settings = Settings::load()?;
    info!("📋 Configuration loaded successfully");

    // Database pool is required: inquiries and the gallery live there
    let pool = db::create_pool(&settings.database)?;
    if let Err(e) = db::ping(&pool).await {
        error!("❌ FATAL: Failed to reach the database: {}", e);
        error!("DATABASE_URL (or DB_*) must point at a reachable database");
        return Err(e.into());
    }
    info!("✅ Database connection successful (TLS: {})", settings.database.require_tls);

    if let Err(e) = db::create_tables(&pool).await {
        warn!("⚠️  Warning creating tables: {}", e);
    }

    if settings.admin.email.is_empty() || settings.admin.password_hash.is_empty() {
        warn!("⚠️  ADMIN_EMAIL / ADMIN_PASSWORD_HASH not set - admin sign-in is disabled");
    }
    if settings.admin.jwt_secret.is_empty() {
        warn!("⚠️  JWT_SECRET not set - admin sessions are disabled");
    }

    let backends = Backends {
        inquiries: Arc::new(PgInquiryRepository::new(pool.clone())),
        gallery: Arc::new(PgGalleryRepository::new(pool)),
        storage: Arc::new(HttpObjectStore::new(&settings.storage)?),
        captcha: Arc::new(TurnstileVerifier::new(&settings.captcha)?),
        content: ContentClient::new(&settings.content)?,
    };
    let state = Arc::new(AppState::new(backends, &settings));

    // Build the router
    let app = create_router(state, &settings);

    // Create socket address
    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📚 Endpoints:");
    info!("   ─── Pages ───");
    info!("   GET  /  /about  /services  /gallery  /contact");
    info!("   POST /contact                  - Contact form (HTML)");
    info!("");
    info!("   ─── API ───");
    info!("   POST /api/contact              - Submit inquiry (JSON)");
    info!("   POST /api/revalidate           - Content webhook");
    info!("   GET  /health                   - Health check");
    info!("");
    info!("   ─── Admin ───");
    info!("   GET  /admin/login              - Sign in");
    info!("   GET  /admin/dashboard          - Gallery images and videos");
    info!("   GET  /admin/inquiries          - Inquiry inbox");
    info!("");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,blithe_site=debug,tower_http=debug"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .compact(),
            )
            .init();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
