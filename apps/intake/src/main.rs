mod admin;
mod chat;
mod config;
mod dashboard;
mod db;
mod errors;
mod models;
mod pages;
mod routes;
mod state;
mod store;
mod upload;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::script::Script;
use crate::config::{Config, IntakeMode};
use crate::db::{create_pool, migrate, seed_vendors};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{RecordStore, SqliteStore};
use crate::upload::storage::ResumeStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_PKG_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting intake service v{}", env!("CARGO_PKG_VERSION"));
    info!("Intake mode: {:?}", config.mode);

    // Record store
    let pool = create_pool(&config.database_url).await?;
    migrate(&pool).await?;
    seed_vendors(&pool, &config.vendors).await?;
    let store = Arc::new(SqliteStore::new(pool));

    // Vendors are immutable after seeding, so the prompts can be fixed now.
    let vendor_names: Vec<String> = match config.mode {
        IntakeMode::Vendor => store
            .list_vendors()
            .await?
            .into_iter()
            .map(|v| v.name)
            .collect(),
        IntakeMode::Simple => Vec::new(),
    };
    info!("Vendors: {}", vendor_names.join(", "));
    let script = Arc::new(Script::new(config.mode, vendor_names));

    // Résumé storage
    let resumes = ResumeStorage::init(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.upload_dir.display()))?;
    info!("Uploads stored under {}", resumes.root().display());

    let state = AppState {
        store,
        script,
        resumes,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
