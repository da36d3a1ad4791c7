use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use porkchop::catalog::CatalogLoader;
use porkchop::cli::parse_server_args;
use porkchop::server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = parse_server_args();

    let mut loader = CatalogLoader::default();
    if let Some(url) = &args.url {
        loader = loader.with_url(url.clone());
    }
    loader = loader.with_file(&args.csv).with_file(&args.mirror);

    let catalog = loader.load().await;
    info!(recipes = catalog.len(), "catalog loaded");

    let state = Arc::new(AppState::new(catalog));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("PorkChop API server listening on {}", addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
