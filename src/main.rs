use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use matcha_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        CatalogCache, DatasetSource, EnglishStemmer, FileCsvSource, RemoteCsvSource,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "matcha_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let source: Arc<dyn DatasetSource> = match &config.dataset_path {
        Some(path) => Arc::new(FileCsvSource::new(path)),
        None => Arc::new(RemoteCsvSource::new(config.dataset_url.clone())),
    };
    let catalog = Arc::new(CatalogCache::new(source, Arc::new(EnglishStemmer)));

    // The dataset must load before we accept queries
    catalog
        .get()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build drama catalog: {}", e))?;

    let state = Arc::new(AppState::new(catalog, config.showcase_countries()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
