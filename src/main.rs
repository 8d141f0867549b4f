use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use hotel_match_api::{
    config::Config,
    models::FeatureSchema,
    routes::{create_router, AppState},
    services::providers::{HotelDataset, LiveListingsProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;

    // The dataset is read once and shared read-only for the process lifetime
    let dataset = HotelDataset::load(&config.dataset_path)?;
    let schema = FeatureSchema::hotel_amenities();

    tracing::info!(
        features = schema.len(),
        hotels = dataset.len(),
        webdriver_url = %config.webdriver_url,
        "Hotel catalog ready"
    );

    let state = AppState {
        schema: Arc::new(schema),
        dataset: Arc::new(dataset),
        live: Arc::new(LiveListingsProvider::new(&config)),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
