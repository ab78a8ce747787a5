//! Shipment Priority Engine — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shipment_priority_engine::config::ServiceConfig;
use shipment_priority_engine::metrics::Metrics;
use shipment_priority_engine::{api, AppState, RecordStore, WeightStore};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("shipment_priority_engine=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = ServiceConfig::load()?;
    let weights = WeightStore::open(&cfg.weights_path)?;
    tracing::info!(
        path = %weights.path().display(),
        entries = weights.entries().len(),
        "weight store opened"
    );

    let metrics = Metrics::init(weights.entries().len());

    let state = AppState::new(RecordStore::new(), weights);
    let app = api::router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(addr = %cfg.bind_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
