//! HTTP surface for the priority engine: weight configuration endpoints plus
//! the shipment record endpoints that feed the scorer. Route shapes and
//! response messages follow the record-management service contract.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use metrics::counter;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::records::RecordStore;
use crate::scoring::{score_batch, ScoreError};
use crate::shipment::{NewShipment, Shipment};
use crate::weight_store::WeightStore;
use crate::weights::{FeatureWeights, WeightEntry, WeightsError};

#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordStore>,
    pub weights: Arc<WeightStore>,
}

impl AppState {
    pub fn new(records: RecordStore, weights: WeightStore) -> Self {
        Self {
            records: Arc::new(records),
            weights: Arc::new(weights),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/weights/fixed", post(update_fixed_weights))
        .route("/weights/get", get(get_all_weights))
        .route("/shipments/bulk", post(create_bulk_shipments))
        .route("/shipments", get(get_all_shipments))
        .route("/shipments/score", post(score_shipments))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Errors surfaced to API clients. Validation failures reject the request
/// before any state changes; everything else is a store-level failure.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<WeightsError> for ApiError {
    fn from(e: WeightsError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<ScoreError> for ApiError {
    fn from(e: ScoreError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[derive(serde::Serialize)]
struct Msg {
    message: String,
}

fn msg(message: impl Into<String>) -> Json<Msg> {
    Json(Msg {
        message: message.into(),
    })
}

/// Atomic full replace of the weight configuration. Each field must be within
/// [0, 1]; out-of-range input is rejected before the store is touched.
async fn update_fixed_weights(
    State(state): State<AppState>,
    Json(config): Json<FeatureWeights>,
) -> Result<Json<Msg>, ApiError> {
    config.validate()?;
    state.weights.replace_all(&config)?;
    counter!("weight_config_replacements_total").increment(1);
    info!(?config, "weight configuration replaced");
    Ok(msg("Weights overwritten successfully."))
}

async fn get_all_weights(State(state): State<AppState>) -> Json<Vec<WeightEntry>> {
    Json(state.weights.entries())
}

async fn create_bulk_shipments(
    State(state): State<AppState>,
    Json(shipments): Json<Vec<NewShipment>>,
) -> Json<Msg> {
    let added = state.records.insert_bulk(shipments);
    counter!("shipments_inserted_total").increment(added as u64);
    msg(format!("{added} shipments inserted successfully"))
}

async fn get_all_shipments(State(state): State<AppState>) -> Json<Vec<Shipment>> {
    Json(state.records.snapshot_all())
}

/// Score every stored shipment under the current weight configuration and
/// write each score back onto its record.
async fn score_shipments(State(state): State<AppState>) -> Result<Json<Msg>, ApiError> {
    let snapshot = state.records.snapshot_all();
    if snapshot.is_empty() {
        return Ok(msg("No shipments found."));
    }

    let features: Vec<_> = snapshot.iter().map(|s| s.features()).collect();
    let weights = state.weights.current();
    let today = Utc::now().date_naive();

    let scores = score_batch(&features, &weights, today)?;
    let updated = state.records.apply_scores(&scores);

    counter!("shipments_scored_total").increment(updated as u64);
    info!(batch = updated, "priority scores updated");
    Ok(msg(format!("Updated {updated} shipments with priority scores.")))
}
