//! REST API handlers for ROI prediction and operational endpoints.
//!
//! The form itself lives outside this system; `/v1/schema` is its
//! contract (choices, ranges, defaults) and `/v1/predict` its one
//! trigger action.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use roi_core::types::{
    CampaignInput, PredictionResult, CONVERSION_RATE_RANGE, DURATION_RANGE,
    ENGAGEMENT_SCORE_RANGE,
};
use roi_inference::RoiPipeline;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RoiPipeline>,
    pub node_id: String,
    pub start_time: Instant,
}

/// POST /v1/predict — run one prediction for a form submission.
///
/// Pipeline failures are reported, not fatal: the submission is rejected
/// with the error named, and the loaded artifacts stay untouched.
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(input): Json<CampaignInput>,
) -> Result<Json<PredictionResult>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();

    match state.pipeline.predict(&input) {
        Ok(result) => {
            metrics::counter!("api.predictions").increment(1);
            info!(
                %request_id,
                predicted_roi = result.predicted_roi,
                net_profit = result.net_profit,
                "Prediction served"
            );
            Ok(Json(result))
        }
        Err(e) => {
            warn!(%request_id, error = %e, "Prediction rejected");
            metrics::counter!("api.prediction_errors").increment(1);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: e.slug().to_string(),
                    message: e.to_string(),
                }),
            ))
        }
    }
}

/// GET /v1/schema — the form contract: categorical choices from the
/// loaded encoder, numeric ranges, and default values.
pub async fn form_schema(State(state): State<AppState>) -> Json<SchemaResponse> {
    let encoder = &state.pipeline.artifacts().encoder;

    let categorical = encoder
        .columns()
        .iter()
        .map(|column| CategoricalField {
            name: column.name.clone(),
            default: column.categories.first().cloned().unwrap_or_default(),
            choices: column.categories.clone(),
        })
        .collect();

    let numeric = vec![
        NumericField {
            name: "duration".to_string(),
            min: f64::from(DURATION_RANGE.0),
            max: Some(f64::from(DURATION_RANGE.1)),
            default: 30.0,
        },
        NumericField {
            name: "acquisition_cost".to_string(),
            min: 0.0,
            max: None,
            default: 12500.0,
        },
        NumericField {
            name: "clicks".to_string(),
            min: 0.0,
            max: None,
            default: 5000.0,
        },
        NumericField {
            // CTR needs a denominator, so zero impressions are rejected.
            name: "impressions".to_string(),
            min: 1.0,
            max: None,
            default: 100_000.0,
        },
        NumericField {
            name: "conversion_rate".to_string(),
            min: CONVERSION_RATE_RANGE.0,
            max: Some(CONVERSION_RATE_RANGE.1),
            default: 0.05,
        },
        NumericField {
            name: "engagement_score".to_string(),
            min: ENGAGEMENT_SCORE_RANGE.0,
            max: Some(ENGAGEMENT_SCORE_RANGE.1),
            default: 7.5,
        },
    ];

    Json(SchemaResponse {
        categorical,
        numeric,
    })
}

/// GET /v1/model — training-run metrics and dimensions of the loaded model.
pub async fn model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    let model = &state.pipeline.artifacts().model;
    let metadata = model.metadata();

    Json(ModelInfoResponse {
        n_features: model.n_features_in(),
        n_trees: model.n_trees(),
        r2_score: metadata.r2_score,
        mse: metadata.mse,
        trained_at: metadata.trained_at,
    })
}

/// GET /health — Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — Readiness probe.
/// Returns 200 only when the service is ready to accept traffic.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.start_time.elapsed().as_secs() > 0 {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live — Liveness probe.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}

#[derive(Serialize)]
pub struct SchemaResponse {
    pub categorical: Vec<CategoricalField>,
    pub numeric: Vec<NumericField>,
}

#[derive(Serialize)]
pub struct CategoricalField {
    pub name: String,
    pub choices: Vec<String>,
    pub default: String,
}

#[derive(Serialize)]
pub struct NumericField {
    pub name: String,
    pub min: f64,
    pub max: Option<f64>,
    pub default: f64,
}

#[derive(Serialize)]
pub struct ModelInfoResponse {
    pub n_features: usize,
    pub n_trees: usize,
    pub r2_score: f64,
    pub mse: f64,
    pub trained_at: DateTime<Utc>,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}
