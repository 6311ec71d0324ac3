//! API server — HTTP REST surface plus the Prometheus metrics exporter.

use crate::rest::{self, AppState};
use axum::routing::{get, post};
use axum::Router;
use roi_core::config::AppConfig;
use roi_inference::RoiPipeline;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// HTTP server for the prediction API.
pub struct ApiServer {
    config: AppConfig,
    pipeline: Arc<RoiPipeline>,
}

impl ApiServer {
    pub fn new(config: AppConfig, pipeline: Arc<RoiPipeline>) -> Self {
        Self { config, pipeline }
    }

    /// Start the HTTP REST server. Runs until the process exits.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let state = AppState {
            pipeline: self.pipeline.clone(),
            node_id: self.config.node_id.clone(),
            start_time: Instant::now(),
        };

        let app = Router::new()
            // Prediction endpoints
            .route("/v1/predict", post(rest::handle_predict))
            .route("/v1/schema", get(rest::form_schema))
            .route("/v1/model", get(rest::model_info))
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics exporter on a separate port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        let handle = builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install_recorder()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        // Keep the handle alive
        std::mem::forget(handle);
        Ok(())
    }
}
