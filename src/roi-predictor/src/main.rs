//! Marketing Campaign ROI Predictor — prediction service entry point.
//!
//! Loads the three pre-fit artifacts once, then serves predictions until
//! the process exits.

use clap::Parser;
use roi_api::ApiServer;
use roi_core::config::AppConfig;
use roi_inference::{ArtifactSet, RoiPipeline};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "roi-predictor")]
#[command(about = "Marketing campaign ROI prediction service")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "ROI_PREDICTOR__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "ROI_PREDICTOR__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Path to the fitted one-hot encoder artifact (overrides config)
    #[arg(long, env = "ROI_PREDICTOR__ARTIFACTS__ENCODER_PATH")]
    encoder_path: Option<String>,

    /// Path to the fitted scaler artifact (overrides config)
    #[arg(long, env = "ROI_PREDICTOR__ARTIFACTS__SCALER_PATH")]
    scaler_path: Option<String>,

    /// Path to the trained model artifact (overrides config)
    #[arg(long, env = "ROI_PREDICTOR__ARTIFACTS__MODEL_PATH")]
    model_path: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roi_predictor=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("ROI predictor starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(path) = cli.encoder_path {
        config.artifacts.encoder_path = path;
    }
    if let Some(path) = cli.scaler_path {
        config.artifacts.scaler_path = path;
    }
    if let Some(path) = cli.model_path {
        config.artifacts.model_path = path;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        encoder_path = %config.artifacts.encoder_path,
        scaler_path = %config.artifacts.scaler_path,
        model_path = %config.artifacts.model_path,
        "Configuration loaded"
    );

    // Load artifacts once; shared read-only for the program lifetime.
    let artifacts = Arc::new(ArtifactSet::load(&config.artifacts)?);
    let pipeline = Arc::new(RoiPipeline::new(artifacts));

    let server = ApiServer::new(config, pipeline);
    server.start_metrics().await?;
    server.start_http().await?;

    Ok(())
}
