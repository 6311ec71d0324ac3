//! Loading and ownership of the three pre-fit artifacts.
//!
//! The encoder, scaler, and model are fit together offline and shipped as
//! JSON files. They are loaded once at startup and never mutated; the rest
//! of the system sees them behind an `Arc`. When the files are absent
//! (development, CI), deterministic synthetic artifacts fit on the form's
//! category sets stand in, so the service still starts and predicts.

use crate::encoder::{EncoderColumn, OneHotEncoder};
use crate::model::{ModelMetadata, RegressionForest, Tree, TreeNode};
use crate::scaler::StandardScaler;
use chrono::{TimeZone, Utc};
use roi_core::config::ArtifactConfig;
use roi_core::error::{RoiError, RoiResult};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{info, warn};

/// Category sets the synthetic encoder is fit on — the choices offered by
/// the campaign form, one set per categorical column in fit order.
const SYNTHETIC_CATEGORIES: [(&str, &[&str]); 5] = [
    (
        "campaign_type",
        &["Social Media", "Email", "Search", "Display", "Influencer"],
    ),
    (
        "target_audience",
        &["All Ages", "Men 18-24", "Men 25-34", "Women 25-34", "Women 35-44"],
    ),
    ("channel_used", &["Instagram", "Email", "Google Ads"]),
    (
        "location",
        &["Los Angeles", "New York", "Chicago", "Miami", "Houston"],
    ),
    (
        "customer_segment",
        &[
            "Foodies",
            "Tech Enthusiasts",
            "Outdoor Adventurers",
            "Health & Wellness",
            "Fashionistas",
        ],
    ),
];

/// Fit-time statistics for the eight numeric columns of the synthetic
/// scaler (duration, acquisition_cost, clicks, impressions,
/// conversion_rate, engagement_score, ctr, roi_per_cost). The last column
/// is constant at fit time, so its scale is zero.
const SYNTHETIC_NUMERIC_MEAN: [f64; 8] =
    [90.0, 8000.0, 4500.0, 90_000.0, 0.08, 5.5, 0.05, 0.0];
const SYNTHETIC_NUMERIC_SCALE: [f64; 8] =
    [75.0, 6500.0, 3000.0, 60_000.0, 0.06, 2.5, 0.04, 0.0];

/// The three loaded artifacts, immutable for the program lifetime.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub encoder: OneHotEncoder,
    pub scaler: StandardScaler,
    pub model: RegressionForest,
}

impl ArtifactSet {
    /// Load the artifact files named in the config.
    ///
    /// All three files must be present to use them; otherwise the
    /// synthetic set stands in, with a warning naming what was missing.
    /// Structural problems inside a present file are hard errors.
    pub fn load(config: &ArtifactConfig) -> RoiResult<Self> {
        let paths = [
            &config.encoder_path,
            &config.scaler_path,
            &config.model_path,
        ];
        let missing: Vec<&str> = paths
            .iter()
            .filter(|p| !Path::new(p.as_str()).exists())
            .map(|p| p.as_str())
            .collect();

        if !missing.is_empty() {
            warn!(
                missing = ?missing,
                "Artifact files not found, using synthetic artifacts for development"
            );
            return Ok(Self::synthetic());
        }

        let encoder: OneHotEncoder = read_json(&config.encoder_path)?;
        let scaler: StandardScaler = read_json(&config.scaler_path)?;
        let model: RegressionForest = read_json(&config.model_path)?;

        if !scaler.is_consistent() {
            return Err(RoiError::ArtifactLoad(format!(
                "{}: mean and scale vectors differ in length",
                config.scaler_path
            )));
        }
        model
            .check()
            .map_err(|e| RoiError::ArtifactLoad(format!("{}: {e}", config.model_path)))?;

        info!(
            encoder_width = encoder.width(),
            scaler_width = scaler.width(),
            model_width = model.n_features_in(),
            "Artifacts loaded"
        );

        Ok(Self {
            encoder,
            scaler,
            model,
        })
    }

    /// Deterministic artifacts fit on the form's category sets. Every run
    /// produces the same encoder, scaler, and forest, so predictions are
    /// reproducible in development and tests.
    pub fn synthetic() -> Self {
        let encoder = OneHotEncoder::new(
            SYNTHETIC_CATEGORIES
                .iter()
                .map(|(name, categories)| EncoderColumn {
                    name: name.to_string(),
                    categories: categories.iter().map(|c| c.to_string()).collect(),
                })
                .collect(),
        );

        let mut mean = SYNTHETIC_NUMERIC_MEAN.to_vec();
        let mut scale = SYNTHETIC_NUMERIC_SCALE.to_vec();
        for (_, categories) in SYNTHETIC_CATEGORIES {
            // Indicator column fit stats for a uniform category draw.
            let p = 1.0 / categories.len() as f64;
            for _ in categories {
                mean.push(p);
                scale.push((p * (1.0 - p)).sqrt());
            }
        }
        let scaler = StandardScaler::new(mean, scale);

        let model = synthetic_forest(scaler.width());

        Self {
            encoder,
            scaler,
            model,
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> RoiResult<T> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| RoiError::ArtifactLoad(format!("{path}: {e}")))?;
    serde_json::from_str(&raw).map_err(|e| RoiError::ArtifactLoad(format!("{path}: {e}")))
}

/// Forest of depth-1 trees with index-derived thresholds and leaf values.
fn synthetic_forest(n_features: usize) -> RegressionForest {
    let trees = (0..24)
        .map(|t| {
            let feature = (t * 5 + 2) % n_features;
            let threshold = ((t % 7) as f64 - 3.0) / 4.0;
            let low = 1.5 + (t % 5) as f64 * 0.35;
            Tree {
                nodes: vec![
                    TreeNode::Split {
                        feature,
                        threshold,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf { value: low },
                    TreeNode::Leaf { value: low + 1.4 },
                ],
            }
        })
        .collect();

    let metadata = ModelMetadata {
        r2_score: 0.8024,
        mse: 0.5946,
        trained_at: Utc
            .with_ymd_and_hms(2026, 1, 15, 0, 0, 0)
            .single()
            .unwrap_or_default(),
    };

    RegressionForest::new(n_features, trees, metadata)
}
