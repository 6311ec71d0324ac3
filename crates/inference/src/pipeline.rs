//! The inference pipeline — owns the loaded artifacts and exposes the one
//! operation of the system: campaign attributes in, predicted ROI and net
//! profit out.

use crate::artifacts::ArtifactSet;
use ndarray::Array1;
use roi_core::error::PipelineError;
use roi_core::types::{CampaignInput, DerivedFeatures, PredictionResult};
use std::sync::Arc;
use tracing::debug;

/// Numeric feature columns in fit order; the two derived columns come
/// last, followed by the one-hot blocks. This order is shared with the
/// fitted scaler and model — reordering invalidates both.
pub const NUMERIC_COLUMNS: [&str; 8] = [
    "duration",
    "acquisition_cost",
    "clicks",
    "impressions",
    "conversion_rate",
    "engagement_score",
    "ctr",
    "roi_per_cost",
];

/// Synchronous, stateless-per-request prediction pipeline over a shared
/// read-only artifact set.
pub struct RoiPipeline {
    artifacts: Arc<ArtifactSet>,
}

impl RoiPipeline {
    pub fn new(artifacts: Arc<ArtifactSet>) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    /// Run one prediction: validate, derive, encode, scale, guard, infer.
    ///
    /// Every error is local to this attempt; the artifact set is never
    /// touched, so the caller can correct the input and retry.
    pub fn predict(&self, input: &CampaignInput) -> Result<PredictionResult, PipelineError> {
        input.validate()?;
        let derived = DerivedFeatures::derive(input);

        let encoded = self
            .artifacts
            .encoder
            .transform(&input.categorical_values())?;

        let mut columns = Vec::with_capacity(NUMERIC_COLUMNS.len() + encoded.len());
        columns.extend([
            f64::from(input.duration),
            input.acquisition_cost,
            input.clicks as f64,
            input.impressions as f64,
            input.conversion_rate,
            input.engagement_score,
            derived.ctr,
            derived.roi_per_cost,
        ]);
        columns.extend(encoded);
        let combined = Array1::from(columns);

        let scaled = self.artifacts.scaler.transform(&combined)?;

        // Never hand the model a row of the wrong width; report both
        // counts instead of risking a silently wrong prediction.
        let expected = self.artifacts.model.n_features_in();
        if scaled.len() != expected {
            return Err(PipelineError::FeatureMismatch {
                expected,
                got: scaled.len(),
            });
        }

        let predicted_roi = self.artifacts.model.predict(scaled.view());
        debug!(
            predicted_roi,
            width = scaled.len(),
            "Inference complete"
        );

        Ok(PredictionResult {
            predicted_roi,
            net_profit: predicted_roi * input.acquisition_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{EncoderColumn, OneHotEncoder};
    use crate::scaler::StandardScaler;

    fn sample_input() -> CampaignInput {
        CampaignInput {
            campaign_type: "Email".to_string(),
            target_audience: "All Ages".to_string(),
            channel_used: "Email".to_string(),
            location: "New York".to_string(),
            customer_segment: "Foodies".to_string(),
            duration: 30,
            acquisition_cost: 12500.0,
            clicks: 5000,
            impressions: 100_000,
            conversion_rate: 0.05,
            engagement_score: 7.5,
        }
    }

    fn pipeline() -> RoiPipeline {
        RoiPipeline::new(Arc::new(ArtifactSet::synthetic()))
    }

    #[test]
    fn test_valid_input_predicts_finite_roi_and_profit() {
        let result = pipeline().predict(&sample_input()).unwrap();
        assert!(result.predicted_roi.is_finite());
        assert!(
            (result.net_profit - result.predicted_roi * 12500.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_predict_is_idempotent() {
        let pipeline = pipeline();
        let input = sample_input();
        let first = pipeline.predict(&input).unwrap();
        let second = pipeline.predict(&input).unwrap();
        assert_eq!(first.predicted_roi, second.predicted_roi);
        assert_eq!(first.net_profit, second.net_profit);
    }

    #[test]
    fn test_unknown_campaign_type_is_encoding_error() {
        let mut input = sample_input();
        input.campaign_type = "TV".to_string();
        let err = pipeline().predict(&input).unwrap_err();
        assert!(matches!(err, PipelineError::Encoding { .. }));
        assert!(err.to_string().contains("TV"));
    }

    #[test]
    fn test_zero_impressions_rejected_before_encoding() {
        let mut input = sample_input();
        input.impressions = 0;
        assert!(matches!(
            pipeline().predict(&input),
            Err(PipelineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_narrower_encoder_yields_scaling_error() {
        // Encoder fit on a category set smaller than the scaler's width.
        let mut set = ArtifactSet::synthetic();
        set.encoder = OneHotEncoder::new(vec![
            EncoderColumn {
                name: "campaign_type".to_string(),
                categories: vec!["Email".to_string()],
            },
            EncoderColumn {
                name: "target_audience".to_string(),
                categories: vec!["All Ages".to_string()],
            },
            EncoderColumn {
                name: "channel_used".to_string(),
                categories: vec!["Email".to_string()],
            },
            EncoderColumn {
                name: "location".to_string(),
                categories: vec!["New York".to_string()],
            },
            EncoderColumn {
                name: "customer_segment".to_string(),
                categories: vec!["Foodies".to_string()],
            },
        ]);
        let pipeline = RoiPipeline::new(Arc::new(set));

        let err = pipeline.predict(&sample_input()).unwrap_err();
        assert_eq!(
            err,
            PipelineError::Scaling {
                expected: 31,
                got: 13
            }
        );
    }

    #[test]
    fn test_model_width_mismatch_skips_prediction() {
        // Scaler matches the combined row, model was fit on a different
        // width: the guard must fire and name both counts.
        let mut set = ArtifactSet::synthetic();
        let width = set.scaler.width();
        set.scaler = StandardScaler::new(vec![0.0; width], vec![1.0; width]);
        set.model = crate::model::RegressionForest::new(
            width + 4,
            vec![crate::model::Tree {
                nodes: vec![crate::model::TreeNode::Leaf { value: 1.0 }],
            }],
            set.model.metadata().clone(),
        );
        let pipeline = RoiPipeline::new(Arc::new(set));

        let err = pipeline.predict(&sample_input()).unwrap_err();
        assert_eq!(
            err,
            PipelineError::FeatureMismatch {
                expected: width + 4,
                got: width
            }
        );
    }
}
