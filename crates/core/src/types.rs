//! Domain types for ROI prediction: the per-submission campaign input,
//! the two derived features, and the prediction result.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

/// Valid range for campaign duration in days.
pub const DURATION_RANGE: (u32, u32) = (1, 365);

/// Valid range for the conversion rate.
pub const CONVERSION_RATE_RANGE: (f64, f64) = (0.0, 1.0);

/// Valid range for the engagement score.
pub const ENGAGEMENT_SCORE_RANGE: (f64, f64) = (0.0, 10.0);

/// One campaign as submitted by the form. Categorical fields stay plain
/// strings here: the set of valid values belongs to the fitted encoder
/// artifact, so membership is checked at encode time rather than at
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignInput {
    pub campaign_type: String,
    pub target_audience: String,
    pub channel_used: String,
    pub location: String,
    pub customer_segment: String,
    pub duration: u32,
    pub acquisition_cost: f64,
    pub clicks: u64,
    pub impressions: u64,
    pub conversion_rate: f64,
    pub engagement_score: f64,
}

impl CampaignInput {
    /// Check every numeric field against its valid range.
    ///
    /// Zero impressions are rejected here: CTR is clicks/impressions, and
    /// a zero denominator would push a non-finite value into the scaler.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let (dur_min, dur_max) = DURATION_RANGE;
        if self.duration < dur_min || self.duration > dur_max {
            return Err(PipelineError::InvalidInput(format!(
                "duration must be in [{dur_min}, {dur_max}] days, got {}",
                self.duration
            )));
        }
        if !self.acquisition_cost.is_finite() || self.acquisition_cost < 0.0 {
            return Err(PipelineError::InvalidInput(format!(
                "acquisition_cost must be a non-negative number, got {}",
                self.acquisition_cost
            )));
        }
        if self.impressions == 0 {
            return Err(PipelineError::InvalidInput(
                "impressions must be greater than zero to derive CTR".to_string(),
            ));
        }
        let (cr_min, cr_max) = CONVERSION_RATE_RANGE;
        if !self.conversion_rate.is_finite()
            || self.conversion_rate < cr_min
            || self.conversion_rate > cr_max
        {
            return Err(PipelineError::InvalidInput(format!(
                "conversion_rate must be in [{cr_min}, {cr_max}], got {}",
                self.conversion_rate
            )));
        }
        let (es_min, es_max) = ENGAGEMENT_SCORE_RANGE;
        if !self.engagement_score.is_finite()
            || self.engagement_score < es_min
            || self.engagement_score > es_max
        {
            return Err(PipelineError::InvalidInput(format!(
                "engagement_score must be in [{es_min}, {es_max}], got {}",
                self.engagement_score
            )));
        }
        Ok(())
    }

    /// Categorical values in fitted encoder column order.
    pub fn categorical_values(&self) -> [&str; 5] {
        [
            &self.campaign_type,
            &self.target_audience,
            &self.channel_used,
            &self.location,
            &self.customer_segment,
        ]
    }
}

/// Features engineered from the raw input before encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    /// Click-through rate, clicks / impressions.
    pub ctr: f64,
    /// True ROI is unknown at inference time, so this column is a fixed
    /// placeholder matching the value used when the model was trained.
    pub roi_per_cost: f64,
}

impl DerivedFeatures {
    /// Derive from a validated input (`impressions > 0`).
    pub fn derive(input: &CampaignInput) -> Self {
        Self {
            ctr: input.clicks as f64 / input.impressions as f64,
            roi_per_cost: 0.0,
        }
    }
}

/// Output of one prediction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_roi: f64,
    /// predicted_roi * acquisition_cost.
    pub net_profit: f64,
}
