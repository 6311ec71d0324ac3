//! Integration test for the full predict request/response flow against
//! the synthetic artifact set.

#[cfg(test)]
mod tests {
    use roi_core::types::{CampaignInput, PredictionResult};
    use roi_inference::{ArtifactSet, RoiPipeline};
    use std::sync::Arc;

    /// Construct the worked example submission from the form defaults.
    fn sample_submission() -> CampaignInput {
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
    fn test_submission_deserializes_from_form_json() {
        let json = r#"{
            "campaign_type": "Email",
            "target_audience": "All Ages",
            "channel_used": "Email",
            "location": "New York",
            "customer_segment": "Foodies",
            "duration": 30,
            "acquisition_cost": 12500.0,
            "clicks": 5000,
            "impressions": 100000,
            "conversion_rate": 0.05,
            "engagement_score": 7.5
        }"#;
        let input: CampaignInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.location, "New York");
        assert_eq!(input.clicks, 5000);
    }

    #[test]
    fn test_predict_flow_end_to_end() {
        let result = pipeline().predict(&sample_submission()).unwrap();

        assert!(result.predicted_roi.is_finite());
        assert!((result.net_profit - result.predicted_roi * 12500.0).abs() < 1e-9);

        // Result serializes for the response body.
        let json = serde_json::to_string(&result).unwrap();
        let back: PredictionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.predicted_roi, result.predicted_roi);
    }

    #[test]
    fn test_predict_flow_is_reproducible() {
        // Fixed artifacts: two pipelines built the same way must agree on
        // the same submission.
        let first = pipeline().predict(&sample_submission()).unwrap();
        let second = pipeline().predict(&sample_submission()).unwrap();
        assert_eq!(first.predicted_roi, second.predicted_roi);
    }

    #[test]
    fn test_every_known_category_combination_encodes() {
        let pipeline = pipeline();
        let encoder = pipeline.artifacts().encoder.clone();
        let columns = encoder.columns();

        // Walk each column's full category set while holding the others
        // at the sample values.
        for (col_idx, column) in columns.iter().enumerate() {
            for category in &column.categories {
                let mut input = sample_submission();
                match col_idx {
                    0 => input.campaign_type = category.clone(),
                    1 => input.target_audience = category.clone(),
                    2 => input.channel_used = category.clone(),
                    3 => input.location = category.clone(),
                    4 => input.customer_segment = category.clone(),
                    _ => unreachable!(),
                }
                let result = pipeline.predict(&input).unwrap();
                assert!(result.predicted_roi.is_finite());
            }
        }
    }

    #[test]
    fn test_error_reporting_is_user_facing() {
        let mut input = sample_submission();
        input.customer_segment = "Gamers".to_string();
        let err = pipeline().predict(&input).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("customer_segment"));
        assert!(message.contains("Gamers"));
    }
}
