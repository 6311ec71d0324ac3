//! Pre-fit one-hot encoder over the categorical campaign columns.
//!
//! The encoder is fit offline together with the scaler and model; at
//! inference time it only maps each categorical value to an indicator
//! block over the categories seen during fit. A value outside the fitted
//! set is an error, never silently dropped: dropping would shift every
//! downstream column and invalidate the scaler and model.

use roi_core::error::PipelineError;
use serde::{Deserialize, Serialize};

/// One fitted categorical column: its name and the ordered category set
/// seen at fit time. Order determines indicator positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderColumn {
    pub name: String,
    pub categories: Vec<String>,
}

/// Fitted one-hot encoder. Columns are stored in fit order; the output
/// blocks are concatenated in that same order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    columns: Vec<EncoderColumn>,
}

impl OneHotEncoder {
    pub fn new(columns: Vec<EncoderColumn>) -> Self {
        Self { columns }
    }

    /// Total width of the encoded block (sum of category counts).
    pub fn width(&self) -> usize {
        self.columns.iter().map(|c| c.categories.len()).sum()
    }

    pub fn columns(&self) -> &[EncoderColumn] {
        &self.columns
    }

    /// Encode one row of categorical values, given in fit column order.
    ///
    /// Errors with the offending column and value if any value was not
    /// seen during fit.
    pub fn transform(&self, values: &[&str]) -> Result<Vec<f64>, PipelineError> {
        if values.len() != self.columns.len() {
            return Err(PipelineError::InvalidInput(format!(
                "encoder was fit on {} categorical columns, got {}",
                self.columns.len(),
                values.len()
            )));
        }

        let mut encoded = vec![0.0; self.width()];
        let mut offset = 0;
        for (column, value) in self.columns.iter().zip(values) {
            match column.categories.iter().position(|c| c == value) {
                Some(idx) => encoded[offset + idx] = 1.0,
                None => {
                    return Err(PipelineError::Encoding {
                        column: column.name.clone(),
                        value: value.to_string(),
                    })
                }
            }
            offset += column.categories.len();
        }

        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_encoder() -> OneHotEncoder {
        OneHotEncoder::new(vec![
            EncoderColumn {
                name: "campaign_type".to_string(),
                categories: vec!["Email".to_string(), "Search".to_string()],
            },
            EncoderColumn {
                name: "location".to_string(),
                categories: vec![
                    "New York".to_string(),
                    "Chicago".to_string(),
                    "Miami".to_string(),
                ],
            },
        ])
    }

    #[test]
    fn test_transform_sets_one_indicator_per_column() {
        let encoder = two_column_encoder();
        let encoded = encoder.transform(&["Search", "Miami"]).unwrap();
        assert_eq!(encoded, vec![0.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_width_sums_category_counts() {
        assert_eq!(two_column_encoder().width(), 5);
    }

    #[test]
    fn test_unknown_category_names_column_and_value() {
        let encoder = two_column_encoder();
        let err = encoder.transform(&["TV", "Miami"]).unwrap_err();
        match err {
            PipelineError::Encoding { column, value } => {
                assert_eq!(column, "campaign_type");
                assert_eq!(value, "TV");
            }
            other => panic!("expected Encoding error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let encoder = two_column_encoder();
        assert!(matches!(
            encoder.transform(&["Email"]),
            Err(PipelineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_encoder_deserializes_from_artifact_json() {
        let json = r#"{
            "columns": [
                {"name": "channel_used", "categories": ["Instagram", "Email", "Google Ads"]}
            ]
        }"#;
        let encoder: OneHotEncoder = serde_json::from_str(json).unwrap();
        assert_eq!(encoder.width(), 3);
        let encoded = encoder.transform(&["Email"]).unwrap();
        assert_eq!(encoded, vec![0.0, 1.0, 0.0]);
    }
}
