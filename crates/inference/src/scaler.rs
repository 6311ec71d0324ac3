//! Pre-fit standard scaler: per-column zero-mean unit-variance transform
//! with statistics fixed at fit time.

use ndarray::Array1;
use roi_core::error::PipelineError;
use serde::{Deserialize, Serialize};

/// Fitted scaler statistics, one entry per feature column in fit order.
/// A zero `scale` entry marks a constant column at fit time; such columns
/// are centered but not divided (the fit stored no usable variance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    /// Number of feature columns this scaler was fit on.
    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// `mean` and `scale` must be the same length for the scaler to be
    /// usable; checked once at artifact load.
    pub fn is_consistent(&self) -> bool {
        self.mean.len() == self.scale.len()
    }

    /// Scale one combined feature row.
    pub fn transform(&self, features: &Array1<f64>) -> Result<Array1<f64>, PipelineError> {
        if features.len() != self.width() {
            return Err(PipelineError::Scaling {
                expected: self.width(),
                got: features.len(),
            });
        }

        let scaled = features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&x, (&mean, &scale))| {
                let divisor = if scale == 0.0 { 1.0 } else { scale };
                (x - mean) / divisor
            })
            .collect();

        Ok(scaled)
    }
}
