use thiserror::Error;

pub type RoiResult<T> = Result<T, RoiError>;

/// Errors raised by a single prediction attempt. All of these are
/// user-facing and recoverable: the request is rejected, the loaded
/// artifacts and any pending input stay untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown category {value:?} for column '{column}'")]
    Encoding { column: String, value: String },

    #[error("scaler expects {expected} features, got {got}")]
    Scaling { expected: usize, got: usize },

    #[error("model expects {expected} features, got {got}; prediction skipped")]
    FeatureMismatch { expected: usize, got: usize },
}

impl PipelineError {
    /// Stable machine-readable slug for API error payloads.
    pub fn slug(&self) -> &'static str {
        match self {
            PipelineError::InvalidInput(_) => "invalid_input",
            PipelineError::Encoding { .. } => "unknown_category",
            PipelineError::Scaling { .. } => "scaler_shape_mismatch",
            PipelineError::FeatureMismatch { .. } => "feature_mismatch",
        }
    }
}

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Artifact loading error: {0}")]
    ArtifactLoad(String),

    #[error("Prediction error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
