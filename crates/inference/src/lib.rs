pub mod artifacts;
pub mod encoder;
pub mod model;
pub mod pipeline;
pub mod scaler;

pub use artifacts::ArtifactSet;
pub use encoder::{EncoderColumn, OneHotEncoder};
pub use model::{ModelMetadata, RegressionForest};
pub use pipeline::RoiPipeline;
pub use scaler::StandardScaler;
