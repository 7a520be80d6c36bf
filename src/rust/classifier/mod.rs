mod error;
mod model;
pub mod builder;
mod utils;

pub use error::ClassifierError;
pub use model::OnnxCropClassifier;
pub use builder::CropClassifierBuilder;

use crate::crops::CropLabel;
use crate::features::FeatureVector;

/// A trained model that maps a soil and climate reading to a crop label.
///
/// Implementations must be deterministic for a fixed model and input, and safe to
/// share across threads once loaded.
pub trait CropClassifier: Send + Sync {
    /// Predicts the single best-matching crop.
    ///
    /// # Errors
    /// - `InferenceFailure` if the features are not finite or the model misbehaves
    fn predict(&self, features: &FeatureVector) -> Result<CropLabel, ClassifierError>;
}

/// Information about a loaded classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Path to the ONNX model file
    pub model_path: String,
    /// Name of the model's feature input
    pub input_name: String,
    /// Name of the output carrying the predicted label
    pub label_output: String,
    /// Labels used to decode integer class outputs
    pub class_labels: Vec<String>,
}
