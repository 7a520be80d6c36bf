use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use ort::session::Session;
use ort::value::Tensor;

use super::error::ClassifierError;
use super::utils::decode_label;
use super::{ClassifierInfo, CropClassifier};
use crate::crops::CropLabel;
use crate::features::FeatureVector;

/// A pre-trained crop classifier served by ONNX Runtime.
///
/// The model takes one float tensor of shape `[1, 7]` and returns the predicted
/// class either as a string or as an index into `class_labels`.
///
/// # Thread Safety
///
/// This type is `Send + Sync`: the session and the label list sit behind `Arc` and
/// are never mutated after [`CropClassifierBuilder::build`](super::CropClassifierBuilder::build).
///
/// ```rust,no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use cropwise::{CropClassifier, FeatureVector, OnnxCropClassifier};
///
/// let classifier = OnnxCropClassifier::load("models/RandomForest.onnx")?;
/// let crop = classifier.predict(&FeatureVector::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9))?;
/// println!("Predicted crop: {}", crop);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OnnxCropClassifier {
    pub model_path: String,
    pub(super) session: Arc<Session>,
    pub(super) input_name: String,
    pub(super) label_output: String,
    pub(super) class_labels: Arc<Vec<String>>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<OnnxCropClassifier>();
    }
};

impl OnnxCropClassifier {
    /// Creates a new CropClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::CropClassifierBuilder {
        super::builder::CropClassifierBuilder::new()
    }

    /// Loads the model at `path` with the default runtime config and class labels.
    ///
    /// # Errors
    /// - `LoadFailure` if the file is missing or is not a usable model
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ClassifierError> {
        Self::builder().with_model_file(path)?.build()
    }

    /// Returns information about the loaded model
    pub fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            model_path: self.model_path.clone(),
            input_name: self.input_name.clone(),
            label_output: self.label_output.clone(),
            class_labels: self.class_labels.as_ref().clone(),
        }
    }

    fn run(&self, features: &FeatureVector) -> Result<String, ClassifierError> {
        let input = Tensor::from_array(features.to_input_array())
            .map_err(|e| ClassifierError::InferenceFailure(format!("Failed to create input tensor: {}", e)))?;

        let mut input_tensors = HashMap::new();
        input_tensors.insert(self.input_name.as_str(), input);

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| ClassifierError::InferenceFailure(format!("Failed to run model: {}", e)))?;

        decode_label(&outputs[self.label_output.as_str()], &self.class_labels)
    }
}

impl CropClassifier for OnnxCropClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<CropLabel, ClassifierError> {
        features.validate()?;
        let label = self.run(features)?;
        debug!("Model predicted '{}' for {:?}", label, features.as_array());
        Ok(CropLabel::new(label))
    }
}
