use std::path::Path;
use std::sync::Arc;

use log::{error, info, warn};
use ort::session::Session;

use super::error::ClassifierError;
use super::model::OnnxCropClassifier;
use super::utils::validate_class_labels;
use super::CropClassifier;
use crate::crops::Crop;
use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::model_manager::{file_sha256, ModelManager};
use crate::models::{ModelInfo, LABEL_OUTPUT_NAME};
use crate::runtime::{create_session_builder, RuntimeConfig};

/// A builder for loading an [`OnnxCropClassifier`] with a fluent interface.
///
/// Loading happens eagerly in the `with_model*` methods so that a missing or
/// corrupt artifact surfaces as a `LoadFailure` before anything is served.
#[derive(Default, Debug)]
pub struct CropClassifierBuilder {
    model_path: Option<String>,
    session: Option<Session>,
    input_name: Option<String>,
    label_output: Option<String>,
    class_labels: Option<Vec<String>>,
    runtime_config: RuntimeConfig,
}

impl CropClassifierBuilder {
    /// Creates a new empty CropClassifierBuilder instance with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime configuration for ONNX model execution.
    /// Must be called before the model is set to take effect.
    ///
    /// # Example
    /// ```
    /// use cropwise::{CropClassifierBuilder, RuntimeConfig};
    ///
    /// let builder = CropClassifierBuilder::new()
    ///     .with_runtime_config(RuntimeConfig::with_threads(1));
    /// ```
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Loads the ONNX model at `path`.
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - A model is already set (`BuildError`)
    ///   - The file doesn't exist (`LoadFailure`)
    ///   - ONNX Runtime cannot load it (`LoadFailure`)
    ///   - The model does not have exactly one input and at least one output (`LoadFailure`)
    pub fn with_model_file(mut self, path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if self.model_path.is_some() {
            return Err(ClassifierError::BuildError("Model already set".to_string()));
        }
        if !path.exists() {
            error!("Model file not found: {}", path.display());
            return Err(ClassifierError::LoadFailure(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        let session = create_session_builder(&self.runtime_config)?
            .commit_from_file(path)
            .map_err(|e| {
                error!("Failed to load model {}: {}", path.display(), e);
                ClassifierError::LoadFailure(format!("Failed to load model {}: {}", path.display(), e))
            })?;

        let (input_name, label_output) = Self::validate_model(&session)?;
        info!(
            "Model loaded from {} (input '{}', label output '{}')",
            path.display(),
            input_name,
            label_output
        );

        self.model_path = Some(path.to_string_lossy().to_string());
        self.session = Some(session);
        self.input_name = Some(input_name);
        self.label_output = Some(label_output);
        Ok(self)
    }

    /// Loads the model at `path` after checking its SHA-256 digest.
    ///
    /// # Errors
    /// - `LoadFailure` if the file is missing, unreadable, or its digest differs from `sha256`
    /// - Everything [`with_model_file`](Self::with_model_file) can return
    pub fn with_verified_model_file(self, path: impl AsRef<Path>, sha256: &str) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let actual = file_sha256(path).map_err(|e| {
            ClassifierError::LoadFailure(format!("Failed to read model {}: {}", path.display(), e))
        })?;
        if !actual.eq_ignore_ascii_case(sha256.trim()) {
            error!("Checksum mismatch for {}: expected {}, got {}", path.display(), sha256, actual);
            return Err(ClassifierError::LoadFailure(format!(
                "Checksum mismatch for {}: expected {}, got {}",
                path.display(),
                sha256,
                actual
            )));
        }
        info!("Model checksum verified for {}", path.display());
        self.with_model_file(path)
    }

    /// Loads a model kept in the local model store.
    ///
    /// The artifact must already be downloaded and must pass verification.
    pub fn with_model(self, manager: &ModelManager, model: &ModelInfo) -> Result<Self, ClassifierError> {
        if !manager.is_model_downloaded(&model.name) {
            return Err(ClassifierError::LoadFailure(format!(
                "Model '{}' is not downloaded. Please download it first using ModelManager::download_model()",
                model.name
            )));
        }
        let verified = manager
            .verify_model(model)
            .map_err(|e| ClassifierError::LoadFailure(e.to_string()))?;
        if !verified {
            return Err(ClassifierError::LoadFailure(format!(
                "Model '{}' failed verification",
                model.name
            )));
        }
        self.with_model_file(manager.get_model_path(&model.name))
    }

    /// Sets the class labels used to decode integer model outputs.
    ///
    /// Defaults to the 22 known crops in sorted order.
    ///
    /// # Errors
    /// - `ValidationError` if the list is empty, has a blank label, or repeats a label
    pub fn with_class_labels(mut self, labels: Vec<impl Into<String>>) -> Result<Self, ClassifierError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        validate_class_labels(&labels)?;

        let unknown: Vec<&str> = labels
            .iter()
            .filter(|l| Crop::from_label(l).is_none())
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            warn!("Class labels outside the known crop list: {}", unknown.join(", "));
        }

        self.class_labels = Some(labels);
        Ok(self)
    }

    /// Builds the classifier and runs one warm-up inference so that a model whose
    /// outputs cannot be decoded is rejected at load time.
    ///
    /// # Errors
    /// - `BuildError` if no model was set
    /// - `LoadFailure` if the warm-up inference fails
    pub fn build(mut self) -> Result<OnnxCropClassifier, ClassifierError> {
        let session = self
            .session
            .take()
            .ok_or_else(|| ClassifierError::BuildError("A model must be set before building".into()))?;
        let (model_path, input_name, label_output) =
            match (self.model_path.take(), self.input_name.take(), self.label_output.take()) {
                (Some(path), Some(input), Some(output)) => (path, input, output),
                _ => return Err(ClassifierError::BuildError("Model metadata missing".into())),
            };
        let class_labels = self.class_labels.take().unwrap_or_else(Crop::model_class_order);

        let classifier = OnnxCropClassifier {
            model_path,
            session: Arc::new(session),
            input_name,
            label_output,
            class_labels: Arc::new(class_labels),
        };

        let zero = FeatureVector::try_from_slice(&[0.0; FEATURE_COUNT])?;
        classifier.predict(&zero).map_err(|e| {
            error!("Warm-up inference failed: {}", e);
            ClassifierError::LoadFailure(format!("Model failed a warm-up inference: {}", e))
        })?;

        info!(
            "Crop classifier ready ({} class labels)",
            classifier.class_labels.len()
        );
        Ok(classifier)
    }

    /// Checks the model shape and picks the label output.
    ///
    /// Returns the input name and the name of the output carrying the class label:
    /// the one named `output_label` if present, else the first output.
    fn validate_model(session: &Session) -> Result<(String, String), ClassifierError> {
        let inputs = &session.inputs;
        if inputs.len() != 1 {
            return Err(ClassifierError::LoadFailure(format!(
                "Model must have exactly 1 input (a [N, {}] float tensor), found {}",
                FEATURE_COUNT,
                inputs.len()
            )));
        }

        let outputs = &session.outputs;
        let label_output = outputs
            .iter()
            .find(|o| o.name == LABEL_OUTPUT_NAME)
            .or_else(|| outputs.first())
            .ok_or_else(|| ClassifierError::LoadFailure("Model must have at least 1 output for the class label".to_string()))?;

        Ok((inputs[0].name.clone(), label_output.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_model() {
        let result = CropClassifierBuilder::new().build();
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_missing_model_file() {
        let result = CropClassifierBuilder::new().with_model_file("/nonexistent/cropwise/RandomForest.onnx");
        match result {
            Err(e) => {
                assert!(matches!(e, ClassifierError::LoadFailure(_)));
                assert!(e.is_fatal());
            }
            Ok(_) => panic!("expected a load failure"),
        }
    }

    #[test]
    fn test_class_label_validation() {
        assert!(CropClassifierBuilder::new().with_class_labels(vec!["rice", "maize"]).is_ok());
        assert!(matches!(
            CropClassifierBuilder::new().with_class_labels(Vec::<String>::new()),
            Err(ClassifierError::ValidationError(_))
        ));
        assert!(CropClassifierBuilder::new().with_class_labels(vec!["rice", "rice"]).is_err());
        assert!(CropClassifierBuilder::new().with_class_labels(vec!["rice", ""]).is_err());
    }
}
