/// Default location of the trained crop model, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/RandomForest.onnx";

/// Output name converters give the predicted class of a tree ensemble
pub const LABEL_OUTPUT_NAME: &str = "output_label";

/// File name of a model artifact inside the model store
pub const MODEL_FILE_NAME: &str = "model.onnx";

/// Describes a trained model artifact the operator wants in the local model store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Directory name in the store
    pub name: String,
    /// Where to fetch the ONNX file from
    pub model_url: String,
    /// Expected lowercase hex SHA-256 of the file
    pub model_hash: String,
}

impl ModelInfo {
    pub fn new(name: impl Into<String>, model_url: impl Into<String>, model_hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model_url: model_url.into(),
            model_hash: model_hash.into().trim().to_ascii_lowercase(),
        }
    }
}
