use ort::Error as OrtError;
use std::fmt;

/// Represents the different types of errors that can occur while loading or running the crop classifier.
#[derive(Debug)]
pub enum ClassifierError {
    /// The model artifact is missing, corrupt, fails its checksum, or ONNX Runtime could not start.
    /// Fatal: no prediction can be served.
    LoadFailure(String),
    /// The feature vector or model output violated the inference contract
    InferenceFailure(String),
    /// Error occurred due to invalid builder parameters
    ValidationError(String),
    /// Error occurred during the build phase
    BuildError(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFailure(msg) => write!(f, "Model load failure: {}", msg),
            Self::InferenceFailure(msg) => write!(f, "Inference failure: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::LoadFailure(err.to_string())
    }
}

impl ClassifierError {
    /// Whether the error means the classifier cannot serve predictions at all
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::LoadFailure(_) | Self::BuildError(_))
    }
}
