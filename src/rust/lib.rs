//! Crop, planting season and fertilizer recommendations from seven soil and
//! climate measurements.
//!
//! A pre-trained classifier (an ONNX model run with ONNX Runtime) picks the crop,
//! a fixed rule table picks the season, and a static table lists fertilizers for
//! the crop.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use cropwise::{FeatureVector, OnnxCropClassifier, Recommender};
//!
//! let classifier = OnnxCropClassifier::builder()
//!     .with_model_file("models/RandomForest.onnx")?
//!     .build()?;
//! let recommender = Recommender::new(Arc::new(classifier));
//!
//! let rec = recommender.recommend(&FeatureVector::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9))?;
//! println!("Predicted crop: {}", rec.crop);
//! println!("Season: {}", rec.season);
//! # Ok(())
//! # }
//! ```
//!
//! The season rules and fertilizer table need no model:
//!
//! ```rust
//! use cropwise::{classify_season, recommend_fertilizers, Season};
//!
//! assert_eq!(classify_season(120.0, 25.0, 35.0, 32.0, 75.0, 6.5, 250.0), Season::Monsoon);
//! assert_eq!(
//!     recommend_fertilizers("RICE"),
//!     Some(&["NPK 15-15-15", "Urea", "Potassium sulfate"][..])
//! );
//! assert!(recommend_fertilizers("dragonfruit").is_none());
//! ```

pub mod classifier;
pub mod crops;
pub mod features;
pub mod fertilizer;
pub mod model_manager;
pub mod models;
pub mod pipeline;
pub mod presentation;
mod runtime;
pub mod season;

pub use classifier::{ClassifierError, ClassifierInfo, CropClassifier, CropClassifierBuilder, OnnxCropClassifier};
pub use crops::{Crop, CropLabel};
pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES, INPUT_RANGES};
pub use fertilizer::{recommend_fertilizers, FertilizerList};
pub use model_manager::{ModelError, ModelManager};
pub use models::{ModelInfo, DEFAULT_MODEL_PATH};
pub use pipeline::{Recommendation, Recommender};
pub use runtime::{create_session_builder, RuntimeConfig};
pub use season::{classify_features, classify_season, Season};

pub fn init_logger() {
    env_logger::init();
}
