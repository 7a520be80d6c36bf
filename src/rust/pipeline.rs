use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

use crate::classifier::{ClassifierError, CropClassifier};
use crate::crops::CropLabel;
use crate::features::FeatureVector;
use crate::fertilizer::{recommend_fertilizers, FertilizerList};
use crate::season::{classify_features, Season};

/// Everything recommended for one reading.
///
/// `crop` and `season` come from independent mechanisms and are never checked
/// against each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub features: FeatureVector,
    pub crop: CropLabel,
    pub season: Season,
    /// `None` when there is no fertilizer data for `crop`
    pub fertilizers: Option<FertilizerList>,
}

impl Recommendation {
    pub fn has_fertilizers(&self) -> bool {
        self.fertilizers.is_some()
    }
}

/// Runs a reading through the crop classifier, the season rules and the
/// fertilizer table.
///
/// The classifier is injected once and shared read-only, so one `Recommender`
/// can serve any number of threads.
///
/// ```rust,no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::sync::Arc;
/// use cropwise::{FeatureVector, OnnxCropClassifier, Recommender};
///
/// let recommender = Recommender::new(Arc::new(OnnxCropClassifier::load("models/RandomForest.onnx")?));
/// let rec = recommender.recommend(&FeatureVector::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9))?;
/// println!("{} in {}", rec.crop, rec.season);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Recommender {
    classifier: Arc<dyn CropClassifier>,
}

impl Recommender {
    pub fn new(classifier: Arc<dyn CropClassifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &Arc<dyn CropClassifier> {
        &self.classifier
    }

    /// # Errors
    /// - `InferenceFailure` from the classifier; season and fertilizer steps cannot fail
    pub fn recommend(&self, features: &FeatureVector) -> Result<Recommendation, ClassifierError> {
        let crop = self.classifier.predict(features)?;
        let season = classify_features(features);
        let fertilizers = recommend_fertilizers(crop.as_str());

        if !crop.is_known() {
            warn!("Classifier returned '{}', which is not a known crop", crop);
        }
        debug!(
            "Recommendation: crop={}, season={}, fertilizers={}",
            crop,
            season,
            fertilizers.map_or(0, |f| f.len())
        );

        Ok(Recommendation {
            features: *features,
            crop,
            season,
            fertilizers,
        })
    }
}
