use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use cropwise::model_manager::sha256_hex;
use cropwise::{
    ClassifierError, Crop, CropClassifier, CropClassifierBuilder, FeatureVector, OnnxCropClassifier, Recommender,
    Season,
};

fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join("cropwise-classifier-test");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Tiny ONNX graphs built by `tests/fixtures/make_fixtures.py`.
///
/// Each one returns the argmax column of the reading, so the expected class is
/// whichever measurement is largest.
fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn test_missing_model_fails_at_startup() {
    let result = OnnxCropClassifier::load("/nonexistent/models/RandomForest.onnx");
    match result {
        Err(ClassifierError::LoadFailure(msg)) => assert!(msg.contains("not found")),
        other => panic!("expected LoadFailure, got {:?}", other.map(|c| c.info())),
    }
}

#[test]
fn test_corrupt_model_fails_at_startup() {
    let path = scratch_file("corrupt.onnx", b"corrupted data");
    let result = OnnxCropClassifier::load(&path);
    assert!(matches!(result, Err(ClassifierError::LoadFailure(_))));
}

#[test]
fn test_checksum_mismatch_fails_at_startup() {
    let path = scratch_file("checksum.onnx", b"not the model you are looking for");
    let wrong = sha256_hex(b"something else");

    let result = CropClassifierBuilder::new().with_verified_model_file(&path, &wrong);
    match result {
        Err(e) => {
            assert!(e.is_fatal());
            assert!(e.to_string().contains("Checksum mismatch"));
        }
        Ok(_) => panic!("checksum mismatch was accepted"),
    }
}

#[test]
fn test_no_silent_default_classifier() {
    assert!(matches!(
        CropClassifierBuilder::new().build(),
        Err(ClassifierError::BuildError(_))
    ));
}

#[test]
fn test_int64_label_output_uses_class_order() -> Result<(), Box<dyn std::error::Error>> {
    let classifier = OnnxCropClassifier::load(fixture("argmax_int64.onnx"))?;

    let info = classifier.info();
    assert_eq!(info.input_name, "float_input");
    assert_eq!(info.label_output, "output_label");
    assert_eq!(info.class_labels, Crop::model_class_order());

    // N is the largest value: column 0
    let label = classifier.predict(&FeatureVector::new(150.0, 25.0, 35.0, 32.0, 75.0, 6.5, 100.0))?;
    assert_eq!(label.as_str(), "apple");

    // humidity: column 4
    let label = classifier.predict(&FeatureVector::new(10.0, 10.0, 10.0, 20.0, 82.0, 6.5, 50.0))?;
    assert_eq!(label.as_str(), "coconut");

    // rainfall: column 6
    let label = classifier.predict(&FeatureVector::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9))?;
    assert_eq!(label.crop(), Some(Crop::Cotton));
    assert_eq!(label.as_str(), Crop::model_class_order()[6]);
    Ok(())
}

#[test]
fn test_string_label_output_is_preferred() -> Result<(), Box<dyn std::error::Error>> {
    // This graph exposes the raw index first and the string label second.
    let classifier = OnnxCropClassifier::load(fixture("argmax_string.onnx"))?;
    assert_eq!(classifier.info().label_output, "output_label");

    let label = classifier.predict(&FeatureVector::new(150.0, 25.0, 35.0, 32.0, 75.0, 6.5, 100.0))?;
    assert_eq!(label.as_str(), "rice");

    let label = classifier.predict(&FeatureVector::new(10.0, 5.0, 5.0, 35.0, 20.0, 6.5, 30.0))?;
    assert_eq!(label.as_str(), "kidneybeans");

    let label = classifier.predict(&FeatureVector::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9))?;
    assert_eq!(label.crop(), Some(Crop::MungBean));
    Ok(())
}

#[test]
fn test_predictions_are_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    let features = FeatureVector::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9);
    for name in ["argmax_int64.onnx", "argmax_string.onnx"] {
        let classifier = OnnxCropClassifier::load(fixture(name))?;
        let first = classifier.predict(&features)?;
        let second = classifier.predict(&features)?;
        assert_eq!(first, second, "{} changed its answer", name);
        assert!(first.is_known(), "unexpected label {}", first);
    }
    Ok(())
}

#[test]
fn test_class_index_outside_labels_is_an_inference_failure() -> Result<(), Box<dyn std::error::Error>> {
    let classifier = CropClassifierBuilder::new()
        .with_model_file(fixture("argmax_int64.onnx"))?
        .with_class_labels(vec!["apple", "banana", "blackgram"])?
        .build()?;

    let label = classifier.predict(&FeatureVector::new(0.0, 5.0, 1.0, 2.0, 3.0, 4.0, 1.0))?;
    assert_eq!(label.as_str(), "banana");

    match classifier.predict(&FeatureVector::new(90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9)) {
        Err(ClassifierError::InferenceFailure(msg)) => {
            assert!(msg.contains("Class index 6"), "unexpected message: {}", msg)
        }
        other => panic!("expected InferenceFailure, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_non_finite_features_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let classifier = OnnxCropClassifier::load(fixture("argmax_int64.onnx"))?;
    for features in [
        FeatureVector::new(90.0, 42.0, 43.0, f64::INFINITY, 82.0, 6.5, 202.9),
        FeatureVector::new(f64::NAN, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9),
    ] {
        assert!(matches!(
            classifier.predict(&features),
            Err(ClassifierError::InferenceFailure(_))
        ));
    }
    Ok(())
}

#[test]
fn test_model_with_two_inputs_is_rejected() {
    match OnnxCropClassifier::load(fixture("two_inputs.onnx")) {
        Err(ClassifierError::LoadFailure(msg)) => assert!(msg.contains("exactly 1 input"), "{}", msg),
        other => panic!("expected LoadFailure, got {:?}", other.map(|c| c.info())),
    }
}

#[test]
fn test_verified_fixture_loads() -> Result<(), Box<dyn std::error::Error>> {
    let path = fixture("argmax_int64.onnx");
    let hash = sha256_hex(&fs::read(&path)?).to_uppercase();
    let classifier = CropClassifierBuilder::new()
        .with_verified_model_file(&path, &hash)?
        .build()?;
    assert_eq!(classifier.info().model_path, path.to_string_lossy());
    Ok(())
}

#[test]
fn test_recommender_shares_loaded_model_across_threads() -> Result<(), Box<dyn std::error::Error>> {
    let classifier = Arc::new(OnnxCropClassifier::load(fixture("argmax_int64.onnx"))?);
    let recommender = Recommender::new(classifier);

    let mut handles = vec![];
    for i in 0..3 {
        let recommender = recommender.clone();
        handles.push(thread::spawn(move || {
            let features = FeatureVector::new(120.0, 25.0, 35.0, 32.0 + i as f64, 75.0, 6.5, 250.0);
            recommender.recommend(&features)
        }));
    }

    for handle in handles {
        let rec = handle.join().unwrap()?;
        assert_eq!(rec.crop.crop(), Some(Crop::Cotton));
        assert_eq!(rec.season, Season::Monsoon);
        assert_eq!(rec.fertilizers, Some(Crop::Cotton.fertilizers()));
    }
    Ok(())
}
