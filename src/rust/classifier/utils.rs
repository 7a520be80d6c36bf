use std::collections::HashSet;

use ort::value::DynValue;

use super::error::ClassifierError;

/// Reads the predicted label out of the model's label tensor.
///
/// Converters emit either the class names themselves (string tensor) or the
/// class index (`i64` tensor) depending on how the model was trained and exported.
pub(crate) fn decode_label(output: &DynValue, class_labels: &[String]) -> Result<String, ClassifierError> {
    let string_attempt = match output.try_extract_string_tensor() {
        Ok(labels) => {
            return labels.iter().next().cloned().ok_or_else(|| {
                ClassifierError::InferenceFailure("Model returned an empty label tensor".into())
            })
        }
        Err(e) => e,
    };

    let indices = output.try_extract_tensor::<i64>().map_err(|e| {
        ClassifierError::InferenceFailure(format!(
            "Label output is neither a string nor an int64 tensor ({}; {})",
            string_attempt, e
        ))
    })?;
    let index = indices.iter().next().copied().ok_or_else(|| {
        ClassifierError::InferenceFailure("Model returned an empty label tensor".into())
    })?;

    label_for_index(index, class_labels)
}

pub(crate) fn label_for_index(index: i64, class_labels: &[String]) -> Result<String, ClassifierError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| class_labels.get(i))
        .cloned()
        .ok_or_else(|| {
            ClassifierError::InferenceFailure(format!(
                "Class index {} is outside the {} known labels",
                index,
                class_labels.len()
            ))
        })
}

/// Class labels must be non-empty, non-blank and unique.
pub(crate) fn validate_class_labels(labels: &[String]) -> Result<(), ClassifierError> {
    if labels.is_empty() {
        return Err(ClassifierError::ValidationError("Class label list cannot be empty".into()));
    }
    if let Some(pos) = labels.iter().position(|l| l.trim().is_empty()) {
        return Err(ClassifierError::ValidationError(format!(
            "Class label {} cannot be empty",
            pos + 1
        )));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = labels.iter().find(|l| !seen.insert(l.as_str())) {
        return Err(ClassifierError::ValidationError(format!(
            "Duplicate class label '{}'",
            dup
        )));
    }
    Ok(())
}
