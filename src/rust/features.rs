use std::ops::RangeInclusive;

use log::warn;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierError;

/// Number of measurements the crop model was fit on
pub const FEATURE_COUNT: usize = 7;

/// Feature names in model column order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// Bounds of the input surface, in model column order
pub const INPUT_RANGES: [RangeInclusive<f64>; FEATURE_COUNT] = [
    0.0..=200.0, // N (kg/ha)
    0.0..=200.0, // P (kg/ha)
    0.0..=200.0, // K (kg/ha)
    0.0..=40.0,  // temperature (°C)
    0.0..=100.0, // relative humidity (%)
    0.0..=14.0,  // soil pH
    0.0..=500.0, // rainfall (mm)
];

/// One soil and climate reading: `(N, P, K, temperature, humidity, ph, rainfall)`.
///
/// The order matches the columns the trained classifier was fit on and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "N")]
    nitrogen: f64,
    #[serde(rename = "P")]
    phosphorus: f64,
    #[serde(rename = "K")]
    potassium: f64,
    temperature: f64,
    humidity: f64,
    ph: f64,
    rainfall: f64,
}

impl FeatureVector {
    pub fn new(
        nitrogen: f64,
        phosphorus: f64,
        potassium: f64,
        temperature: f64,
        humidity: f64,
        ph: f64,
        rainfall: f64,
    ) -> Self {
        Self {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    /// Builds a vector from raw values in model column order.
    ///
    /// # Errors
    /// - `InferenceFailure` if `values` does not hold exactly seven elements
    pub fn try_from_slice(values: &[f64]) -> Result<Self, ClassifierError> {
        match *values {
            [n, p, k, temperature, humidity, ph, rainfall] => {
                Ok(Self::new(n, p, k, temperature, humidity, ph, rainfall))
            }
            _ => Err(ClassifierError::InferenceFailure(format!(
                "Feature vector must have exactly {} values, got {}",
                FEATURE_COUNT,
                values.len()
            ))),
        }
    }

    pub fn nitrogen(&self) -> f64 {
        self.nitrogen
    }

    pub fn phosphorus(&self) -> f64 {
        self.phosphorus
    }

    pub fn potassium(&self) -> f64 {
        self.potassium
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn ph(&self) -> f64 {
        self.ph
    }

    pub fn rainfall(&self) -> f64 {
        self.rainfall
    }

    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    /// The `[1, 7]` float matrix fed to the model.
    ///
    /// The model takes `float32`; this is the only place measurements are narrowed.
    pub fn to_input_array(&self) -> Array2<f32> {
        let values = self.as_array();
        Array2::from_shape_fn((1, FEATURE_COUNT), |(_, col)| values[col] as f32)
    }

    /// Rejects NaN and infinite measurements.
    pub fn validate(&self) -> Result<(), ClassifierError> {
        let bad: Vec<&str> = FEATURE_NAMES
            .iter()
            .zip(self.as_array())
            .filter(|(_, value)| !value.is_finite())
            .map(|(name, _)| *name)
            .collect();

        if bad.is_empty() {
            Ok(())
        } else {
            Err(ClassifierError::InferenceFailure(format!(
                "Non-numeric feature values: {}",
                bad.join(", ")
            )))
        }
    }

    /// Names of the measurements that fall outside the input surface bounds
    pub fn out_of_range(&self) -> Vec<&'static str> {
        FEATURE_NAMES
            .iter()
            .zip(INPUT_RANGES.iter())
            .zip(self.as_array())
            .filter(|((_, range), value)| !range.contains(value))
            .map(|((name, _), _)| *name)
            .collect()
    }

    /// A copy with every measurement pulled into its input surface bounds.
    ///
    /// NaN is left untouched so that `validate` still reports it.
    pub fn clamped(&self) -> Self {
        let mut values = self.as_array();
        for (value, range) in values.iter_mut().zip(INPUT_RANGES.iter()) {
            *value = value.clamp(*range.start(), *range.end());
        }
        let [n, p, k, temperature, humidity, ph, rainfall] = values;
        Self::new(n, p, k, temperature, humidity, ph, rainfall)
    }

    /// Like [`clamped`](Self::clamped), logging a warning that names every
    /// measurement that had to be pulled in.
    pub fn clamped_with_warning(&self) -> Self {
        let out_of_range = self.out_of_range();
        if out_of_range.is_empty() {
            return *self;
        }
        warn!("Clamping out-of-range inputs: {}", out_of_range.join(", "));
        self.clamped()
    }
}
