use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The closed set of crops the classifier was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Crop {
    Rice,
    Maize,
    Chickpea,
    KidneyBeans,
    PigeonPeas,
    MothBeans,
    MungBean,
    BlackGram,
    Lentil,
    Pomegranate,
    Banana,
    Mango,
    Grapes,
    Watermelon,
    Muskmelon,
    Apple,
    Orange,
    Papaya,
    Coconut,
    Cotton,
    Jute,
    Coffee,
}

impl Crop {
    pub const ALL: [Crop; 22] = [
        Crop::Rice,
        Crop::Maize,
        Crop::Chickpea,
        Crop::KidneyBeans,
        Crop::PigeonPeas,
        Crop::MothBeans,
        Crop::MungBean,
        Crop::BlackGram,
        Crop::Lentil,
        Crop::Pomegranate,
        Crop::Banana,
        Crop::Mango,
        Crop::Grapes,
        Crop::Watermelon,
        Crop::Muskmelon,
        Crop::Apple,
        Crop::Orange,
        Crop::Papaya,
        Crop::Coconut,
        Crop::Cotton,
        Crop::Jute,
        Crop::Coffee,
    ];

    /// The label as produced by the classifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Crop::Rice => "rice",
            Crop::Maize => "maize",
            Crop::Chickpea => "chickpea",
            Crop::KidneyBeans => "kidneybeans",
            Crop::PigeonPeas => "pigeonpeas",
            Crop::MothBeans => "mothbeans",
            Crop::MungBean => "mungbean",
            Crop::BlackGram => "blackgram",
            Crop::Lentil => "lentil",
            Crop::Pomegranate => "pomegranate",
            Crop::Banana => "banana",
            Crop::Mango => "mango",
            Crop::Grapes => "grapes",
            Crop::Watermelon => "watermelon",
            Crop::Muskmelon => "muskmelon",
            Crop::Apple => "apple",
            Crop::Orange => "orange",
            Crop::Papaya => "papaya",
            Crop::Coconut => "coconut",
            Crop::Cotton => "cotton",
            Crop::Jute => "jute",
            Crop::Coffee => "coffee",
        }
    }

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn from_label(label: &str) -> Option<Crop> {
        let label = label.trim();
        Crop::ALL
            .iter()
            .copied()
            .find(|crop| crop.as_str().eq_ignore_ascii_case(label))
    }

    /// Labels in the order a classifier fit on string targets numbers its classes (sorted).
    pub fn model_class_order() -> Vec<String> {
        let mut labels: Vec<String> = Crop::ALL.iter().map(|c| c.as_str().to_string()).collect();
        labels.sort();
        labels
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Crop {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Crop::from_label(s).ok_or_else(|| format!("Unknown crop: {}", s))
    }
}

/// The label a classifier returned.
///
/// Usually one of the known [`Crop`]s, but nothing enforces that, so consumers
/// get `None` from [`CropLabel::crop`] rather than an error for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CropLabel(String);

impl CropLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn crop(&self) -> Option<Crop> {
        Crop::from_label(&self.0)
    }

    pub fn is_known(&self) -> bool {
        self.crop().is_some()
    }
}

impl From<Crop> for CropLabel {
    fn from(crop: Crop) -> Self {
        Self(crop.as_str().to_string())
    }
}

impl fmt::Display for CropLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
