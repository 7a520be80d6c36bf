use crate::crops::Crop;

/// Ordered fertilizer products recommended for one crop
pub type FertilizerList = &'static [&'static str];

const NPK_15_15_15: FertilizerList = &["NPK 15-15-15", "Urea", "Potassium sulfate"];
const NPK_20_10_10: FertilizerList = &["NPK 20-10-10", "Urea", "Ammonium nitrate"];
const NPK_10_20_10: FertilizerList = &["NPK 10-20-10", "Urea", "Superphosphate"];
const NPK_10_10_10: FertilizerList = &["NPK 10-10-10", "Urea", "DAP"];

impl Crop {
    pub fn fertilizers(&self) -> FertilizerList {
        match self {
            Crop::Rice
            | Crop::PigeonPeas
            | Crop::Lentil
            | Crop::Grapes
            | Crop::Orange
            | Crop::Jute => NPK_15_15_15,
            Crop::Maize
            | Crop::MothBeans
            | Crop::Pomegranate
            | Crop::Watermelon
            | Crop::Papaya
            | Crop::Coffee => NPK_20_10_10,
            Crop::Chickpea
            | Crop::MungBean
            | Crop::Banana
            | Crop::Muskmelon
            | Crop::Coconut => NPK_10_20_10,
            Crop::KidneyBeans
            | Crop::BlackGram
            | Crop::Mango
            | Crop::Apple
            | Crop::Cotton => NPK_10_10_10,
        }
    }
}

/// Looks up fertilizers for a crop label, ignoring case.
///
/// `None` means there is no recommendation for that label; it is not an error.
pub fn recommend_fertilizers(crop: &str) -> Option<FertilizerList> {
    Crop::from_label(crop).map(|crop| crop.fertilizers())
}
