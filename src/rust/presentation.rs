//! Text rendering of a [`Recommendation`] for the command line.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::crops::CropLabel;
use crate::pipeline::Recommendation;

/// Image file name for a known crop, e.g. `rice.jpeg`
pub fn crop_image_file(crop: &CropLabel) -> Option<String> {
    crop.crop().map(|c| format!("{}.jpeg", c.as_str()))
}

/// Path of the crop's image under `image_dir`, only if the file is there
pub fn crop_image_path(image_dir: &Path, crop: &CropLabel) -> Option<PathBuf> {
    crop_image_file(crop)
        .map(|file| image_dir.join(file))
        .filter(|path| path.is_file())
}

pub fn render_report(rec: &Recommendation, image_dir: Option<&Path>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "The predicted crop is: {}", rec.crop);
    if rec.season.is_uncertain() {
        let _ = writeln!(
            out,
            "Suggested season for planting: {} (conditions do not match a specific season)",
            rec.season
        );
    } else {
        let _ = writeln!(out, "Suggested season for planting: {}", rec.season);
    }

    match rec.fertilizers {
        Some(list) => {
            let _ = writeln!(out, "Recommended Fertilizers:");
            for fertilizer in list {
                let _ = writeln!(out, "- {}", fertilizer);
            }
        }
        None => {
            let _ = writeln!(out, "No fertilizer recommendations available for the predicted crop.");
        }
    }

    if let Some(dir) = image_dir {
        match crop_image_path(dir, &rec.crop) {
            Some(path) => {
                let _ = writeln!(out, "Crop image: {}", path.display());
            }
            None => {
                let _ = writeln!(out, "No image available for the predicted crop.");
            }
        }
    }

    out
}
