use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use cropwise::presentation::render_report;
use cropwise::{
    CropClassifierBuilder, FeatureVector, ModelInfo, ModelManager, OnnxCropClassifier, Recommender,
    RuntimeConfig, DEFAULT_MODEL_PATH,
};
use log::info;

/// Recommend a crop, a planting season and fertilizers from soil and climate measurements
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the trained ONNX crop model
    #[arg(long, env = "CROPWISE_MODEL", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Expected SHA-256 of the model file; loading fails on mismatch
    #[arg(long, env = "CROPWISE_MODEL_SHA256")]
    sha256: Option<String>,

    /// Class label file (one label per line, in the model's class order)
    #[arg(long, env = "CROPWISE_LABELS")]
    labels: Option<PathBuf>,

    /// Fetch the model into the local model store from this URL instead of using --model
    #[arg(long, requires = "sha256")]
    model_url: Option<String>,

    /// Name of the model in the local model store
    #[arg(long, default_value = "random-forest")]
    model_name: String,

    /// ONNX Runtime threads (0 lets the runtime decide)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Directory of `<crop>.jpeg` images
    #[arg(long, env = "CROPWISE_IMAGE_DIR")]
    image_dir: Option<PathBuf>,

    /// Nitrogen content in soil (kg/ha, 0-200)
    #[arg(short = 'N', long)]
    nitrogen: f64,

    /// Phosphorous content in soil (kg/ha, 0-200)
    #[arg(short = 'P', long)]
    phosphorus: f64,

    /// Potassium content in soil (kg/ha, 0-200)
    #[arg(short = 'K', long)]
    potassium: f64,

    /// Temperature (°C, 0-40)
    #[arg(short, long)]
    temperature: f64,

    /// Relative humidity (%, 0-100)
    #[arg(short = 'H', long)]
    humidity: f64,

    /// Soil pH (0-14)
    #[arg(long)]
    ph: f64,

    /// Rainfall (mm, 0-500)
    #[arg(short, long)]
    rainfall: f64,

    /// Print the recommendation as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    /// The measurements, clamped into the input bounds
    fn features(&self) -> FeatureVector {
        FeatureVector::new(
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        )
        .clamped_with_warning()
    }
}

fn read_labels(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read class labels from {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

async fn resolve_model_path(args: &Args) -> Result<PathBuf> {
    let (Some(url), Some(hash)) = (&args.model_url, &args.sha256) else {
        return Ok(args.model.clone());
    };
    let manager = ModelManager::new_default().context("Failed to create model store")?;
    let info = ModelInfo::new(&args.model_name, url, hash);
    let path = manager
        .ensure_model_downloaded(&info)
        .await
        .with_context(|| format!("Failed to fetch model '{}'", info.name))?;
    Ok(path)
}

fn load_classifier(args: &Args, model_path: &Path) -> Result<OnnxCropClassifier> {
    let mut builder = CropClassifierBuilder::new().with_runtime_config(RuntimeConfig::with_threads(args.threads));
    builder = match &args.sha256 {
        Some(hash) => builder.with_verified_model_file(model_path, hash)?,
        None => builder.with_model_file(model_path)?,
    };
    if let Some(labels) = &args.labels {
        builder = builder.with_class_labels(read_labels(labels)?)?;
    }
    Ok(builder.build()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    cropwise::init_logger();
    let args = Args::parse();

    let start_time = Instant::now();
    let model_path = resolve_model_path(&args).await?;
    let classifier = load_classifier(&args, &model_path)
        .with_context(|| format!("Cannot serve predictions without the model at {}", model_path.display()))?;
    info!("Classifier loaded in {:.2?}", start_time.elapsed());

    let recommender = Recommender::new(Arc::new(classifier));
    let features = args.features();
    let recommendation = recommender.recommend(&features)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        print!("{}", render_report(&recommendation, args.image_dir.as_deref()));
    }

    Ok(())
}
