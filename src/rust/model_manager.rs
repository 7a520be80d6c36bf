use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::models::{ModelInfo, MODEL_FILE_NAME};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model not downloaded: {0}")]
    NotDownloaded(String),
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Model verification failed")]
    VerificationFailed,
    #[error("Hash mismatch: expected {expected}, got {actual} for {name}")]
    HashMismatch {
        name: String,
        expected: String,
        actual: String,
    },
}

/// Lowercase hex SHA-256 of a byte slice
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Lowercase hex SHA-256 of a file's contents
pub fn file_sha256(path: &Path) -> io::Result<String> {
    Ok(sha256_hex(&fs::read(path)?))
}

/// Local store for trained crop model artifacts
#[derive(Clone)]
pub struct ModelManager {
    models_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

impl ModelManager {
    /// Creates a new ModelManager with the default models directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::get_default_models_dir())
    }

    /// Returns the default models directory path
    pub fn get_default_models_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("CROPWISE_CACHE") {
            return PathBuf::from(path).join("models");
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("cropwise").join("models");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("cropwise").join("models");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("cropwise").join("models")
    }

    pub fn new<P: AsRef<Path>>(models_dir: P) -> io::Result<Self> {
        let models_dir = models_dir.as_ref().to_path_buf();
        fs::create_dir_all(&models_dir)?;
        Ok(Self {
            models_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn get_model_path(&self, name: &str) -> PathBuf {
        self.models_dir.join(name).join(MODEL_FILE_NAME)
    }

    pub fn is_model_downloaded(&self, name: &str) -> bool {
        let model_path = self.get_model_path(name);
        log::debug!("Model path: {:?} (exists: {})", model_path, model_path.exists());
        model_path.exists()
    }

    fn verify_file(&self, path: &Path, expected_hash: &str) -> Result<bool, ModelError> {
        log::info!("Verifying file: {:?}", path);
        let hash = file_sha256(path)?;
        log::debug!("Calculated hash: {}", hash);
        log::debug!("Expected hash:   {}", expected_hash);
        Ok(hash.eq_ignore_ascii_case(expected_hash))
    }

    /// `Ok(false)` when the artifact is absent or its digest does not match.
    pub fn verify_model(&self, info: &ModelInfo) -> Result<bool, ModelError> {
        let model_path = self.get_model_path(&info.name);
        if !model_path.exists() {
            log::info!("Model file {:?} does not exist", model_path);
            return Ok(false);
        }

        let ok = self.verify_file(&model_path, &info.model_hash)?;
        log::info!("Model '{}' hash verification: {}", info.name, ok);
        Ok(ok)
    }

    /// Fetches the artifact, checks its digest, and writes it into the store.
    ///
    /// An existing file that already verifies is kept. Downloads are serialized
    /// per manager so concurrent callers never write the same file twice.
    pub async fn download_model(&self, info: &ModelInfo) -> Result<(), ModelError> {
        let _lock = self.download_lock.lock().await;

        let model_path = self.get_model_path(&info.name);
        if model_path.exists() {
            log::info!("Model file exists at {:?}, verifying...", model_path);
            if self.verify_file(&model_path, &info.model_hash)? {
                log::info!("Existing model file verified successfully");
                return Ok(());
            }
            log::warn!("Model file verification failed, redownloading");
        }

        match self.download_and_verify_file(info, &model_path).await {
            Ok(()) => {
                log::info!("Model '{}' ready to use", info.name);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to set up model '{}': {}", info.name, e);
                // Cleanup on failure
                let _ = self.remove_download(&info.name);
                Err(e)
            }
        }
    }

    async fn download_and_verify_file(&self, info: &ModelInfo, path: &Path) -> Result<(), ModelError> {
        log::info!("Downloading model '{}' from {} to {:?}", info.name, info.model_url, path);
        let response = reqwest::get(&info.model_url).await?.error_for_status()?;
        log::info!("Download response status: {}", response.status());
        let bytes = response.bytes().await?;
        log::info!("Downloaded {} bytes", bytes.len());

        let hash = sha256_hex(&bytes);
        if !hash.eq_ignore_ascii_case(&info.model_hash) {
            log::error!("Model hash mismatch: expected {}, got {}", info.model_hash, hash);
            return Err(ModelError::HashMismatch {
                name: info.name.clone(),
                expected: info.model_hash.clone(),
                actual: hash,
            });
        }

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &bytes)?;

        // Verify after writing
        if !self.verify_file(path, &info.model_hash)? {
            return Err(ModelError::VerificationFailed);
        }

        log::info!("Model '{}' downloaded and verified successfully", info.name);
        Ok(())
    }

    pub fn remove_download(&self, name: &str) -> Result<(), ModelError> {
        let model_path = self.get_model_path(name);
        if model_path.exists() {
            fs::remove_file(&model_path)?;
        }
        Ok(())
    }

    /// Ensures that a model is downloaded and verified.
    /// If the model doesn't exist, it will be downloaded.
    /// If verification fails, it will be re-downloaded.
    pub async fn ensure_model_downloaded(&self, info: &ModelInfo) -> Result<PathBuf, ModelError> {
        if !self.is_model_downloaded(&info.name) {
            log::info!("Model '{}' not found, downloading...", info.name);
            self.download_model(info).await?;
        } else if !self.verify_model(info)? {
            log::info!("Model verification failed, re-downloading...");
            self.remove_download(&info.name)?;
            self.download_model(info).await?;
        } else {
            log::info!("Model '{}' verification successful", info.name);
        }
        Ok(self.get_model_path(&info.name))
    }

    /// Path of a stored model, failing if it has not been downloaded
    pub fn require_model(&self, name: &str) -> Result<PathBuf, ModelError> {
        let path = self.get_model_path(name);
        if path.exists() {
            Ok(path)
        } else {
            Err(ModelError::NotDownloaded(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_models_dir() {
        // Test with environment variable
        env::set_var("CROPWISE_CACHE", "/tmp/test-cropwise-cache");
        let path = ModelManager::get_default_models_dir();
        assert!(path.to_str().unwrap().contains("/tmp/test-cropwise-cache/models"));
        env::remove_var("CROPWISE_CACHE");

        // Test without environment variable
        let path = ModelManager::get_default_models_dir();
        assert!(path.to_str().unwrap().contains("cropwise"));
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
