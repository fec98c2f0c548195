//! Application settings loaded from `config.toml` in the app directory.
//!
//! The file is optional and never written by the app; every key falls back
//! to a default.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::app_dirs;
use crate::ml::Algorithm;
use crate::ml::logreg::TrainOptions;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Public copy of the classic Iris CSV.
pub const DEFAULT_DATASET_URL: &str = "https://gist.githubusercontent.com/curran/a08a1080b88344b0c8a7/raw/0e7a9b0a5d22642a06d3d5b9bcbad9890c8ee534/iris.csv";
/// Upper bound on the dataset download size.
pub const DEFAULT_MAX_DATASET_BYTES: usize = 1024 * 1024;
const MIN_DATASET_BYTES: usize = 1024;

/// Errors that may occur while loading app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The app directory could not be resolved.
    #[error("Config directory unavailable: {0}")]
    AppDir(#[from] app_dirs::AppDirError),
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse the TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// The dataset URL is not an absolute http(s) URL.
    #[error("Invalid dataset url {url:?}: {reason}")]
    InvalidUrl {
        /// Configured value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub model: ModelSettings,
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_url")]
    pub url: String,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            url: default_dataset_url(),
            max_bytes: DEFAULT_MAX_DATASET_BYTES,
        }
    }
}

/// Model choices offered by the UI and classifier training options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelSettings {
    /// Show the algorithm radio and train the classifier alongside the regressor.
    #[serde(default = "default_true")]
    pub offer_classifier: bool,
    #[serde(default)]
    pub default_algorithm: Algorithm,
    #[serde(default)]
    pub logistic: TrainOptions,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            offer_classifier: true,
            default_algorithm: Algorithm::default(),
            logistic: TrainOptions::default(),
        }
    }
}

impl AppSettings {
    /// Clamp out-of-range numeric settings to usable values.
    pub fn normalized(mut self) -> Self {
        self.dataset.max_bytes = self.dataset.max_bytes.max(MIN_DATASET_BYTES);
        self.model.logistic = self.model.logistic.normalized();
        if !self.model.offer_classifier {
            self.model.default_algorithm = Algorithm::LinearRegression;
        }
        self
    }

    /// Reject settings that would make the dataset fetch meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: self.dataset.url.clone(),
            reason,
        };
        let parsed = url::Url::parse(&self.dataset.url).map_err(|err| invalid(err.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }
}

/// Resolve the configuration file path inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load settings from the app directory, returning defaults if the file is missing.
///
/// An unusable app directory also yields defaults, since the file is optional.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let path = match config_path() {
        Ok(path) => path,
        Err(ConfigError::AppDir(err)) => {
            tracing::warn!("Using default settings: {err}");
            return Ok(AppSettings::default());
        }
        Err(err) => return Err(err),
    };
    let settings = load_from(&path)?;
    tracing::debug!(path = %path.display(), ?settings, "Settings loaded");
    Ok(settings)
}

/// Load settings from a specific file, returning defaults if it does not exist.
pub fn load_from(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = toml::from_str::<AppSettings>(&text)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?
        .normalized();
    settings.validate()?;
    Ok(settings)
}

fn default_dataset_url() -> String {
    DEFAULT_DATASET_URL.to_string()
}

fn default_max_bytes() -> usize {
    DEFAULT_MAX_DATASET_BYTES
}

fn default_true() -> bool {
    true
}
