//! Configuration management

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::errors::{Result, TranslationError};
use crate::core::models::TranslationDirection;

/// Prefix for environment overrides, e.g. `MINI_TRANSLATOR_NUM_BEAMS=2`
pub const ENV_PREFIX: &str = "MINI_TRANSLATOR";

/// Base name of the optional config file looked up in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "mini-translator";

/// Device the models are placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSetting {
    /// CUDA when available, CPU otherwise
    Auto,
    Cpu,
    Cuda,
}

impl std::str::FromStr for DeviceSetting {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(DeviceSetting::Auto),
            "cpu" => Ok(DeviceSetting::Cpu),
            "cuda" | "gpu" => Ok(DeviceSetting::Cuda),
            other => Err(TranslationError::ConfigError {
                message: format!("unknown device '{}', expected auto, cpu or cuda", other),
            }),
        }
    }
}

/// Configuration for translator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Hugging Face id of the English → Hindi model
    pub en_hi_model: String,
    /// Hugging Face id of the Hindi → English model
    pub hi_en_model: String,
    /// Directory holding pre-converted models (`<dir>/<model name>/rust_model.ot`, ...).
    /// When unset, weights are downloaded into the rust-bert cache.
    #[serde(default)]
    pub model_dir: Option<PathBuf>,
    pub device: DeviceSetting,
    /// Upper bound on generated sequence length
    pub max_length: i64,
    pub num_beams: i64,
    pub early_stopping: bool,
    pub samples_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            en_hi_model: "Helsinki-NLP/opus-mt-en-hi".to_string(),
            hi_en_model: "Helsinki-NLP/opus-mt-hi-en".to_string(),
            model_dir: None,
            device: DeviceSetting::Auto,
            max_length: 128,
            num_beams: 4,
            early_stopping: true,
            samples_path: PathBuf::from("data/data.csv"),
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

impl TranslatorConfig {
    /// Load configuration: defaults, then the optional config file, then
    /// `MINI_TRANSLATOR_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        builder = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                builder.add_source(File::from(path))
            }
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        let config: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.en_hi_model.trim().is_empty() || self.hi_en_model.trim().is_empty() {
            return Err(TranslationError::ConfigError {
                message: "model identifiers must not be empty".to_string(),
            });
        }

        if self.max_length <= 0 {
            return Err(TranslationError::ConfigError {
                message: "max_length must be greater than 0".to_string(),
            });
        }

        if self.num_beams <= 0 {
            return Err(TranslationError::ConfigError {
                message: "num_beams must be greater than 0".to_string(),
            });
        }

        if self.host.trim().is_empty() {
            return Err(TranslationError::ConfigError {
                message: "host is required".to_string(),
            });
        }

        Ok(())
    }

    /// Model identifier bound to a direction
    pub fn model_id(&self, direction: TranslationDirection) -> &str {
        match direction {
            TranslationDirection::EnToHi => &self.en_hi_model,
            TranslationDirection::HiToEn => &self.hi_en_model,
        }
    }
}
