//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Pretrained model or tokenizer could not be fetched or loaded
    #[error("Model unavailable: {model} - {message}")]
    ModelUnavailable {
        model: String,
        message: String,
    },

    /// Direction string did not name one of the supported pairs
    #[error("Invalid translation direction: '{value}' (expected en-hi or hi-en)")]
    InvalidDirection {
        value: String,
    },

    /// Request body could not be parsed
    #[error("Invalid request: {message}")]
    InvalidRequest {
        message: String,
    },

    /// Nothing to translate
    #[error("Input text is empty")]
    EmptyInput,

    /// The model produced no text for a non-empty input
    #[error("Translation is empty. Try a different sentence.")]
    EmptyTranslation,

    /// Inference failed after the model was loaded
    #[error("Generation error: {message}")]
    Generation {
        message: String,
    },

    /// Sample data could not be read or did not validate
    #[error("Sample data error: {path} - {message}")]
    SampleData {
        path: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Wrapper for anyhow errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TranslationError {
    /// Short machine-readable code, used by the HTTP layer
    pub fn code(&self) -> &'static str {
        match self {
            TranslationError::ModelUnavailable { .. } => "model_unavailable",
            TranslationError::InvalidDirection { .. } => "invalid_direction",
            TranslationError::InvalidRequest { .. } => "invalid_request",
            TranslationError::EmptyInput => "empty_input",
            TranslationError::EmptyTranslation => "empty_translation",
            TranslationError::Generation { .. } => "generation_error",
            TranslationError::SampleData { .. } => "sample_data_error",
            TranslationError::ConfigError { .. } => "config_error",
            _ => "internal_error",
        }
    }

    /// True for errors caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TranslationError::InvalidDirection { .. }
                | TranslationError::InvalidRequest { .. }
                | TranslationError::EmptyInput
        )
    }
}

impl From<anyhow::Error> for TranslationError {
    fn from(err: anyhow::Error) -> Self {
        TranslationError::InternalError(err.to_string())
    }
}

impl From<config::ConfigError> for TranslationError {
    fn from(err: config::ConfigError) -> Self {
        TranslationError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
