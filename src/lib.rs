//! Mini Language Translator - English ↔ Hindi translation with pretrained MarianMT models
//!
//! Tokenization, beam search and inference are delegated to rust-bert. This
//! library selects the model pair per direction, memoizes loaded models and
//! serves the pipeline through a small web app and CLI.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    backend::{ModelLoader, Seq2SeqModel},
    config::{DeviceSetting, TranslatorConfig},
    errors::{Result, TranslationError},
    models::{SamplePair, TranslationDirection, TranslationRequest, TranslationResult},
    samples::SampleSet,
    translator::Translator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
