//! Tokenize-generate-decode translation over the cached model pair

use std::time::Instant;
use tracing::{debug, info, warn};

use crate::core::backend::ModelLoader;
use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::marian::MarianLoader;
use crate::core::model_cache::ModelCache;
use crate::core::models::{TranslationDirection, TranslationRequest, TranslationResult};

/// English ↔ Hindi translator.
///
/// Inference is blocking; async callers should run it on a blocking thread.
pub struct Translator {
    models: ModelCache,
}

impl Translator {
    /// Create a translator backed by rust-bert Marian models
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_loader(MarianLoader::new(config)))
    }

    /// Create a translator over any model loader
    pub fn with_loader(loader: impl ModelLoader + 'static) -> Self {
        Self {
            models: ModelCache::new(loader),
        }
    }

    /// Translate `text` in the given direction.
    ///
    /// Whitespace-only input is rejected. The decoded output is trimmed and
    /// is never empty on success.
    pub fn translate(&self, text: &str, direction: TranslationDirection) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TranslationError::EmptyInput);
        }

        debug!("Translating {} chars ({})", text.chars().count(), direction);

        let output = self
            .models
            .with_model(direction, |model| model.generate(text))?;
        let output = output.trim();

        if output.is_empty() {
            warn!("Model returned an empty translation for {}", direction);
            return Err(TranslationError::EmptyTranslation);
        }

        Ok(output.to_string())
    }

    /// Translate a request, recording timing and the model used
    pub fn translate_request(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let start = Instant::now();
        let translation = self.translate(&request.text, request.direction)?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        debug!("Translated in {} ms", elapsed_ms);

        Ok(TranslationResult {
            translation,
            direction: request.direction,
            model_used: self.models.model_id(request.direction),
            elapsed_ms,
            translated_at: chrono::Utc::now(),
        })
    }

    /// Load both models up front
    pub fn preload(&self) -> Result<()> {
        for direction in TranslationDirection::ALL {
            let start = Instant::now();
            self.models.get(direction)?;
            info!("{} ready in {:?}", direction, start.elapsed());
        }
        Ok(())
    }

    /// Directions whose models are already loaded
    pub fn loaded_directions(&self) -> Vec<TranslationDirection> {
        self.models.loaded()
    }

    /// Model identifier bound to a direction
    pub fn model_id(&self, direction: TranslationDirection) -> String {
        self.models.model_id(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::Seq2SeqModel;

    /// Returns a fixed string per direction
    struct Canned {
        output: &'static str,
    }

    impl Seq2SeqModel for Canned {
        fn generate(&self, _text: &str) -> Result<String> {
            Ok(self.output.to_string())
        }
    }

    struct CannedLoader;

    impl ModelLoader for CannedLoader {
        fn model_id(&self, direction: TranslationDirection) -> String {
            format!("canned/{}", direction)
        }

        fn load(&self, direction: TranslationDirection) -> Result<Box<dyn Seq2SeqModel>> {
            let output = match direction {
                TranslationDirection::EnToHi => " नमस्ते, आप कैसे हैं? ",
                TranslationDirection::HiToEn => "   ",
            };
            Ok(Box::new(Canned { output }))
        }
    }

    #[test]
    fn test_translate_trims_output() {
        let translator = Translator::with_loader(CannedLoader);
        let out = translator
            .translate("Hello, how are you?", TranslationDirection::EnToHi)
            .unwrap();
        assert_eq!(out, "नमस्ते, आप कैसे हैं?");
    }

    #[test]
    fn test_empty_input_is_rejected_before_loading() {
        let translator = Translator::with_loader(CannedLoader);
        assert!(matches!(
            translator.translate("  \n", TranslationDirection::EnToHi),
            Err(TranslationError::EmptyInput)
        ));
        assert!(translator.loaded_directions().is_empty());
    }

    #[test]
    fn test_empty_output_is_an_error() {
        let translator = Translator::with_loader(CannedLoader);
        assert!(matches!(
            translator.translate("नमस्ते", TranslationDirection::HiToEn),
            Err(TranslationError::EmptyTranslation)
        ));
    }

    #[test]
    fn test_translate_request_metadata() {
        let translator = Translator::with_loader(CannedLoader);
        let request = TranslationRequest::new("Hello", TranslationDirection::EnToHi);
        let result = translator.translate_request(&request).unwrap();

        assert_eq!(result.direction, TranslationDirection::EnToHi);
        assert_eq!(result.model_used, "canned/en-hi");
        assert!(result.is_script_plausible());
    }

    #[test]
    fn test_preload_loads_both_directions() {
        let translator = Translator::with_loader(CannedLoader);
        translator.preload().unwrap();
        assert_eq!(translator.loaded_directions(), TranslationDirection::ALL.to_vec());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = TranslatorConfig {
            num_beams: 0,
            ..Default::default()
        };
        assert!(matches!(
            Translator::new(config),
            Err(TranslationError::ConfigError { .. })
        ));
    }
}
