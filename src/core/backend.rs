//! Seams between the translator and the pretrained-model library

use crate::core::errors::Result;
use crate::core::models::TranslationDirection;

/// A loaded sequence-to-sequence model bound to one direction.
///
/// Implementations tokenize, generate and decode in one call.
pub trait Seq2SeqModel: Send {
    /// Translate a single non-empty text
    fn generate(&self, text: &str) -> Result<String>;
}

/// Loads the model pair for a direction. Called at most once per successful
/// load by the model cache.
pub trait ModelLoader: Send + Sync {
    /// Identifier of the model that `load` would return for `direction`
    fn model_id(&self, direction: TranslationDirection) -> String;

    fn load(&self, direction: TranslationDirection) -> Result<Box<dyn Seq2SeqModel>>;
}
