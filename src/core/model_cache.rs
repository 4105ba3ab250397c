//! Process-wide memoization of loaded models, keyed by direction

use std::sync::{Arc, Mutex};

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::core::backend::{ModelLoader, Seq2SeqModel};
use crate::core::errors::{Result, TranslationError};
use crate::core::models::TranslationDirection;

/// Shared handle to a loaded model. Calls on the same direction serialise.
pub type ModelHandle = Arc<Mutex<Box<dyn Seq2SeqModel>>>;

/// One lazily initialised slot per direction. Nothing is ever evicted.
pub struct ModelCache {
    loader: Box<dyn ModelLoader>,
    slots: [OnceCell<ModelHandle>; 2],
}

impl ModelCache {
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            slots: [OnceCell::new(), OnceCell::new()],
        }
    }

    /// Return the model for `direction`, loading it on first use.
    ///
    /// A failed load leaves the slot empty, so a later call loads again.
    pub fn get(&self, direction: TranslationDirection) -> Result<ModelHandle> {
        let slot = &self.slots[direction.index()];
        if let Some(handle) = slot.get() {
            debug!("Model cache hit for {}", direction);
            return Ok(handle.clone());
        }

        let handle = slot.get_or_try_init(|| {
            info!(
                "Loading model {} (first use of {})",
                self.loader.model_id(direction),
                direction
            );
            self.loader
                .load(direction)
                .map(|model| Arc::new(Mutex::new(model)))
        })?;

        Ok(handle.clone())
    }

    /// Run `f` against the model for `direction`
    pub fn with_model<T>(
        &self,
        direction: TranslationDirection,
        f: impl FnOnce(&dyn Seq2SeqModel) -> Result<T>,
    ) -> Result<T> {
        let handle = self.get(direction)?;
        let model = handle.lock().map_err(|_| {
            TranslationError::InternalError(format!("model lock poisoned for {}", direction))
        })?;
        f(&**model)
    }

    pub fn is_loaded(&self, direction: TranslationDirection) -> bool {
        self.slots[direction.index()].get().is_some()
    }

    /// Directions whose models are resident
    pub fn loaded(&self) -> Vec<TranslationDirection> {
        TranslationDirection::ALL
            .into_iter()
            .filter(|d| self.is_loaded(*d))
            .collect()
    }

    pub fn model_id(&self, direction: TranslationDirection) -> String {
        self.loader.model_id(direction)
    }
}
