//! MarianMT models served through rust-bert

use std::path::{Path, PathBuf};

use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::translation::{Language, TranslationConfig, TranslationModel};
use rust_bert::resources::{LocalResource, RemoteResource, ResourceProvider};
use tch::Device;
use tracing::{debug, info};

use crate::core::backend::{ModelLoader, Seq2SeqModel};
use crate::core::config::{DeviceSetting, TranslatorConfig};
use crate::core::errors::{Result, TranslationError};
use crate::core::models::TranslationDirection;

/// Files making up a rust-bert Marian model: (cache name, file name)
const MARIAN_FILES: [(&str, &str); 4] = [
    ("model", "rust_model.ot"),
    ("config", "config.json"),
    ("vocab", "vocab.json"),
    ("spiece", "source.spm"),
];

fn language(code: &str) -> Language {
    match code {
        "hi" => Language::Hindi,
        _ => Language::English,
    }
}

impl From<DeviceSetting> for Device {
    fn from(setting: DeviceSetting) -> Self {
        match setting {
            DeviceSetting::Auto => Device::cuda_if_available(),
            DeviceSetting::Cpu => Device::Cpu,
            DeviceSetting::Cuda => Device::Cuda(0),
        }
    }
}

/// Last path segment of a hub id, e.g. `opus-mt-en-hi`
fn model_name(model_id: &str) -> &str {
    model_id.rsplit('/').next().unwrap_or(model_id)
}

/// Remote resources for a hub model, cached under `<name>/<kind>`
fn remote_resources(model_id: &str) -> [RemoteResource; 4] {
    let name = model_name(model_id);
    MARIAN_FILES.map(|(kind, file)| {
        let cache_subdir = format!("{}/{}", name, kind);
        let url = format!("https://huggingface.co/{}/resolve/main/{}", model_id, file);
        RemoteResource::from_pretrained((cache_subdir.as_str(), url.as_str()))
    })
}

/// Local resources for a pre-converted model stored under `model_dir/<name>`
fn local_resources(model_dir: &Path, model_id: &str) -> [LocalResource; 4] {
    let root = model_dir.join(model_name(model_id));
    MARIAN_FILES.map(|(_, file)| LocalResource {
        local_path: root.join(file),
    })
}

/// Builds rust-bert translation models from a [`TranslatorConfig`]
#[derive(Debug, Clone)]
pub struct MarianLoader {
    config: TranslatorConfig,
}

impl MarianLoader {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    fn translation_config<R>(
        &self,
        resources: [R; 4],
        direction: TranslationDirection,
    ) -> TranslationConfig
    where
        R: ResourceProvider + Send + 'static,
    {
        let [model, config, vocab, spiece] = resources;
        let mut translation_config = TranslationConfig::new(
            ModelType::Marian,
            ModelResource::Torch(Box::new(model)),
            config,
            vocab,
            Some(spiece),
            [language(direction.source_lang())],
            [language(direction.target_lang())],
            Device::from(self.config.device),
        );
        translation_config.max_length = Some(self.config.max_length);
        translation_config.num_beams = self.config.num_beams;
        translation_config.early_stopping = self.config.early_stopping;
        translation_config
    }

    /// Local model files that are missing, if loading from `model_dir`
    fn missing_local_files(&self, model_dir: &Path, model_id: &str) -> Vec<PathBuf> {
        local_resources(model_dir, model_id)
            .into_iter()
            .map(|r| r.local_path)
            .filter(|p| !p.exists())
            .collect()
    }
}

impl ModelLoader for MarianLoader {
    fn model_id(&self, direction: TranslationDirection) -> String {
        self.config.model_id(direction).to_string()
    }

    fn load(&self, direction: TranslationDirection) -> Result<Box<dyn Seq2SeqModel>> {
        let model_id = self.model_id(direction);

        let translation_config = match &self.config.model_dir {
            Some(model_dir) => {
                let missing = self.missing_local_files(model_dir, &model_id);
                if !missing.is_empty() {
                    return Err(TranslationError::ModelUnavailable {
                        model: model_id,
                        message: format!("missing model files: {:?}", missing),
                    });
                }
                debug!("Loading {} from {}", model_id, model_dir.display());
                self.translation_config(local_resources(model_dir, &model_id), direction)
            }
            None => {
                debug!("Loading {} from the Hugging Face hub", model_id);
                self.translation_config(remote_resources(&model_id), direction)
            }
        };

        let model = TranslationModel::new(translation_config).map_err(|e| {
            TranslationError::ModelUnavailable {
                model: model_id.clone(),
                message: e.to_string(),
            }
        })?;

        info!("Loaded model {} for {}", model_id, direction);

        Ok(Box::new(MarianTranslator {
            model,
            source: language(direction.source_lang()),
            target: language(direction.target_lang()),
        }))
    }
}

/// A loaded Marian pipeline for one direction
struct MarianTranslator {
    model: TranslationModel,
    source: Language,
    target: Language,
}

impl Seq2SeqModel for MarianTranslator {
    fn generate(&self, text: &str) -> Result<String> {
        let output = self
            .model
            .translate(&[text], self.source, self.target)
            .map_err(|e| TranslationError::Generation {
                message: e.to_string(),
            })?;

        Ok(output.into_iter().next().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_name() {
        assert_eq!(model_name("Helsinki-NLP/opus-mt-en-hi"), "opus-mt-en-hi");
        assert_eq!(model_name("opus-mt-hi-en"), "opus-mt-hi-en");
    }

    #[test]
    fn test_local_resources_layout() {
        let resources = local_resources(Path::new("/models"), "Helsinki-NLP/opus-mt-hi-en");
        let paths: Vec<PathBuf> = resources.into_iter().map(|r| r.local_path).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/models/opus-mt-hi-en/rust_model.ot"),
                PathBuf::from("/models/opus-mt-hi-en/config.json"),
                PathBuf::from("/models/opus-mt-hi-en/vocab.json"),
                PathBuf::from("/models/opus-mt-hi-en/source.spm"),
            ]
        );
    }

    #[test]
    fn test_remote_resources_point_at_hub() {
        let [model, _, _, spiece] = remote_resources("Helsinki-NLP/opus-mt-en-hi");
        assert_eq!(
            model.url,
            "https://huggingface.co/Helsinki-NLP/opus-mt-en-hi/resolve/main/rust_model.ot"
        );
        assert_eq!(model.cache_subdir, "opus-mt-en-hi/model");
        assert!(spiece.url.ends_with("source.spm"));
    }

    #[test]
    fn test_translation_config_carries_generation_settings() {
        let loader = MarianLoader::new(TranslatorConfig {
            device: DeviceSetting::Cpu,
            ..Default::default()
        });
        let resources = local_resources(Path::new("/models"), "Helsinki-NLP/opus-mt-en-hi");
        let config = loader.translation_config(resources, TranslationDirection::EnToHi);

        assert_eq!(config.max_length, Some(128));
        assert_eq!(config.num_beams, 4);
        assert!(config.early_stopping);
        assert_eq!(config.device, Device::Cpu);
        assert!(config.source_languages.contains(&Language::English));
        assert!(config.target_languages.contains(&Language::Hindi));
    }

    #[test]
    fn test_missing_local_model_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let loader = MarianLoader::new(TranslatorConfig {
            model_dir: Some(dir.path().to_path_buf()),
            device: DeviceSetting::Cpu,
            ..Default::default()
        });

        match loader.load(TranslationDirection::EnToHi) {
            Err(TranslationError::ModelUnavailable { model, .. }) => {
                assert_eq!(model, "Helsinki-NLP/opus-mt-en-hi");
            }
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("load should fail without model files"),
        }
    }
}
