//! Smoke tests against the real Helsinki-NLP models. They download weights
//! on first run, so they only run with `--features all-tests`.

use mini_translator::core::script::{dominant_script, Script};
use mini_translator::{TranslationDirection, TranslationRequest, Translator, TranslatorConfig};

fn translator() -> Translator {
    Translator::new(TranslatorConfig::default()).unwrap()
}

#[test]
#[cfg_attr(not(feature = "all-tests"), ignore)]
fn test_translate_en_to_hi_non_empty() -> anyhow::Result<()> {
    let out = translator().translate("Hello, how are you?", TranslationDirection::EnToHi)?;

    assert!(!out.trim().is_empty());
    assert_eq!(dominant_script(&out), Some(Script::Devanagari), "{}", out);
    Ok(())
}

#[test]
#[cfg_attr(not(feature = "all-tests"), ignore)]
fn test_translate_hi_to_en_non_empty() -> anyhow::Result<()> {
    let out = translator().translate("नमस्ते", TranslationDirection::HiToEn)?;

    assert!(!out.trim().is_empty());
    assert_eq!(dominant_script(&out), Some(Script::Latin), "{}", out);
    Ok(())
}

#[test]
#[cfg_attr(not(feature = "all-tests"), ignore)]
fn test_translate_request_both_directions() -> anyhow::Result<()> {
    let translator = translator();
    translator.preload()?;

    for (text, direction) in [
        ("The weather is nice today.", TranslationDirection::EnToHi),
        ("नमस्ते, आप कैसे हैं?", TranslationDirection::HiToEn),
    ] {
        let result = translator.translate_request(&TranslationRequest::new(text, direction))?;
        assert!(!result.translation.is_empty());
        assert!(result.is_script_plausible(), "{}", result.translation);
    }

    assert_eq!(translator.loaded_directions().len(), 2);
    Ok(())
}
