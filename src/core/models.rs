//! Core data models for translation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::errors::TranslationError;
use crate::core::script::{dominant_script, Script};

/// Language codes accepted by [`TranslationDirection::from_codes`]
pub const SUPPORTED_LANGS: [&str; 2] = ["en", "hi"];

/// Translation direction, selects which pretrained model pair is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TranslationDirection {
    /// English → Hindi (Helsinki-NLP/opus-mt-en-hi)
    #[serde(rename = "en-hi", alias = "EN_TO_HI", alias = "en_to_hi")]
    EnToHi,
    /// Hindi → English (Helsinki-NLP/opus-mt-hi-en)
    #[serde(rename = "hi-en", alias = "HI_TO_EN", alias = "hi_to_en")]
    HiToEn,
}

impl TranslationDirection {
    /// Both directions, in UI order
    pub const ALL: [TranslationDirection; 2] =
        [TranslationDirection::EnToHi, TranslationDirection::HiToEn];

    /// Build a direction from a (source, target) language-code pair
    pub fn from_codes(source_lang: &str, target_lang: &str) -> Result<Self, TranslationError> {
        let src = normalize_lang(source_lang)?;
        let tgt = normalize_lang(target_lang)?;
        match (src.as_str(), tgt.as_str()) {
            ("en", "hi") => Ok(TranslationDirection::EnToHi),
            ("hi", "en") => Ok(TranslationDirection::HiToEn),
            _ => Err(TranslationError::InvalidDirection {
                value: format!("{}-{} (source and target languages must be different)", src, tgt),
            }),
        }
    }

    /// Pick a direction from the script of the input: Devanagari text is
    /// treated as Hindi, anything else as English.
    pub fn detect(text: &str) -> Self {
        match dominant_script(text) {
            Some(Script::Devanagari) => TranslationDirection::HiToEn,
            _ => TranslationDirection::EnToHi,
        }
    }

    pub fn source_lang(&self) -> &'static str {
        match self {
            TranslationDirection::EnToHi => "en",
            TranslationDirection::HiToEn => "hi",
        }
    }

    pub fn target_lang(&self) -> &'static str {
        match self {
            TranslationDirection::EnToHi => "hi",
            TranslationDirection::HiToEn => "en",
        }
    }

    /// Script a plausible translation is written in
    pub fn target_script(&self) -> Script {
        match self {
            TranslationDirection::EnToHi => Script::Devanagari,
            TranslationDirection::HiToEn => Script::Latin,
        }
    }

    /// Human-readable label shown in the direction selector
    pub fn label(&self) -> &'static str {
        match self {
            TranslationDirection::EnToHi => "English → Hindi",
            TranslationDirection::HiToEn => "Hindi → English",
        }
    }

    /// Prompt shown above the input box
    pub fn prompt(&self) -> &'static str {
        match self {
            TranslationDirection::EnToHi => "Enter English text",
            TranslationDirection::HiToEn => "Enter Hindi text",
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            TranslationDirection::EnToHi => TranslationDirection::HiToEn,
            TranslationDirection::HiToEn => TranslationDirection::EnToHi,
        }
    }

    /// Stable slot index for keyed storage
    pub(crate) fn index(&self) -> usize {
        match self {
            TranslationDirection::EnToHi => 0,
            TranslationDirection::HiToEn => 1,
        }
    }
}

impl fmt::Display for TranslationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source_lang(), self.target_lang())
    }
}

impl FromStr for TranslationDirection {
    type Err = TranslationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value == TranslationDirection::EnToHi.label() {
            return Ok(TranslationDirection::EnToHi);
        }
        if value == TranslationDirection::HiToEn.label() {
            return Ok(TranslationDirection::HiToEn);
        }

        match value.to_lowercase().as_str() {
            "en-hi" | "en_to_hi" | "en→hi" | "en2hi" => Ok(TranslationDirection::EnToHi),
            "hi-en" | "hi_to_en" | "hi→en" | "hi2en" => Ok(TranslationDirection::HiToEn),
            _ => Err(TranslationError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

/// Normalize a language code to the supported set (e.g. `EN` -> `en`)
fn normalize_lang(lang: &str) -> Result<String, TranslationError> {
    let code = lang.trim().to_lowercase();
    if !SUPPORTED_LANGS.contains(&code.as_str()) {
        return Err(TranslationError::InvalidDirection {
            value: format!(
                "unsupported language code '{}', supported: {:?}",
                lang, SUPPORTED_LANGS
            ),
        });
    }
    Ok(code)
}

/// Translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub direction: TranslationDirection,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, direction: TranslationDirection) -> Self {
        Self {
            text: text.into(),
            direction,
        }
    }
}

/// Translation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translation: String,
    pub direction: TranslationDirection,
    pub model_used: String,
    pub elapsed_ms: u64,
    pub translated_at: chrono::DateTime<chrono::Utc>,
}

impl TranslationResult {
    /// Whether the output is written in the script expected for the direction
    pub fn is_script_plausible(&self) -> bool {
        dominant_script(&self.translation) == Some(self.direction.target_script())
    }
}

/// Reference sentence pair from the sample CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplePair {
    pub source: String,
    pub target: String,
    pub direction: TranslationDirection,
}

impl SamplePair {
    /// Same pair read the other way round
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            direction: self.direction.reversed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!("en-hi".parse::<TranslationDirection>().unwrap(), TranslationDirection::EnToHi);
        assert_eq!("HI_TO_EN".parse::<TranslationDirection>().unwrap(), TranslationDirection::HiToEn);
        assert_eq!(
            "English → Hindi".parse::<TranslationDirection>().unwrap(),
            TranslationDirection::EnToHi
        );
        assert!(matches!(
            "fr-en".parse::<TranslationDirection>(),
            Err(TranslationError::InvalidDirection { .. })
        ));
    }

    #[test]
    fn test_direction_display_round_trips_through_parse() {
        for direction in TranslationDirection::ALL {
            let parsed: TranslationDirection = direction.to_string().parse().unwrap();
            assert_eq!(parsed, direction);
        }
    }

    #[test]
    fn test_from_codes() {
        assert_eq!(
            TranslationDirection::from_codes(" EN ", "hi").unwrap(),
            TranslationDirection::EnToHi
        );
        assert_eq!(
            TranslationDirection::from_codes("hi", "en").unwrap(),
            TranslationDirection::HiToEn
        );
        assert!(TranslationDirection::from_codes("en", "en").is_err());
        assert!(TranslationDirection::from_codes("en", "fr").is_err());
    }

    #[test]
    fn test_direction_serde() {
        let json = serde_json::to_string(&TranslationDirection::HiToEn).unwrap();
        assert_eq!(json, "\"hi-en\"");

        let parsed: TranslationDirection = serde_json::from_str("\"EN_TO_HI\"").unwrap();
        assert_eq!(parsed, TranslationDirection::EnToHi);
    }

    #[test]
    fn test_detect_direction() {
        assert_eq!(TranslationDirection::detect("नमस्ते"), TranslationDirection::HiToEn);
        assert_eq!(TranslationDirection::detect("Good morning"), TranslationDirection::EnToHi);
        assert_eq!(TranslationDirection::detect("42"), TranslationDirection::EnToHi);
    }

    #[test]
    fn test_sample_pair_reversed() {
        let pair = SamplePair {
            source: "Thank you".to_string(),
            target: "धन्यवाद".to_string(),
            direction: TranslationDirection::EnToHi,
        };
        let reversed = pair.reversed();
        assert_eq!(reversed.source, "धन्यवाद");
        assert_eq!(reversed.direction, TranslationDirection::HiToEn);
        assert_eq!(reversed.reversed(), pair);
    }
}
