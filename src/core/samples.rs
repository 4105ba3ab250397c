//! Sample sentence pairs loaded from the bundled CSV

use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::core::errors::{Result, TranslationError};
use crate::core::models::{SamplePair, TranslationDirection};

/// Row count the bundled sample file is expected to have
pub const SAMPLE_ROWS: std::ops::RangeInclusive<usize> = 30..=50;

#[derive(Debug, Deserialize)]
struct SampleRow {
    english: String,
    hindi: String,
}

/// English/Hindi reference pairs, usable in either direction
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    pairs: Vec<SamplePair>,
}

impl SampleSet {
    /// Load and validate a CSV with `english,hindi` columns
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| TranslationError::SampleData {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let set = Self::from_reader(file).map_err(|e| match e {
            TranslationError::SampleData { message, .. } => TranslationError::SampleData {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;

        if !SAMPLE_ROWS.contains(&set.len()) {
            return Err(TranslationError::SampleData {
                path: path.display().to_string(),
                message: format!(
                    "expected {} to {} rows, found {}",
                    SAMPLE_ROWS.start(),
                    SAMPLE_ROWS.end(),
                    set.len()
                ),
            });
        }

        info!("Loaded {} sample pairs from {}", set.len(), path.display());
        Ok(set)
    }

    /// Parse pairs from any CSV source. Row count is not checked here.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = csv_reader.headers()?.clone();

        let mut pairs = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            // quoted fields may span lines, so take the line the record starts on
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: SampleRow = record.deserialize(Some(&headers))?;
            if row.english.is_empty() || row.hindi.is_empty() {
                return Err(TranslationError::SampleData {
                    path: "<reader>".to_string(),
                    message: format!("empty field on line {}", line),
                });
            }
            pairs.push(SamplePair {
                source: row.english,
                target: row.hindi,
                direction: TranslationDirection::EnToHi,
            });
        }

        Ok(Self { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs oriented for `direction`
    pub fn pairs(&self, direction: TranslationDirection) -> Vec<SamplePair> {
        self.pairs
            .iter()
            .map(|pair| {
                if pair.direction == direction {
                    pair.clone()
                } else {
                    pair.reversed()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "english,hindi\nThank you,धन्यवाद\n  Good morning , सुप्रभात \n";

    #[test]
    fn test_from_reader_trims_fields() {
        let set = SampleSet::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(set.len(), 2);

        let pairs = set.pairs(TranslationDirection::EnToHi);
        assert_eq!(pairs[1].source, "Good morning");
        assert_eq!(pairs[1].target, "सुप्रभात");
    }

    #[test]
    fn test_pairs_in_reverse_direction() {
        let set = SampleSet::from_reader(CSV.as_bytes()).unwrap();
        let pairs = set.pairs(TranslationDirection::HiToEn);
        assert_eq!(pairs[0].source, "धन्यवाद");
        assert_eq!(pairs[0].target, "Thank you");
        assert!(pairs.iter().all(|p| p.direction == TranslationDirection::HiToEn));
    }

    #[test]
    fn test_empty_field_is_rejected() {
        let csv = "english,hindi\nHello,नमस्ते\nWater,\n";
        match SampleSet::from_reader(csv.as_bytes()) {
            Err(TranslationError::SampleData { message, .. }) => {
                assert!(message.contains("line 3"), "{}", message)
            }
            other => panic!("unexpected result: {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_error_line_accounts_for_multiline_fields() {
        let csv = "english,hindi\n\"Hello,\nfriend\",नमस्ते दोस्त\nWater,\n";
        match SampleSet::from_reader(csv.as_bytes()) {
            Err(TranslationError::SampleData { message, .. }) => {
                assert!(message.contains("line 4"), "{}", message)
            }
            other => panic!("unexpected result: {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let csv = "english\nHello\n";
        assert!(SampleSet::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_checks_row_count() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        match SampleSet::load(file.path()) {
            Err(TranslationError::SampleData { message, .. }) => {
                assert!(message.contains("found 2"), "{}", message)
            }
            other => panic!("unexpected result: {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            SampleSet::load("does/not/exist.csv"),
            Err(TranslationError::SampleData { .. })
        ));
    }
}
