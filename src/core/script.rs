//! Writing-script detection for English and Hindi text

use serde::Serialize;

/// Dominant writing system of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Devanagari,
    Latin,
}

/// Devanagari block plus Devanagari Extended
fn is_devanagari(c: char) -> bool {
    matches!(c, '\u{0900}'..='\u{097F}' | '\u{A8E0}'..='\u{A8FF}')
}

fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '\u{00C0}'..='\u{024F}')
}

/// Count letters per script, ignoring digits, punctuation and whitespace.
pub fn script_counts(text: &str) -> (usize, usize) {
    text.chars().fold((0, 0), |(deva, latin), c| {
        if is_devanagari(c) {
            (deva + 1, latin)
        } else if is_latin(c) {
            (deva, latin + 1)
        } else {
            (deva, latin)
        }
    })
}

/// Returns the script holding the majority of letters, or `None` when the
/// text has no letters from either script. Ties go to Devanagari.
pub fn dominant_script(text: &str) -> Option<Script> {
    match script_counts(text) {
        (0, 0) => None,
        (deva, latin) if deva >= latin => Some(Script::Devanagari),
        _ => Some(Script::Latin),
    }
}
