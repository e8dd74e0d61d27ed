use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Request shape of the translation boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_sentence: Option<String>,
}

/// Structured translation as requested from the model. Fields the model
/// omitted or set to null decode to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    #[serde(default)]
    pub word_translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

static FENCE_RE: OnceLock<Regex> = OnceLock::new();

fn fence_re() -> &'static Regex {
    FENCE_RE.get_or_init(|| Regex::new(r"```json\n?|\n?```").expect("fence regex"))
}

/// Best-effort decoding of free-text model output into a
/// [`TranslationRecord`]. Models are asked for strict JSON but are not
/// guaranteed to comply, so this is a two-stage pipeline:
///
/// 1. strip markdown code-fence markers, trim, parse as JSON;
/// 2. on any parse failure, the entire raw input verbatim becomes
///    `word_translation` and every other field stays absent.
///
/// Never returns an error and never panics; nothing past this boundary
/// sees malformed model output.
pub fn parse_model_output(raw: &str) -> TranslationRecord {
    let cleaned = fence_re().replace_all(raw, "");

    match serde_json::from_str(cleaned.trim()) {
        Ok(record) => record,
        Err(_) => TranslationRecord {
            word_translation: raw.to_string(),
            ..TranslationRecord::default()
        },
    }
}
