use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Preset palette offered when creating tags
pub const TAG_COLORS: [&str; 8] = [
    "#F59E0B", // Amber
    "#EF4444", // Red
    "#10B981", // Green
    "#3B82F6", // Blue
    "#8B5CF6", // Purple
    "#EC4899", // Pink
    "#06B6D4", // Cyan
    "#F97316", // Orange
];

pub const DEFAULT_TAG_COLOR: &str = "#F59E0B";

/// A vocabulary row with its tags already flattened in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedWord {
    pub id: Uuid,
    pub word: String,
    pub translation: Option<String>,
    pub context_sentence: Option<String>,
    pub sentence_translation: Option<String>,
    pub source_file_id: Option<String>,
    pub source_file_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Insert payload. The owner id is attached by the store, not here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewWord {
    pub word: String,
    pub translation: Option<String>,
    pub context_sentence: Option<String>,
    pub sentence_translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file_name: Option<String>,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
pub struct WordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_sentence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence_translation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Vocabulary API error: {status}")]
    Api { status: u16, body: String },

    /// Insert succeeded but the returned representation was empty
    #[error("Store returned no row")]
    EmptyReply,
}
