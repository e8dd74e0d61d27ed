use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigChanged,
    UiEvent(UiEvent),

    // UI -> app intents
    ListFiles,
    OpenDocument {
        file_id: String,
    },
    UploadDocument {
        file_name: String,
        mime_type: String,
        /// Base64-encoded file content
        file_content: String,
    },
    TextSelected {
        raw_text: String,
        block_text: String,
        anchor: PopupAnchor,
    },
    ClosePopup,
    SaveWord,
    ListWords,
    ListTags,
    CreateTag {
        name: String,
        color: Option<String>,
    },
    DeleteTag {
        tag_id: Uuid,
    },
    DeleteWord {
        word_id: Uuid,
    },
    TagWord {
        word_id: Uuid,
        tag_id: Uuid,
    },
    UntagWord {
        word_id: Uuid,
        tag_id: Uuid,
    },
    ExportVocabulary {
        format: ExportFormat,
        tag_id: Option<Uuid>,
        include_context: bool,
        dest: PathBuf,
    },
    ZoomIn,
    ZoomOut,
    ZoomReset,

    // app -> UI notifications
    FilesListed(Vec<FileView>),
    DocumentLoaded {
        name: String,
        mime_type: String,
        content: String,
        zoom: u16,
    },
    PopupOpened {
        word: String,
        origin: (i32, i32),
    },
    TranslationResolved(TranslationView),
    TranslationFailed {
        message: String,
    },
    WordSaved,
    WordsListed(Vec<WordView>),
    TagsListed(Vec<TagView>),
    ExportWritten {
        path: PathBuf,
        count: usize,
    },
    StatusUpdate {
        message: String,
        level: StatusLevel,
    },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Show,
    Hide,
    Close,
}

/// On-screen coordinates of a selection event, used for popup placement
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PopupAnchor {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Anki,
}

/// An authenticated user session. `access_token` is the store JWT;
/// `provider_token` is the Google OAuth token when the user signed in
/// with Google.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
    pub provider_token: Option<String>,
}

/// Flattened translation for display. Optional fields were absent from
/// the model output.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationView {
    pub word: String,
    pub word_translation: String,
    pub sentence_translation: Option<String>,
    pub pronunciation: Option<String>,
    pub part_of_speech: Option<String>,
    pub notes: Option<String>,
    pub context_sentence: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FileView {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub modified_time: String,
    pub size: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WordView {
    pub id: Uuid,
    pub word: String,
    pub translation: Option<String>,
    pub context_sentence: Option<String>,
    pub tags: Vec<TagView>,
}

#[derive(Debug, Clone)]
pub struct TagView {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}
