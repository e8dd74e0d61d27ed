pub mod client;
pub mod export;
pub mod types;

pub use client::VocabStore;
pub use export::{export_file_name, filter_by_tag, to_anki, to_csv};
pub use types::{DEFAULT_TAG_COLOR, NewWord, SavedWord, TAG_COLORS, Tag, VocabError, WordPatch};
