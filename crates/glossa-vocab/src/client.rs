use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use glossa_types::Session;

use crate::types::{DEFAULT_TAG_COLOR, NewWord, SavedWord, Tag, VocabError, WordPatch};

/// Embed the tag rows alongside each word in one round trip
const WORD_SELECT: &str = "*,word_tags(tag_id,tags(*))";

/// PostgREST client for the hosted `words` / `tags` / `word_tags`
/// tables. The project api key rides on every request; the caller's
/// JWT arrives per call via [`Session`].
#[derive(Clone)]
pub struct VocabStore {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl VocabStore {
    pub fn new(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    fn request(
        &self,
        method: Method,
        session: &Session,
        table: &str,
    ) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.api_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
    }

    /// Fetch the user's words, newest first, with tags flattened in
    pub async fn list_words(&self, session: &Session) -> Result<Vec<SavedWord>, VocabError> {
        let owner = format!("eq.{}", session.user_id);

        let response = self
            .request(Method::GET, session, "words")
            .query(&[
                ("select", WORD_SELECT),
                ("user_id", owner.as_str()),
                ("order", "created_at.desc"),
            ])
            .send()
            .await?;
        let response = error_for_status(response).await?;

        let rows: Vec<WordRow> = response.json().await?;
        Ok(rows.into_iter().map(WordRow::into_saved).collect())
    }

    /// Insert a word and return the created row. Only invoked by the
    /// explicit save action; no dedup against existing rows.
    pub async fn add_word(
        &self,
        session: &Session,
        word: NewWord,
    ) -> Result<SavedWord, VocabError> {
        let response = self
            .request(Method::POST, session, "words")
            .header("Prefer", "return=representation")
            .json(&InsertWord {
                user_id: &session.user_id,
                word: &word,
            })
            .send()
            .await?;
        let response = error_for_status(response).await?;

        let rows: Vec<WordRow> = response.json().await?;
        rows.into_iter()
            .next()
            .map(WordRow::into_saved)
            .ok_or(VocabError::EmptyReply)
    }

    pub async fn update_word(
        &self,
        session: &Session,
        id: Uuid,
        patch: WordPatch,
    ) -> Result<(), VocabError> {
        let id_filter = format!("eq.{}", id);
        let owner = format!("eq.{}", session.user_id);

        let response = self
            .request(Method::PATCH, session, "words")
            .query(&[("id", id_filter.as_str()), ("user_id", owner.as_str())])
            .json(&patch)
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }

    pub async fn delete_word(&self, session: &Session, id: Uuid) -> Result<(), VocabError> {
        let id_filter = format!("eq.{}", id);
        let owner = format!("eq.{}", session.user_id);

        let response = self
            .request(Method::DELETE, session, "words")
            .query(&[("id", id_filter.as_str()), ("user_id", owner.as_str())])
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }

    pub async fn list_tags(&self, session: &Session) -> Result<Vec<Tag>, VocabError> {
        let owner = format!("eq.{}", session.user_id);

        let response = self
            .request(Method::GET, session, "tags")
            .query(&[
                ("select", "*"),
                ("user_id", owner.as_str()),
                ("order", "name.asc"),
            ])
            .send()
            .await?;
        let response = error_for_status(response).await?;

        Ok(response.json().await?)
    }

    pub async fn create_tag(
        &self,
        session: &Session,
        name: &str,
        color: Option<&str>,
    ) -> Result<Tag, VocabError> {
        let response = self
            .request(Method::POST, session, "tags")
            .header("Prefer", "return=representation")
            .json(&json!({
                "user_id": session.user_id,
                "name": name,
                "color": color.unwrap_or(DEFAULT_TAG_COLOR),
            }))
            .send()
            .await?;
        let response = error_for_status(response).await?;

        let rows: Vec<Tag> = response.json().await?;
        rows.into_iter().next().ok_or(VocabError::EmptyReply)
    }

    /// Remove a tag, clearing its word associations first so no
    /// dangling join rows remain
    pub async fn delete_tag(&self, session: &Session, id: Uuid) -> Result<(), VocabError> {
        let tag_filter = format!("eq.{}", id);

        let response = self
            .request(Method::DELETE, session, "word_tags")
            .query(&[("tag_id", tag_filter.as_str())])
            .send()
            .await?;
        error_for_status(response).await?;

        let owner = format!("eq.{}", session.user_id);
        let response = self
            .request(Method::DELETE, session, "tags")
            .query(&[("id", tag_filter.as_str()), ("user_id", owner.as_str())])
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }

    pub async fn tag_word(
        &self,
        session: &Session,
        word_id: Uuid,
        tag_id: Uuid,
    ) -> Result<(), VocabError> {
        let response = self
            .request(Method::POST, session, "word_tags")
            .json(&json!({ "word_id": word_id, "tag_id": tag_id }))
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }

    pub async fn untag_word(
        &self,
        session: &Session,
        word_id: Uuid,
        tag_id: Uuid,
    ) -> Result<(), VocabError> {
        let word_filter = format!("eq.{}", word_id);
        let tag_filter = format!("eq.{}", tag_id);

        let response = self
            .request(Method::DELETE, session, "word_tags")
            .query(&[
                ("word_id", word_filter.as_str()),
                ("tag_id", tag_filter.as_str()),
            ])
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }
}

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, VocabError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(VocabError::Api {
        status: status.as_u16(),
        body,
    })
}

#[derive(Serialize)]
struct InsertWord<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    word: &'a NewWord,
}

/// Raw word row as the store returns it, with the embedded join rows
/// still nested under `word_tags`
#[derive(Deserialize)]
struct WordRow {
    id: Uuid,
    word: String,
    translation: Option<String>,
    context_sentence: Option<String>,
    sentence_translation: Option<String>,
    source_file_id: Option<String>,
    source_file_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    word_tags: Vec<WordTagRow>,
}

#[derive(Deserialize)]
struct WordTagRow {
    /// Null when the association points at a deleted tag
    tags: Option<Tag>,
}

impl WordRow {
    fn into_saved(self) -> SavedWord {
        SavedWord {
            id: self.id,
            word: self.word,
            translation: self.translation,
            context_sentence: self.context_sentence,
            sentence_translation: self.sentence_translation,
            source_file_id: self.source_file_id,
            source_file_name: self.source_file_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
            tags: self.word_tags.into_iter().filter_map(|wt| wt.tags).collect(),
        }
    }
}
