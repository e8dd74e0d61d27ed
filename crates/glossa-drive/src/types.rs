use serde::{Deserialize, Serialize};

/// File metadata as projected by the `fields` query parameter. Listing
/// and upload responses both deserialize into this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub created_time: String,
    pub modified_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
}

/// Downloaded document body. `content` is base64 for PDFs, raw text for
/// plain-text files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    pub content: String,
    pub mime_type: String,
    pub name: String,
}

/// The three file-store actions, dispatched by tag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum DriveRequest {
    List,
    #[serde(rename_all = "camelCase")]
    Upload {
        file_name: String,
        mime_type: String,
        /// base64 encoded
        file_content: String,
    },
    #[serde(rename_all = "camelCase")]
    Download { file_id: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DriveResponse {
    Files { files: Vec<DriveFile> },
    File { file: DriveFile },
    Document(DocumentContent),
}

#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Drive API error: {status}")]
    Api { status: u16, body: String },

    /// Folder creation came back without an id
    #[error("Could not create application folder")]
    MissingFolder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_request_is_just_the_action_tag() {
        let request: DriveRequest = serde_json::from_str(r#"{"action":"list"}"#).unwrap();
        assert!(matches!(request, DriveRequest::List));

        let json = serde_json::to_value(DriveRequest::List).unwrap();
        assert_eq!(json, serde_json::json!({"action": "list"}));
    }

    #[test]
    fn upload_request_uses_camel_case_fields() {
        let request = DriveRequest::Upload {
            file_name: "notes.txt".to_string(),
            mime_type: "text/plain".to_string(),
            file_content: "aGVsbG8=".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["action"], "upload");
        assert_eq!(json["fileName"], "notes.txt");
        assert_eq!(json["mimeType"], "text/plain");
        assert_eq!(json["fileContent"], "aGVsbG8=");
    }

    #[test]
    fn download_request_round_trips() {
        let parsed: DriveRequest =
            serde_json::from_str(r#"{"action":"download","fileId":"abc123"}"#).unwrap();
        match parsed {
            DriveRequest::Download { file_id } => assert_eq!(file_id, "abc123"),
            other => panic!("expected Download, got {:?}", other),
        }
    }

    #[test]
    fn file_metadata_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "f1",
            "name": "story.pdf",
            "mimeType": "application/pdf",
            "createdTime": "2024-01-01T00:00:00Z",
            "modifiedTime": "2024-01-02T00:00:00Z"
        }"#;

        let file: DriveFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.mime_type, "application/pdf");
        assert!(file.size.is_none());
        assert!(file.web_view_link.is_none());
    }
}
