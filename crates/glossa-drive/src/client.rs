use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::json;

use crate::types::{DocumentContent, DriveError, DriveFile, DriveRequest, DriveResponse};

/// Fixed multipart boundary, unchanged from the original web client
const BOUNDARY: &str = "-------314159265358979323846";

const LIST_FIELDS: &str =
    "files(id,name,mimeType,createdTime,modifiedTime,size,thumbnailLink,webViewLink)";
const UPLOAD_FIELDS: &str = "id,name,mimeType,createdTime,modifiedTime,size,webViewLink";

/// Google Drive v3 client. Access tokens are per-call inputs; the
/// client never holds credentials.
#[derive(Clone)]
pub struct DriveClient {
    client: reqwest::Client,
    api_url: String,
    upload_url: String,
    folder_name: String,
}

impl DriveClient {
    pub fn new(
        client: reqwest::Client,
        api_url: String,
        upload_url: String,
        folder_name: String,
    ) -> Self {
        Self {
            client,
            api_url,
            upload_url,
            folder_name,
        }
    }

    /// Dispatch a tagged action to the typed method behind it
    pub async fn invoke(
        &self,
        token: &str,
        request: DriveRequest,
    ) -> Result<DriveResponse, DriveError> {
        match request {
            DriveRequest::List => Ok(DriveResponse::Files {
                files: self.list(token).await?,
            }),
            DriveRequest::Upload {
                file_name,
                mime_type,
                file_content,
            } => Ok(DriveResponse::File {
                file: self
                    .upload(token, &file_name, &mime_type, &file_content)
                    .await?,
            }),
            DriveRequest::Download { file_id } => Ok(DriveResponse::Document(
                self.download(token, &file_id).await?,
            )),
        }
    }

    /// List the user's PDF and plain-text files, newest first
    pub async fn list(&self, token: &str) -> Result<Vec<DriveFile>, DriveError> {
        let query = "(mimeType='application/pdf' or mimeType='text/plain') and trashed=false";

        let response = self
            .client
            .get(format!("{}/files", self.api_url))
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("fields", LIST_FIELDS),
                ("orderBy", "modifiedTime desc"),
            ])
            .send()
            .await?;
        let response = error_for_status(response).await?;

        let listing: FileList = response.json().await?;
        Ok(listing.files)
    }

    /// Upload base64 `file_content` into the application folder,
    /// creating the folder on first use
    pub async fn upload(
        &self,
        token: &str,
        file_name: &str,
        mime_type: &str,
        file_content: &str,
    ) -> Result<DriveFile, DriveError> {
        let folder_id = self.get_or_create_folder(token).await?;

        let metadata = json!({
            "name": file_name,
            "parents": [folder_id],
            "mimeType": mime_type,
        });
        let body = multipart_body(&metadata.to_string(), mime_type, file_content);

        let response = self
            .client
            .post(format!("{}/files", self.upload_url))
            .bearer_auth(token)
            .query(&[("uploadType", "multipart"), ("fields", UPLOAD_FIELDS)])
            .header(
                "Content-Type",
                format!("multipart/related; boundary={}", BOUNDARY),
            )
            .body(body)
            .send()
            .await?;
        let response = error_for_status(response).await?;

        Ok(response.json().await?)
    }

    /// Fetch a document body plus the metadata the reader needs. PDF
    /// bytes come back base64 encoded, text comes back as-is.
    pub async fn download(
        &self,
        token: &str,
        file_id: &str,
    ) -> Result<DocumentContent, DriveError> {
        let response = self
            .client
            .get(format!("{}/files/{}", self.api_url, file_id))
            .bearer_auth(token)
            .query(&[("fields", "mimeType,name")])
            .send()
            .await?;
        let response = error_for_status(response).await?;
        let metadata: FileMeta = response.json().await?;

        let response = self
            .client
            .get(format!("{}/files/{}", self.api_url, file_id))
            .bearer_auth(token)
            .query(&[("alt", "media")])
            .send()
            .await?;
        let response = error_for_status(response).await?;

        let content = if metadata.mime_type == "application/pdf" {
            STANDARD.encode(response.bytes().await?)
        } else {
            response.text().await?
        };

        Ok(DocumentContent {
            content,
            mime_type: metadata.mime_type,
            name: metadata.name,
        })
    }

    async fn get_or_create_folder(&self, token: &str) -> Result<String, DriveError> {
        let query = format!(
            "name='{}' and mimeType='application/vnd.google-apps.folder' and trashed=false",
            self.folder_name
        );

        let response = self
            .client
            .get(format!("{}/files", self.api_url))
            .bearer_auth(token)
            .query(&[("q", query.as_str())])
            .send()
            .await?;
        let response = error_for_status(response).await?;

        let listing: FolderList = response.json().await?;
        if let Some(folder) = listing.files.into_iter().next() {
            return Ok(folder.id);
        }

        let response = self
            .client
            .post(format!("{}/files", self.api_url))
            .bearer_auth(token)
            .json(&json!({
                "name": self.folder_name,
                "mimeType": "application/vnd.google-apps.folder",
            }))
            .send()
            .await?;
        let response = error_for_status(response).await?;

        let created: serde_json::Value = response.json().await?;
        created["id"]
            .as_str()
            .map(str::to_string)
            .ok_or(DriveError::MissingFolder)
    }
}

/// Assemble the two-part `multipart/related` body: JSON metadata first,
/// then the payload carried as base64
fn multipart_body(metadata: &str, mime_type: &str, file_content: &str) -> String {
    let delimiter = format!("\r\n--{}\r\n", BOUNDARY);
    let close_delimiter = format!("\r\n--{}--", BOUNDARY);

    format!(
        "{delimiter}Content-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\
         {delimiter}Content-Type: {mime_type}\r\nContent-Transfer-Encoding: base64\r\n\r\n\
         {file_content}{close_delimiter}"
    )
}

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, DriveError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(DriveError::Api {
        status: status.as_u16(),
        body,
    })
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct FolderList {
    #[serde(default)]
    files: Vec<FolderRef>,
}

#[derive(Deserialize)]
struct FolderRef {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileMeta {
    mime_type: String,
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_body_carries_both_parts_in_order() {
        let body = multipart_body(
            r#"{"name":"notes.txt"}"#,
            "text/plain",
            "aGVsbG8gd29ybGQ=",
        );

        let expected = format!(
            "\r\n--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n\
             {{\"name\":\"notes.txt\"}}\
             \r\n--{b}\r\nContent-Type: text/plain\r\nContent-Transfer-Encoding: base64\r\n\r\n\
             aGVsbG8gd29ybGQ=\r\n--{b}--",
            b = "-------314159265358979323846"
        );
        assert_eq!(body, expected);
    }

    #[test]
    fn multipart_body_declares_the_payload_mime_type() {
        let body = multipart_body("{}", "application/pdf", "QUJD");
        assert!(body.contains("Content-Type: application/pdf\r\n"));
        assert!(body.contains("Content-Transfer-Encoding: base64\r\n\r\nQUJD"));
    }

    #[test]
    fn empty_listing_deserializes_to_no_files() {
        let listing: FileList = serde_json::from_str("{}").unwrap();
        assert!(listing.files.is_empty());
    }
}
