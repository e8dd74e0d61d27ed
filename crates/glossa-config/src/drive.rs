use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_upload_url() -> String {
    "https://www.googleapis.com/upload/drive/v3".to_string()
}

fn default_folder_name() -> String {
    "Glossa Imports".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DriveConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
    /// Application-owned folder uploads land in, created on first use
    #[serde(default = "default_folder_name")]
    pub folder_name: String,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            upload_url: default_upload_url(),
            folder_name: default_folder_name(),
        }
    }
}
