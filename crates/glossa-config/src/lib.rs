use std::env;

use serde::{Deserialize, Serialize};

use self::drive::DriveConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;
use self::vocab::VocabConfig;

pub mod drive;
pub mod translator;
pub mod ui;
pub mod vocab;

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub drive: DriveConfig,
    pub vocab: VocabConfig,
    pub ui: UiConfig,

    /// HTTP timeout for the file-store and vocabulary clients
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            drive: DriveConfig::default(),
            vocab: VocabConfig::default(),
            ui: UiConfig::default(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Layer environment overrides on top of the loaded values. Secrets
    /// are only ever read from the environment, never from profiles.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            self.translator.api_key = key;
        }

        if let Ok(url) = env::var("GLOSSA_VOCAB_URL") {
            self.vocab.api_url = url;
        }

        if let Ok(key) = env::var("GLOSSA_VOCAB_KEY") {
            self.vocab.api_key = key;
        }

        if let Some(timeout) = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_seconds = timeout;
        }
    }
}
