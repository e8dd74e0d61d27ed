use std::sync::Arc;

use async_trait::async_trait;
use kanal::AsyncReceiver;

use glossa_config::Config;
use glossa_drive::DriveClient;
use glossa_translate::{
    ProviderMetadata, TranslateError, TranslateRequest, TranslationRecord, Translator,
};
use glossa_types::{AppEvent, Session};
use glossa_vocab::VocabStore;

use crate::events::EventContext;
use crate::session::SessionProvider;
use crate::state::AppState;

mod popup_flow_tests;

/// Fixed session provider for tests
pub struct StaticSession(pub Option<Session>);

#[async_trait]
impl SessionProvider for StaticSession {
    async fn session(&self) -> Option<Session> {
        self.0.clone()
    }
}

pub enum StubOutcome {
    Ok(TranslationRecord),
    RateLimited,
    Quota,
    Fail(String),
}

/// Translator returning a canned outcome, no network
pub struct StubTranslator(pub StubOutcome);

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(
        &self,
        _request: &TranslateRequest,
    ) -> Result<TranslationRecord, TranslateError> {
        match &self.0 {
            StubOutcome::Ok(record) => Ok(record.clone()),
            StubOutcome::RateLimited => Err(TranslateError::RateLimited),
            StubOutcome::Quota => Err(TranslateError::QuotaExhausted),
            StubOutcome::Fail(message) => Err(TranslateError::Api(message.clone())),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Stub".to_string(),
            requires_api_key: false,
        }
    }
}

pub struct TestHarness {
    pub ctx: EventContext,
    pub app_to_ui_rx: AsyncReceiver<AppEvent>,
    pub ui_to_app_rx: AsyncReceiver<AppEvent>,
}

/// Event context wired to in-memory channels. The drive and vocab
/// clients point nowhere; tests that use them assert the guard paths
/// that never reach the network.
pub fn harness(
    translator: Option<Arc<dyn Translator>>,
    session: Option<Session>,
) -> TestHarness {
    let (app_to_ui_tx, app_to_ui_rx) = kanal::bounded_async(256);
    let (ui_to_app_tx, ui_to_app_rx) = kanal::bounded_async(64);

    let state = Arc::new(AppState::new(
        Config::default(),
        Arc::new(StaticSession(session)),
    ));

    let client = reqwest::Client::new();
    let ctx = EventContext {
        state,
        app_to_ui_tx,
        loop_tx: ui_to_app_tx,
        translator,
        drive: DriveClient::new(
            client.clone(),
            "http://127.0.0.1:9".to_string(),
            "http://127.0.0.1:9".to_string(),
            "Glossa Imports".to_string(),
        ),
        vocab: VocabStore::new(client, "http://127.0.0.1:9".to_string(), String::new()),
        popup: None,
        reader: None,
    };

    TestHarness {
        ctx,
        app_to_ui_rx,
        ui_to_app_rx,
    }
}

pub fn session() -> Session {
    Session {
        user_id: "user-1".to_string(),
        access_token: "jwt".to_string(),
        provider_token: Some("google-token".to_string()),
    }
}

pub fn record(word_translation: &str) -> TranslationRecord {
    TranslationRecord {
        word_translation: word_translation.to_string(),
        sentence_translation: Some("sentence".to_string()),
        ..TranslationRecord::default()
    }
}
