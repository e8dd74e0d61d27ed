use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};

use glossa_drive::DriveClient;
use glossa_translate::{GeminiTranslator, Translator};
use glossa_types::{AppEvent, StatusLevel, UiEvent};
use glossa_vocab::VocabStore;

use crate::popup::PopupSession;
use crate::reader::ReaderSession;
use crate::state::AppState;

pub mod documents;
pub mod export;
pub mod save_word;
pub mod text_selected;
pub mod vocabulary;

use documents::{Zoom, handle_list_files, handle_open_document, handle_upload_document, handle_zoom};
use export::handle_export;
use save_word::handle_save_word;
use text_selected::handle_text_selected;
use vocabulary::{
    handle_create_tag, handle_delete_tag, handle_delete_word, handle_list_tags, handle_list_words,
    handle_tag_word, handle_untag_word,
};

/// Handler dependencies plus the loop-owned UI context, bundled to keep
/// handler signatures short
pub struct EventContext {
    pub state: Arc<AppState>,
    pub app_to_ui_tx: AsyncSender<AppEvent>,
    /// Sender back into the event loop itself, for spawned work that
    /// finishes after the triggering event was handled
    pub loop_tx: AsyncSender<AppEvent>,
    pub translator: Option<Arc<dyn Translator>>,
    pub drive: DriveClient,
    pub vocab: VocabStore,
    pub popup: Option<PopupSession>,
    pub reader: Option<ReaderSession>,
}

impl EventContext {
    /// Status toast analog
    pub async fn notify(
        &self,
        message: impl Into<String>,
        level: StatusLevel,
    ) -> anyhow::Result<()> {
        self.app_to_ui_tx
            .send(AppEvent::StatusUpdate {
                message: message.into(),
                level,
            })
            .await?;
        Ok(())
    }
}

/// App's main loop. Service clients are built once from config; events
/// are handled one at a time, so handler code never races itself.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    loop_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (translator, drive, vocab) = {
        let config = state.config.read().await;

        // Shared client for the file store and vocabulary store. The
        // translator keeps transport defaults and no explicit timeout.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let translator: Option<Arc<dyn Translator>> =
            if config.translator.enabled && !config.translator.api_key.is_empty() {
                Some(Arc::new(GeminiTranslator::new(
                    config.translator.api_key.clone(),
                    config.translator.api_url.clone(),
                    config.translator.model.clone(),
                    config.translator.source_lang.clone(),
                    config.translator.target_lang.clone(),
                )))
            } else {
                tracing::warn!("Translator disabled or no api key, lookups will be rejected");
                None
            };

        let drive = DriveClient::new(
            client.clone(),
            config.drive.api_url.clone(),
            config.drive.upload_url.clone(),
            config.drive.folder_name.clone(),
        );
        let vocab = VocabStore::new(
            client,
            config.vocab.api_url.clone(),
            config.vocab.api_key.clone(),
        );

        (translator, drive, vocab)
    };

    let mut ctx = EventContext {
        state,
        app_to_ui_tx,
        loop_tx,
        translator,
        drive,
        vocab,
        popup: None,
        reader: None,
    };

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = ui_to_app_rx.recv().await?;
        tracing::debug!(
            "[EVENT_LOOP] event received: {:?}",
            std::mem::discriminant(&event)
        );

        if let AppEvent::UiEvent(UiEvent::Close) = event {
            tracing::info!("[EVENT_LOOP] Close received, shutting down");
            return Ok(());
        }

        handle_events(&mut ctx, event).await?;
    }
}

/// Dispatch one event. Service failures are reported to the user and
/// logged; only a dead channel propagates as an error.
pub async fn handle_events(ctx: &mut EventContext, event: AppEvent) -> anyhow::Result<()> {
    match event {
        AppEvent::ConfigChanged => {}
        AppEvent::UiEvent(_) => {}

        AppEvent::ListFiles => {
            handle_list_files(ctx).await?;
        }
        AppEvent::OpenDocument { file_id } => {
            handle_open_document(ctx, file_id).await?;
        }
        AppEvent::UploadDocument {
            file_name,
            mime_type,
            file_content,
        } => {
            handle_upload_document(ctx, file_name, mime_type, file_content).await?;
        }

        AppEvent::TextSelected {
            raw_text,
            block_text,
            anchor,
        } => {
            handle_text_selected(ctx, raw_text, block_text, anchor).await?;
        }
        AppEvent::ClosePopup => {
            // The record is discarded, never cached
            ctx.popup = None;
        }
        AppEvent::SaveWord => {
            handle_save_word(ctx).await?;
        }

        AppEvent::TranslationResolved(view) => {
            // A closed popup drops the late response; an open one takes
            // it, even when it belongs to an earlier selection
            if let Some(popup) = ctx.popup.as_mut() {
                popup.resolve(view.clone());
                ctx.app_to_ui_tx
                    .send(AppEvent::TranslationResolved(view))
                    .await?;
            } else {
                tracing::debug!("translation resolved after popup closed, dropped");
            }
        }
        AppEvent::TranslationFailed { message } => {
            if let Some(popup) = ctx.popup.as_mut() {
                popup.fail(message.clone());
                ctx.app_to_ui_tx
                    .send(AppEvent::TranslationFailed { message })
                    .await?;
            } else {
                tracing::debug!("translation failed after popup closed, dropped");
            }
        }

        AppEvent::ListWords => {
            handle_list_words(ctx).await?;
        }
        AppEvent::ListTags => {
            handle_list_tags(ctx).await?;
        }
        AppEvent::CreateTag { name, color } => {
            handle_create_tag(ctx, name, color).await?;
        }
        AppEvent::DeleteTag { tag_id } => {
            handle_delete_tag(ctx, tag_id).await?;
        }
        AppEvent::DeleteWord { word_id } => {
            handle_delete_word(ctx, word_id).await?;
        }
        AppEvent::TagWord { word_id, tag_id } => {
            handle_tag_word(ctx, word_id, tag_id).await?;
        }
        AppEvent::UntagWord { word_id, tag_id } => {
            handle_untag_word(ctx, word_id, tag_id).await?;
        }
        AppEvent::ExportVocabulary {
            format,
            tag_id,
            include_context,
            dest,
        } => {
            handle_export(ctx, format, tag_id, include_context, dest).await?;
        }

        AppEvent::ZoomIn => {
            handle_zoom(ctx, Zoom::In).await?;
        }
        AppEvent::ZoomOut => {
            handle_zoom(ctx, Zoom::Out).await?;
        }
        AppEvent::ZoomReset => {
            handle_zoom(ctx, Zoom::Reset).await?;
        }

        // UI-only notifications, ignore in backend
        AppEvent::FilesListed(_)
        | AppEvent::DocumentLoaded { .. }
        | AppEvent::PopupOpened { .. }
        | AppEvent::WordSaved
        | AppEvent::WordsListed(_)
        | AppEvent::TagsListed(_)
        | AppEvent::ExportWritten { .. }
        | AppEvent::StatusUpdate { .. } => {}
    }

    Ok(())
}
