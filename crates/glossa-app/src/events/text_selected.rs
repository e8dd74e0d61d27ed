use glossa_core::popup::{PopupSize, Viewport};
use glossa_translate::{TranslateError, TranslateRequest};
use glossa_types::{AppEvent, PopupAnchor, StatusLevel, TranslationView};

use crate::popup::PopupSession;

use super::EventContext;

pub async fn handle_text_selected(
    ctx: &mut EventContext,
    raw_text: String,
    block_text: String,
    anchor: PopupAnchor,
) -> anyhow::Result<()> {
    let Some(selection) = glossa_core::extract(&raw_text, &block_text) else {
        tracing::debug!("selection rejected, no popup");
        return Ok(());
    };

    let Some(translator) = ctx.translator.clone() else {
        ctx.notify(
            "Translation is disabled. Set GEMINI_API_KEY to enable it.",
            StatusLevel::Error,
        )
        .await?;
        return Ok(());
    };

    let origin = {
        let config = ctx.state.config.read().await;
        glossa_core::popup::clamp_origin(
            anchor,
            Viewport {
                width: config.ui.viewport_width,
                height: config.ui.viewport_height,
            },
            PopupSize {
                width: config.ui.popup_width,
                height: config.ui.popup_height,
            },
        )
    };

    tracing::info!("lookup '{}' at {:?}", selection.word, origin);
    ctx.popup = Some(PopupSession::open(
        selection.word.clone(),
        selection.sentence.clone(),
        origin,
    ));
    ctx.app_to_ui_tx
        .send(AppEvent::PopupOpened {
            word: selection.word.clone(),
            origin,
        })
        .await?;

    // The fetch runs off-loop so further events keep flowing. Nothing
    // cancels an in-flight request: when selections overlap, whichever
    // response resolves last wins the popup.
    let loop_tx = ctx.loop_tx.clone();
    let request = TranslateRequest {
        word: selection.word,
        context_sentence: Some(selection.sentence.clone()),
    };
    let context_sentence = selection.sentence;

    tokio::spawn(async move {
        let event = match translator.translate(&request).await {
            Ok(record) => AppEvent::TranslationResolved(TranslationView {
                word: request.word.clone(),
                word_translation: record.word_translation,
                sentence_translation: record.sentence_translation,
                pronunciation: record.pronunciation,
                part_of_speech: record.part_of_speech,
                notes: record.notes,
                context_sentence: Some(context_sentence),
            }),
            Err(e) => {
                tracing::error!("translation failed: {e}");
                AppEvent::TranslationFailed {
                    message: failure_message(&e),
                }
            }
        };

        let _ = loop_tx.send(event).await;
    });

    Ok(())
}

/// Rate-limit and quota conditions get distinct wording; everything else
/// collapses to the generic failure notice
pub fn failure_message(error: &TranslateError) -> String {
    match error {
        TranslateError::RateLimited => {
            "Translation rate limit reached. Please wait a moment and try again.".to_string()
        }
        TranslateError::QuotaExhausted => {
            "Translation quota exhausted. Please try again later.".to_string()
        }
        TranslateError::Auth => {
            "Translation unavailable. Check your API key configuration.".to_string()
        }
        _ => "Failed to translate. Please try again.".to_string(),
    }
}
