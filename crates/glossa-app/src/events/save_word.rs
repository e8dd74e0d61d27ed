use glossa_types::{AppEvent, StatusLevel};
use glossa_vocab::NewWord;

use crate::popup::SaveState;

use super::EventContext;

pub async fn handle_save_word(ctx: &mut EventContext) -> anyhow::Result<()> {
    let Some(popup) = ctx.popup.as_mut() else {
        return Ok(());
    };
    if !popup.can_save() {
        tracing::debug!("save ignored, popup not ready or already saved");
        return Ok(());
    }
    let Some(view) = popup.translation().cloned() else {
        return Ok(());
    };

    // Mark before any await; SaveWord events queued behind this one
    // land after the insert settled and see Saved or NotSaved
    popup.save_state = SaveState::Saving;
    let word = popup.word.clone();
    let sentence = popup.sentence.clone();

    let Some(session) = ctx.state.session.session().await else {
        if let Some(popup) = ctx.popup.as_mut() {
            popup.save_state = SaveState::NotSaved;
        }
        ctx.notify("Please sign in to save words", StatusLevel::Error)
            .await?;
        return Ok(());
    };

    let (source_file_id, source_file_name) = match ctx.reader.as_ref() {
        Some(reader) => (Some(reader.file_id.clone()), Some(reader.name.clone())),
        None => (None, None),
    };

    let new_word = NewWord {
        word,
        translation: Some(view.word_translation),
        context_sentence: Some(sentence),
        sentence_translation: view.sentence_translation,
        source_file_id,
        source_file_name,
    };

    match ctx.vocab.add_word(&session, new_word).await {
        Ok(saved) => {
            tracing::info!("word saved: {} ({})", saved.word, saved.id);
            if let Some(popup) = ctx.popup.as_mut() {
                popup.save_state = SaveState::Saved;
            }
            ctx.app_to_ui_tx.send(AppEvent::WordSaved).await?;
            ctx.notify("Word saved to vocabulary!", StatusLevel::Info)
                .await?;
        }
        Err(e) => {
            tracing::error!("failed to save word: {e}");
            // Retry allowed after a failed save
            if let Some(popup) = ctx.popup.as_mut() {
                popup.save_state = SaveState::NotSaved;
            }
            ctx.notify("Failed to save word", StatusLevel::Error).await?;
        }
    }

    Ok(())
}
