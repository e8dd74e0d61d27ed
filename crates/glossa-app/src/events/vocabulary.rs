use uuid::Uuid;

use glossa_types::{AppEvent, Session, StatusLevel, TagView, WordView};
use glossa_vocab::DEFAULT_TAG_COLOR;

use super::EventContext;

pub async fn handle_list_words(ctx: &mut EventContext) -> anyhow::Result<()> {
    let Some(session) = require_session(ctx).await? else {
        return Ok(());
    };

    match ctx.vocab.list_words(&session).await {
        Ok(words) => {
            tracing::info!("fetched {} words", words.len());
            let views = words
                .into_iter()
                .map(|word| WordView {
                    id: word.id,
                    word: word.word,
                    translation: word.translation,
                    context_sentence: word.context_sentence,
                    tags: word.tags.into_iter().map(tag_view).collect(),
                })
                .collect();
            ctx.app_to_ui_tx.send(AppEvent::WordsListed(views)).await?;
        }
        Err(e) => {
            tracing::error!("word list failed: {e}");
            ctx.notify("Failed to fetch vocabulary", StatusLevel::Error)
                .await?;
        }
    }

    Ok(())
}

pub async fn handle_list_tags(ctx: &mut EventContext) -> anyhow::Result<()> {
    let Some(session) = require_session(ctx).await? else {
        return Ok(());
    };

    match ctx.vocab.list_tags(&session).await {
        Ok(tags) => {
            let views = tags.into_iter().map(tag_view).collect();
            ctx.app_to_ui_tx.send(AppEvent::TagsListed(views)).await?;
        }
        Err(e) => {
            tracing::error!("tag list failed: {e}");
            ctx.notify("Failed to fetch tags", StatusLevel::Error).await?;
        }
    }

    Ok(())
}

pub async fn handle_create_tag(
    ctx: &mut EventContext,
    name: String,
    color: Option<String>,
) -> anyhow::Result<()> {
    let Some(session) = require_session(ctx).await? else {
        return Ok(());
    };

    match ctx.vocab.create_tag(&session, &name, color.as_deref()).await {
        Ok(tag) => {
            tracing::info!("created tag '{}' ({})", tag.name, tag.id);
            ctx.notify("Tag created!", StatusLevel::Info).await?;
            handle_list_tags(ctx).await?;
        }
        Err(e) => {
            tracing::error!("tag create failed: {e}");
            ctx.notify("Failed to create tag", StatusLevel::Error).await?;
        }
    }

    Ok(())
}

pub async fn handle_delete_tag(ctx: &mut EventContext, tag_id: Uuid) -> anyhow::Result<()> {
    let Some(session) = require_session(ctx).await? else {
        return Ok(());
    };

    match ctx.vocab.delete_tag(&session, tag_id).await {
        Ok(()) => {
            ctx.notify("Tag deleted", StatusLevel::Info).await?;
            handle_list_tags(ctx).await?;
        }
        Err(e) => {
            tracing::error!("tag delete failed: {e}");
            ctx.notify("Failed to delete tag", StatusLevel::Error).await?;
        }
    }

    Ok(())
}

pub async fn handle_delete_word(ctx: &mut EventContext, word_id: Uuid) -> anyhow::Result<()> {
    let Some(session) = require_session(ctx).await? else {
        return Ok(());
    };

    match ctx.vocab.delete_word(&session, word_id).await {
        Ok(()) => {
            ctx.notify("Word deleted", StatusLevel::Info).await?;
            handle_list_words(ctx).await?;
        }
        Err(e) => {
            tracing::error!("word delete failed: {e}");
            ctx.notify("Failed to delete word", StatusLevel::Error).await?;
        }
    }

    Ok(())
}

pub async fn handle_tag_word(
    ctx: &mut EventContext,
    word_id: Uuid,
    tag_id: Uuid,
) -> anyhow::Result<()> {
    let Some(session) = require_session(ctx).await? else {
        return Ok(());
    };

    match ctx.vocab.tag_word(&session, word_id, tag_id).await {
        Ok(()) => {
            handle_list_words(ctx).await?;
        }
        Err(e) => {
            tracing::error!("tag attach failed: {e}");
            ctx.notify("Failed to add tag", StatusLevel::Error).await?;
        }
    }

    Ok(())
}

pub async fn handle_untag_word(
    ctx: &mut EventContext,
    word_id: Uuid,
    tag_id: Uuid,
) -> anyhow::Result<()> {
    let Some(session) = require_session(ctx).await? else {
        return Ok(());
    };

    match ctx.vocab.untag_word(&session, word_id, tag_id).await {
        Ok(()) => {
            handle_list_words(ctx).await?;
        }
        Err(e) => {
            tracing::error!("tag detach failed: {e}");
            ctx.notify("Failed to remove tag", StatusLevel::Error).await?;
        }
    }

    Ok(())
}

fn tag_view(tag: glossa_vocab::Tag) -> TagView {
    TagView {
        id: tag.id,
        name: tag.name,
        color: tag.color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string()),
    }
}

/// Vocabulary calls need a signed-in session; a missing one aborts the
/// action with a re-auth prompt
async fn require_session(ctx: &EventContext) -> anyhow::Result<Option<Session>> {
    match ctx.state.session.session().await {
        Some(session) => Ok(Some(session)),
        None => {
            ctx.notify(
                "Please sign in to manage your vocabulary",
                StatusLevel::Error,
            )
            .await?;
            Ok(None)
        }
    }
}
