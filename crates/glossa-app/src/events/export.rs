use std::path::PathBuf;

use chrono::Utc;
use uuid::Uuid;

use glossa_types::{AppEvent, ExportFormat, StatusLevel};
use glossa_vocab::{export_file_name, filter_by_tag, to_anki, to_csv};

use super::EventContext;

/// Fetch, filter, format, write. `dest` is a directory; the file name
/// is derived from the format and today's date.
pub async fn handle_export(
    ctx: &mut EventContext,
    format: ExportFormat,
    tag_id: Option<Uuid>,
    include_context: bool,
    dest: PathBuf,
) -> anyhow::Result<()> {
    let Some(session) = ctx.state.session.session().await else {
        ctx.notify(
            "Please sign in to export your vocabulary",
            StatusLevel::Error,
        )
        .await?;
        return Ok(());
    };

    let words = match ctx.vocab.list_words(&session).await {
        Ok(words) => words,
        Err(e) => {
            tracing::error!("word list failed: {e}");
            ctx.notify("Failed to fetch vocabulary", StatusLevel::Error)
                .await?;
            return Ok(());
        }
    };

    let filtered = filter_by_tag(&words, tag_id);
    if filtered.is_empty() {
        ctx.notify("No words to export", StatusLevel::Error).await?;
        return Ok(());
    }

    let body = match format {
        ExportFormat::Csv => to_csv(&filtered, include_context),
        ExportFormat::Anki => to_anki(&filtered, include_context),
    };

    let path = dest.join(export_file_name(format, Utc::now().date_naive()));
    if let Err(e) = tokio::fs::write(&path, body).await {
        tracing::error!("export write to {} failed: {e}", path.display());
        ctx.notify("Failed to export", StatusLevel::Error).await?;
        return Ok(());
    }

    tracing::info!("exported {} words to {}", filtered.len(), path.display());
    ctx.app_to_ui_tx
        .send(AppEvent::ExportWritten {
            path,
            count: filtered.len(),
        })
        .await?;

    let message = match format {
        ExportFormat::Csv => "CSV exported successfully!",
        ExportFormat::Anki => "Anki file exported! Import it in Anki using File > Import",
    };
    ctx.notify(message, StatusLevel::Info).await?;

    Ok(())
}
