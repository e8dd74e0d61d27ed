use glossa_core::preprocess::{DefaultPreprocessor, Preprocessor};
use glossa_types::{AppEvent, FileView, StatusLevel};

use crate::reader::ReaderSession;

use super::EventContext;

pub async fn handle_list_files(ctx: &mut EventContext) -> anyhow::Result<()> {
    let Some(token) = provider_token(ctx).await else {
        ctx.notify(
            "Please sign in with Google to access your Drive",
            StatusLevel::Error,
        )
        .await?;
        return Ok(());
    };

    match ctx.drive.list(&token).await {
        Ok(files) => {
            tracing::info!("listed {} drive files", files.len());
            let views = files
                .into_iter()
                .map(|file| FileView {
                    id: file.id,
                    name: file.name,
                    mime_type: file.mime_type,
                    modified_time: file.modified_time,
                    size: file.size,
                })
                .collect();
            ctx.app_to_ui_tx.send(AppEvent::FilesListed(views)).await?;
        }
        Err(e) => {
            tracing::error!("drive list failed: {e}");
            ctx.notify("Failed to fetch files from Google Drive", StatusLevel::Error)
                .await?;
        }
    }

    Ok(())
}

pub async fn handle_open_document(ctx: &mut EventContext, file_id: String) -> anyhow::Result<()> {
    let Some(token) = provider_token(ctx).await else {
        ctx.notify(
            "Please sign in with Google to access files",
            StatusLevel::Error,
        )
        .await?;
        return Ok(());
    };

    match ctx.drive.download(&token, &file_id).await {
        Ok(document) => {
            // Plain text gets the ingestion cleanup; PDF content stays
            // base64 for the viewer
            let content = if document.mime_type == "text/plain" {
                DefaultPreprocessor.process(&document.content)
            } else {
                document.content
            };

            tracing::info!("opened '{}' ({})", document.name, document.mime_type);
            let reader = ReaderSession::new(
                file_id,
                document.name.clone(),
                document.mime_type.clone(),
                content.clone(),
            );
            let zoom = reader.zoom;

            // A popup from the previous document has no home any more
            ctx.popup = None;
            ctx.reader = Some(reader);

            ctx.app_to_ui_tx
                .send(AppEvent::DocumentLoaded {
                    name: document.name,
                    mime_type: document.mime_type,
                    content,
                    zoom,
                })
                .await?;
        }
        Err(e) => {
            tracing::error!("drive download failed: {e}");
            ctx.notify(
                "Failed to download file from Google Drive",
                StatusLevel::Error,
            )
            .await?;
        }
    }

    Ok(())
}

pub async fn handle_upload_document(
    ctx: &mut EventContext,
    file_name: String,
    mime_type: String,
    file_content: String,
) -> anyhow::Result<()> {
    let Some(token) = provider_token(ctx).await else {
        ctx.notify(
            "Please sign in with Google to upload files",
            StatusLevel::Error,
        )
        .await?;
        return Ok(());
    };

    match ctx
        .drive
        .upload(&token, &file_name, &mime_type, &file_content)
        .await
    {
        Ok(file) => {
            tracing::info!("uploaded '{}' as {}", file.name, file.id);
            ctx.notify("File uploaded to Google Drive", StatusLevel::Info)
                .await?;
            // Refresh the listing so the new file shows up right away
            handle_list_files(ctx).await?;
        }
        Err(e) => {
            tracing::error!("drive upload failed: {e}");
            ctx.notify("Failed to upload file to Google Drive", StatusLevel::Error)
                .await?;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub enum Zoom {
    In,
    Out,
    Reset,
}

pub async fn handle_zoom(ctx: &mut EventContext, action: Zoom) -> anyhow::Result<()> {
    let Some(reader) = ctx.reader.as_mut() else {
        ctx.notify("No document open", StatusLevel::Error).await?;
        return Ok(());
    };

    let ui = { ctx.state.config.read().await.ui.clone() };
    let zoom = match action {
        Zoom::In => reader.zoom_in(&ui),
        Zoom::Out => reader.zoom_out(&ui),
        Zoom::Reset => reader.zoom_reset(),
    };

    ctx.notify(format!("Zoom: {zoom}%"), StatusLevel::Info).await?;
    Ok(())
}

/// Google API calls need the provider token, not just a session
async fn provider_token(ctx: &EventContext) -> Option<String> {
    ctx.state
        .session
        .session()
        .await
        .and_then(|session| session.provider_token)
}
