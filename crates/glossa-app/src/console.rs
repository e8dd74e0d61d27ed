use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use glossa_types::{AppEvent, ExportFormat, FileView, StatusLevel, TagView, UiEvent, WordView};

/// Snapshots of the latest listings so commands can name entries by
/// number or tag name instead of raw ids
#[derive(Default)]
pub struct ConsoleState {
    pub files: Vec<FileView>,
    pub words: Vec<WordView>,
    pub tags: Vec<TagView>,
    /// Text of the open document, used as the selection's block
    pub document: Option<String>,
}

/// What one input line asks for
#[derive(Debug)]
pub enum Command {
    Event(AppEvent),
    Upload(PathBuf),
    Help,
    Nothing,
}

/// Line-oriented UI seam of the binary: stdin commands map to
/// [`AppEvent`]s, app notifications print to stdout.
pub async fn console_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel_token: CancellationToken,
) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut console = ConsoleState::default();

    println!("glossa console. Type 'help' for commands.");

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                return Ok(());
            }
            event = app_to_ui_rx.recv() => {
                if render_event(&mut console, event?) {
                    return Ok(());
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // stdin closed
                    ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
                    return Ok(());
                };

                match parse_command(&line, &console) {
                    Ok(Command::Nothing) => {}
                    Ok(Command::Help) => print_help(),
                    Ok(Command::Upload(path)) => {
                        send_upload(&ui_to_app_tx, path).await?;
                    }
                    Ok(Command::Event(event)) => {
                        let quitting = matches!(event, AppEvent::UiEvent(UiEvent::Close));
                        ui_to_app_tx.send(event).await?;
                        if quitting {
                            return Ok(());
                        }
                    }
                    Err(message) => println!("{message}"),
                }
            }
        }
    }
}

/// Read and base64 the file here so the event carries content, not a
/// path the app side would have to trust
async fn send_upload(ui_to_app_tx: &AsyncSender<AppEvent>, path: PathBuf) -> anyhow::Result<()> {
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload.txt".to_string());
            let mime_type = if file_name.to_lowercase().ends_with(".pdf") {
                "application/pdf"
            } else {
                "text/plain"
            };

            ui_to_app_tx
                .send(AppEvent::UploadDocument {
                    file_name,
                    mime_type: mime_type.to_string(),
                    file_content: STANDARD.encode(bytes),
                })
                .await?;
        }
        Err(e) => println!("Cannot read {}: {e}", path.display()),
    }

    Ok(())
}

/// Print one app notification. Returns true when the app asked the UI
/// to close.
fn render_event(console: &mut ConsoleState, event: AppEvent) -> bool {
    match event {
        AppEvent::UiEvent(UiEvent::Close) => return true,
        AppEvent::UiEvent(_) => {}

        AppEvent::FilesListed(files) => {
            if files.is_empty() {
                println!("No files found.");
            }
            for (index, file) in files.iter().enumerate() {
                println!(
                    "{:>3}. {} ({}, modified {})",
                    index + 1,
                    file.name,
                    file.mime_type,
                    file.modified_time
                );
            }
            console.files = files;
        }
        AppEvent::DocumentLoaded {
            name,
            mime_type,
            content,
            zoom,
        } => {
            if mime_type == "text/plain" {
                println!("--- {name} (zoom {zoom}%) ---");
                println!("{content}");
                console.document = Some(content);
            } else {
                println!("Opened {name} ({mime_type}, {} base64 chars)", content.len());
                console.document = None;
            }
        }

        AppEvent::PopupOpened { word, origin } => {
            println!("[popup @ {},{}] {word}: translating...", origin.0, origin.1);
        }
        AppEvent::TranslationResolved(view) => {
            println!("[popup] {} -> {}", view.word, view.word_translation);
            if let Some(pronunciation) = &view.pronunciation {
                println!("        {pronunciation}");
            }
            if let Some(part_of_speech) = &view.part_of_speech {
                println!("        ({part_of_speech})");
            }
            if let Some(sentence) = &view.sentence_translation {
                println!("        sentence: {sentence}");
            }
            if let Some(notes) = &view.notes {
                println!("        note: {notes}");
            }
            println!("        'save' to keep it, 'close' to dismiss");
        }
        AppEvent::TranslationFailed { message } => {
            println!("[popup] {message}");
        }

        AppEvent::WordsListed(words) => {
            if words.is_empty() {
                println!("No words saved yet.");
            }
            for (index, word) in words.iter().enumerate() {
                let tags = word
                    .tags
                    .iter()
                    .map(|tag| tag.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                let tags = if tags.is_empty() {
                    String::new()
                } else {
                    format!("  [{tags}]")
                };
                println!(
                    "{:>3}. {} -> {}{}",
                    index + 1,
                    word.word,
                    word.translation.as_deref().unwrap_or("-"),
                    tags
                );
            }
            console.words = words;
        }
        AppEvent::TagsListed(tags) => {
            if tags.is_empty() {
                println!("No tags yet.");
            }
            for tag in &tags {
                println!("  {} ({})", tag.name, tag.color);
            }
            console.tags = tags;
        }

        AppEvent::ExportWritten { path, count } => {
            println!("Wrote {count} words to {}", path.display());
        }
        AppEvent::StatusUpdate { message, level } => match level {
            StatusLevel::Info => println!("{message}"),
            StatusLevel::Error => println!("error: {message}"),
        },

        // WordSaved rides with a status toast; intents never arrive here
        _ => {}
    }

    false
}

/// Parse one input line against the current snapshots. Pure, so the
/// command grammar is testable without a terminal.
pub fn parse_command(line: &str, console: &ConsoleState) -> Result<Command, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Command::Nothing);
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    match head {
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Event(AppEvent::UiEvent(UiEvent::Close))),

        "files" => Ok(Command::Event(AppEvent::ListFiles)),
        "open" => {
            let file_id = resolve_file(console, rest)?;
            Ok(Command::Event(AppEvent::OpenDocument { file_id }))
        }
        "upload" => {
            if rest.is_empty() {
                return Err("usage: upload PATH".to_string());
            }
            Ok(Command::Upload(PathBuf::from(rest)))
        }

        "select" => {
            if rest.is_empty() {
                return Err("usage: select TEXT".to_string());
            }
            // Without a loaded text document the selection is its own
            // block; sentence lookup then falls back to the selection
            let block_text = console.document.clone().unwrap_or_else(|| rest.to_string());
            Ok(Command::Event(AppEvent::TextSelected {
                raw_text: rest.to_string(),
                block_text,
                anchor: glossa_types::PopupAnchor { x: 0, y: 0 },
            }))
        }
        "save" => Ok(Command::Event(AppEvent::SaveWord)),
        "close" => Ok(Command::Event(AppEvent::ClosePopup)),

        "words" => Ok(Command::Event(AppEvent::ListWords)),
        "tags" => Ok(Command::Event(AppEvent::ListTags)),
        "tag" => parse_tag_command(rest, console),
        "word" => match rest.split_once(char::is_whitespace) {
            Some(("del", index)) => {
                let word_id = resolve_word(console, index.trim())?;
                Ok(Command::Event(AppEvent::DeleteWord { word_id }))
            }
            _ => Err("usage: word del N".to_string()),
        },

        "export" => parse_export_command(rest, console),

        "zoom" => match rest {
            "in" => Ok(Command::Event(AppEvent::ZoomIn)),
            "out" => Ok(Command::Event(AppEvent::ZoomOut)),
            "reset" => Ok(Command::Event(AppEvent::ZoomReset)),
            _ => Err("usage: zoom in|out|reset".to_string()),
        },

        other => Err(format!("Unknown command: {other}. Type 'help' for commands.")),
    }
}

fn parse_tag_command(rest: &str, console: &ConsoleState) -> Result<Command, String> {
    let usage = "usage: tag new NAME [COLOR] | tag del NAME | tag add N NAME | tag rm N NAME";

    let (sub, args) = match rest.split_once(char::is_whitespace) {
        Some((sub, args)) => (sub, args.trim()),
        None => return Err(usage.to_string()),
    };

    match sub {
        "new" => {
            let mut parts = args.split_whitespace();
            let name = parts.next().ok_or_else(|| usage.to_string())?;
            let color = parts.next().map(str::to_string);
            Ok(Command::Event(AppEvent::CreateTag {
                name: name.to_string(),
                color,
            }))
        }
        "del" => {
            let tag_id = resolve_tag(console, args)?;
            Ok(Command::Event(AppEvent::DeleteTag { tag_id }))
        }
        "add" | "rm" => {
            let mut parts = args.split_whitespace();
            let index = parts.next().ok_or_else(|| usage.to_string())?;
            let name = parts.next().ok_or_else(|| usage.to_string())?;

            let word_id = resolve_word(console, index)?;
            let tag_id = resolve_tag(console, name)?;

            let event = if sub == "add" {
                AppEvent::TagWord { word_id, tag_id }
            } else {
                AppEvent::UntagWord { word_id, tag_id }
            };
            Ok(Command::Event(event))
        }
        _ => Err(usage.to_string()),
    }
}

fn parse_export_command(rest: &str, console: &ConsoleState) -> Result<Command, String> {
    let usage = "usage: export csv|anki DIR [tag NAME] [bare]";

    let mut parts = rest.split_whitespace();
    let format = match parts.next() {
        Some("csv") => ExportFormat::Csv,
        Some("anki") => ExportFormat::Anki,
        _ => return Err(usage.to_string()),
    };
    let dir = parts.next().ok_or_else(|| usage.to_string())?;

    let mut tag_id = None;
    let mut include_context = true;
    while let Some(option) = parts.next() {
        match option {
            "tag" => {
                let name = parts.next().ok_or_else(|| usage.to_string())?;
                tag_id = Some(resolve_tag(console, name)?);
            }
            "bare" => include_context = false,
            other => return Err(format!("Unknown export option: {other}")),
        }
    }

    Ok(Command::Event(AppEvent::ExportVocabulary {
        format,
        tag_id,
        include_context,
        dest: PathBuf::from(dir),
    }))
}

fn resolve_file(console: &ConsoleState, token: &str) -> Result<String, String> {
    let index: usize = token
        .parse()
        .map_err(|_| format!("Not a file number: '{token}'"))?;

    console
        .files
        .get(index.wrapping_sub(1))
        .map(|file| file.id.clone())
        .ok_or_else(|| format!("No file {index}; run 'files' first"))
}

fn resolve_word(console: &ConsoleState, token: &str) -> Result<uuid::Uuid, String> {
    let index: usize = token
        .parse()
        .map_err(|_| format!("Not a word number: '{token}'"))?;

    console
        .words
        .get(index.wrapping_sub(1))
        .map(|word| word.id)
        .ok_or_else(|| format!("No word {index}; run 'words' first"))
}

fn resolve_tag(console: &ConsoleState, name: &str) -> Result<uuid::Uuid, String> {
    console
        .tags
        .iter()
        .find(|tag| tag.name == name)
        .map(|tag| tag.id)
        .ok_or_else(|| format!("No tag named '{name}'; run 'tags' first"))
}

fn print_help() {
    println!("commands:");
    println!("  files                      list Drive documents");
    println!("  open N                     open document N from the listing");
    println!("  upload PATH                upload a local .txt or .pdf to Drive");
    println!("  select TEXT                look up a selection from the open document");
    println!("  save                       save the popup's word to vocabulary");
    println!("  close                      dismiss the popup");
    println!("  words                      list saved words");
    println!("  tags                       list tags");
    println!("  tag new NAME [COLOR]       create a tag");
    println!("  tag del NAME               delete a tag");
    println!("  tag add N NAME             tag word N");
    println!("  tag rm N NAME              untag word N");
    println!("  word del N                 delete word N");
    println!("  export csv|anki DIR [tag NAME] [bare]");
    println!("                             export vocabulary; 'bare' drops context");
    println!("  zoom in|out|reset          adjust the reader zoom");
    println!("  quit                       exit");
}
