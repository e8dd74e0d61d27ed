use glossa_config::ui::UiConfig;

/// The opened document plus its presentation state
#[derive(Debug, Clone)]
pub struct ReaderSession {
    pub file_id: String,
    pub name: String,
    pub mime_type: String,
    /// Preprocessed text for plain-text files, base64 for PDFs
    pub content: String,
    /// Percent, stepped within the configured bounds
    pub zoom: u16,
}

impl ReaderSession {
    pub fn new(file_id: String, name: String, mime_type: String, content: String) -> Self {
        Self {
            file_id,
            name,
            mime_type,
            content,
            zoom: 100,
        }
    }

    pub fn zoom_in(&mut self, ui: &UiConfig) -> u16 {
        self.zoom = (self.zoom + ui.zoom_step).min(ui.zoom_max);
        self.zoom
    }

    pub fn zoom_out(&mut self, ui: &UiConfig) -> u16 {
        self.zoom = self.zoom.saturating_sub(ui.zoom_step).max(ui.zoom_min);
        self.zoom
    }

    pub fn zoom_reset(&mut self) -> u16 {
        self.zoom = 100;
        self.zoom
    }
}
