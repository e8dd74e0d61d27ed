use glossa_types::TranslationView;

/// Lifecycle of the translate call behind an open popup
#[derive(Debug, Clone, PartialEq)]
pub enum PopupPhase {
    Loading,
    Ready(TranslationView),
    Failed { message: String },
}

/// Save progress for the popup's record. One successful save per popup
/// instance; a failed save unlocks a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    NotSaved,
    Saving,
    Saved,
}

/// One open popup: the looked-up word, where the popup sits, and what
/// the translate call has produced so far. Replaced wholesale on every
/// new selection, dropped on close.
#[derive(Debug, Clone)]
pub struct PopupSession {
    pub word: String,
    pub sentence: String,
    pub origin: (i32, i32),
    pub phase: PopupPhase,
    pub save_state: SaveState,
}

impl PopupSession {
    pub fn open(word: String, sentence: String, origin: (i32, i32)) -> Self {
        Self {
            word,
            sentence,
            origin,
            phase: PopupPhase::Loading,
            save_state: SaveState::NotSaved,
        }
    }

    /// Later responses overwrite earlier ones; the popup shows whatever
    /// resolved last
    pub fn resolve(&mut self, view: TranslationView) {
        self.phase = PopupPhase::Ready(view);
    }

    pub fn fail(&mut self, message: String) {
        self.phase = PopupPhase::Failed { message };
    }

    /// A save may start only once the translation is in and no save has
    /// run yet for this popup
    pub fn can_save(&self) -> bool {
        matches!(self.phase, PopupPhase::Ready(_)) && self.save_state == SaveState::NotSaved
    }

    pub fn translation(&self) -> Option<&TranslationView> {
        match &self.phase {
            PopupPhase::Ready(view) => Some(view),
            _ => None,
        }
    }
}
