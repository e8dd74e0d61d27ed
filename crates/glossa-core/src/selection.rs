/// A user text selection resolved to the word being looked up and the
/// sentence around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The trimmed selected text
    pub raw_text: String,
    /// First whitespace-delimited token of the selection
    pub word: String,
    /// First sentence of the containing block that holds the selection,
    /// or the selection itself when no sentence does
    pub sentence: String,
}

/// Selections at or above this length are lookups nobody meant to make.
pub const MAX_SELECTION_CHARS: usize = 100;

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Derive a [`Selection`] from the raw selected text and the full text of
/// its containing block. Returns `None` for empty or over-long selections;
/// no popup should open in that case.
pub fn extract(raw_selection: &str, block_text: &str) -> Option<Selection> {
    let trimmed = raw_selection.trim();

    if trimmed.is_empty() || trimmed.chars().count() >= MAX_SELECTION_CHARS {
        return None;
    }

    let word = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_string();

    Some(Selection {
        raw_text: trimmed.to_string(),
        word,
        sentence: enclosing_sentence(trimmed, block_text),
    })
}

/// First terminator-delimited segment of `block_text` containing the
/// selection. The comparison is case-insensitive: the rendered block may
/// capitalize what the user selected in lowercase.
fn enclosing_sentence(selection: &str, block_text: &str) -> String {
    let needle = selection.to_lowercase();

    block_text
        .split(SENTENCE_TERMINATORS)
        .find(|segment| segment.to_lowercase().contains(&needle))
        .map(|segment| segment.trim().to_string())
        .unwrap_or_else(|| selection.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_word_and_sentence() {
        let selection = extract("the quick fox", "The quick fox jumps. It was brown.").unwrap();

        assert_eq!(selection.word, "the");
        assert_eq!(selection.sentence, "The quick fox jumps");
        assert_eq!(selection.raw_text, "the quick fox");
    }

    #[test]
    fn word_is_first_token_only() {
        let selection = extract("quick   fox jumps", "nothing here").unwrap();
        assert_eq!(selection.word, "quick");
    }

    #[test]
    fn rejects_empty_and_whitespace_selections() {
        assert!(extract("", "Some block.").is_none());
        assert!(extract("   \n\t", "Some block.").is_none());
    }

    #[test]
    fn rejects_selections_at_the_length_bound() {
        let block = "irrelevant";
        let at_limit = "x".repeat(100);
        let under_limit = "y".repeat(99);

        assert!(extract(&at_limit, block).is_none());
        assert!(extract(&under_limit, block).is_some());
    }

    #[test]
    fn length_bound_counts_chars_not_bytes() {
        let selection = "é".repeat(99);
        assert!(extract(&selection, "").is_some());
    }

    #[test]
    fn falls_back_to_selection_without_terminators() {
        let selection = extract("  brown fox  ", "no terminators anywhere").unwrap();
        assert_eq!(selection.sentence, "brown fox");
    }

    #[test]
    fn falls_back_when_no_sentence_contains_the_selection() {
        let selection = extract("zebra", "The quick fox jumps. It was brown.").unwrap();
        assert_eq!(selection.sentence, "zebra");
    }

    #[test]
    fn picks_the_first_matching_sentence() {
        let block = "A fox appears! The fox runs. Another fox sleeps.";
        let selection = extract("fox", block).unwrap();
        assert_eq!(selection.sentence, "A fox appears");
    }

    #[test]
    fn empty_segments_from_consecutive_terminators_never_match() {
        let selection = extract("wait", "What?! Wait... wait!").unwrap();
        assert_eq!(selection.sentence, "Wait");
    }

    #[test]
    fn question_and_exclamation_terminate_sentences() {
        let block = "Is it here? It is here! It stays.";
        let selection = extract("stays", block).unwrap();
        assert_eq!(selection.sentence, "It stays");
    }
}
