use unicode_normalization::UnicodeNormalization;

/// Cleanup pass applied to document text at ingestion. PDF-extracted text
/// carries ligatures and stray line breaks that would otherwise split
/// sentences across lines and defeat selection matching.
pub trait Preprocessor {
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC) folds ligatures and width variants
        let normalized: String = text.nfkc().collect();

        // Collapse CR/LF and runs of blanks to single spaces
        normalized.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_line_breaks_and_blank_runs() {
        let input = "The quick\nfox jumps.\r\n\r\nIt   was  brown.";
        let output = DefaultPreprocessor.process(input);
        assert_eq!(output, "The quick fox jumps. It was brown.");
    }

    #[test]
    fn folds_ligatures() {
        let output = DefaultPreprocessor.process("ﬁrst ﬂight");
        assert_eq!(output, "first flight");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(DefaultPreprocessor.process("   \n "), "");
    }
}
