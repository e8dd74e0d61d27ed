//! Pure export formatting. Writing the result to disk is the caller's
//! concern.

use chrono::NaiveDate;
use uuid::Uuid;

use glossa_types::ExportFormat;

use crate::types::SavedWord;

/// Tag filtering happens client-side over the already-fetched list
pub fn filter_by_tag(words: &[SavedWord], tag_id: Option<Uuid>) -> Vec<SavedWord> {
    match tag_id {
        None => words.to_vec(),
        Some(id) => words
            .iter()
            .filter(|word| word.tags.iter().any(|tag| tag.id == id))
            .cloned()
            .collect(),
    }
}

/// Spreadsheet-friendly CSV: unquoted header, every data cell quoted
/// with embedded quotes doubled
pub fn to_csv(words: &[SavedWord], include_context: bool) -> String {
    let mut lines = vec!["Word,Translation,Context,Sentence Translation,Tags".to_string()];

    for word in words {
        let context = if include_context {
            word.context_sentence.as_deref().unwrap_or("")
        } else {
            ""
        };
        let sentence_translation = if include_context {
            word.sentence_translation.as_deref().unwrap_or("")
        } else {
            ""
        };
        let tags = word
            .tags
            .iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let cells = [
            word.word.as_str(),
            word.translation.as_deref().unwrap_or(""),
            context,
            sentence_translation,
            tags.as_str(),
        ];
        lines.push(
            cells
                .iter()
                .map(|cell| quote(cell))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Anki import format: one `front<TAB>back` line per word, newlines in
/// the back converted to `<br>`
pub fn to_anki(words: &[SavedWord], include_context: bool) -> String {
    words
        .iter()
        .map(|word| {
            let mut back = word.translation.clone().unwrap_or_default();
            if include_context {
                if let Some(sentence) = &word.context_sentence {
                    back.push_str(&format!("\n\nContext: {}", sentence));
                    if let Some(translated) = &word.sentence_translation {
                        back.push_str(&format!("\n{}", translated));
                    }
                }
            }
            format!("{}\t{}", word.word, back.replace('\n', "<br>"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_file_name(format: ExportFormat, today: NaiveDate) -> String {
    match format {
        ExportFormat::Csv => format!("glossa-vocabulary-{}.csv", today.format("%Y-%m-%d")),
        ExportFormat::Anki => format!("glossa-anki-{}.txt", today.format("%Y-%m-%d")),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::Tag;

    fn word(name: &str, translation: Option<&str>) -> SavedWord {
        SavedWord {
            id: Uuid::new_v4(),
            word: name.to_string(),
            translation: translation.map(str::to_string),
            context_sentence: None,
            sentence_translation: None,
            source_file_id: None,
            source_file_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            tags: Vec::new(),
        }
    }

    fn tag(name: &str) -> Tag {
        Tag {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: Some("#F59E0B".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn csv_quotes_cells_and_joins_tag_names() {
        let mut fox = word("fox", Some("roobah"));
        fox.context_sentence = Some("The quick fox jumps.".to_string());
        fox.sentence_translation = Some("...".to_string());
        fox.tags = vec![tag("animals"), tag("chapter 1")];

        let csv = to_csv(&[fox], true);
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("Word,Translation,Context,Sentence Translation,Tags")
        );
        assert_eq!(
            lines.next(),
            Some(r#""fox","roobah","The quick fox jumps.","...","animals, chapter 1""#)
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn csv_doubles_embedded_quotes() {
        let quoted = word(r#"say "hi""#, None);
        let csv = to_csv(&[quoted], true);
        assert!(csv.contains(r#""say ""hi""""#));
    }

    #[test]
    fn csv_blanks_context_columns_when_excluded() {
        let mut fox = word("fox", Some("roobah"));
        fox.context_sentence = Some("The quick fox jumps.".to_string());

        let csv = to_csv(&[fox], false);
        assert!(csv.ends_with(r#""fox","roobah","","","""#));
    }

    #[test]
    fn anki_back_carries_context_and_sentence_translation() {
        let mut fox = word("fox", Some("roobah"));
        fox.context_sentence = Some("The quick fox jumps.".to_string());
        fox.sentence_translation = Some("roobah-e chaalaak miparad.".to_string());

        let anki = to_anki(&[fox], true);
        assert_eq!(
            anki,
            "fox\troobah<br><br>Context: The quick fox jumps.<br>roobah-e chaalaak miparad."
        );
    }

    #[test]
    fn anki_without_context_is_just_the_translation() {
        let mut fox = word("fox", Some("roobah"));
        fox.context_sentence = Some("The quick fox jumps.".to_string());

        let anki = to_anki(&[fox], false);
        assert_eq!(anki, "fox\troobah");
    }

    #[test]
    fn anki_skips_sentence_translation_without_a_context_sentence() {
        let mut fox = word("fox", Some("roobah"));
        fox.sentence_translation = Some("unused".to_string());

        let anki = to_anki(&[fox], true);
        assert_eq!(anki, "fox\troobah");
    }

    #[test]
    fn file_names_carry_the_date() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            export_file_name(ExportFormat::Csv, day),
            "glossa-vocabulary-2024-03-09.csv"
        );
        assert_eq!(
            export_file_name(ExportFormat::Anki, day),
            "glossa-anki-2024-03-09.txt"
        );
    }

    #[test]
    fn filter_keeps_only_words_carrying_the_tag() {
        let animals = tag("animals");
        let mut fox = word("fox", None);
        fox.tags = vec![animals.clone()];
        let river = word("river", None);

        let filtered = filter_by_tag(&[fox, river.clone()], Some(animals.id));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].word, "fox");

        let all = filter_by_tag(&[river], None);
        assert_eq!(all.len(), 1);
    }
}
