//! Retrieval-ready flattening of curated poems.

use tracing::warn;

use crate::curate::model::{Poem, RetrievalRecord};

/// Project a poem into its flattened, target-language retrieval form.
///
/// Returns `None` when the poem has no verse with non-empty target-language
/// text; a description alone is not retrievable-worthy. Dropped poems are
/// logged so data loss is visible at the batch level.
pub fn flatten_for_rag(poem: &Poem, target_lang: &str) -> Option<RetrievalRecord> {
    let mut text_blocks = Vec::new();
    let mut phrases = Vec::new();

    for verse in &poem.verses {
        let Some(content) = verse.content.get(target_lang) else {
            continue;
        };
        if content.text.trim().is_empty() {
            continue;
        }
        text_blocks.push(content.text.clone());
        phrases.extend(
            content
                .notes
                .iter()
                .map(|note| format!("{}: {}", note.phrase, note.meaning)),
        );
    }

    if text_blocks.is_empty() {
        warn!(
            poem_id = %poem.id,
            book_id = %poem.book_id,
            "no {target_lang} verse content, poem excluded from retrieval set"
        );
        return None;
    }

    let verses_joined = text_blocks.join("\n");
    let full_text = match poem.descriptions.get(target_lang) {
        Some(description) if !description.trim().is_empty() => {
            format!("{description}\n\n{verses_joined}")
        }
        _ => verses_joined,
    };

    Some(RetrievalRecord {
        poem_id: poem.id.clone(),
        book_id: poem.book_id.clone(),
        book_title: poem.book_title.clone(),
        section_id: poem.section_id,
        section_title: poem.section_title.clone(),
        full_text,
        text_blocks,
        phrases,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::curate::model::{Note, Verse, VerseContent};

    fn verse(id: &str, lang: &str, text: &str, notes: Vec<Note>) -> Verse {
        let mut content = BTreeMap::new();
        content.insert(lang.to_string(), VerseContent {
            text: text.to_string(),
            notes,
        });
        Verse {
            id: id.to_string(),
            content,
        }
    }

    fn poem(verses: Vec<Verse>, description: Option<&str>) -> Poem {
        let mut descriptions = BTreeMap::new();
        if let Some(text) = description {
            descriptions.insert("en".to_string(), text.to_string());
        }
        Poem {
            id: "p1".into(),
            book_id: "001".into(),
            book_title: "The Secrets of the Self".into(),
            section_id: Some(2),
            section_title: Some("Main".into()),
            languages: vec!["en".into()],
            descriptions,
            verses,
        }
    }

    #[test]
    fn flattens_description_and_verses_in_order() {
        let poem = poem(
            vec![
                verse("1", "en", "First verse", vec![]),
                verse("2", "en", "Second verse", vec![Note {
                    phrase: "khudi".into(),
                    meaning: "selfhood".into(),
                    occurrences: 1,
                }]),
            ],
            Some("About the self."),
        );

        let record = flatten_for_rag(&poem, "en").unwrap();
        assert_eq!(record.full_text, "About the self.\n\nFirst verse\nSecond verse");
        assert_eq!(record.text_blocks, vec!["First verse", "Second verse"]);
        assert_eq!(record.phrases, vec!["khudi: selfhood"]);
        assert_eq!(record.section_id, Some(2));
        assert_eq!(record.section_title.as_deref(), Some("Main"));
    }

    #[test]
    fn missing_description_yields_verse_only_full_text() {
        let poem = poem(vec![verse("1", "en", "Only verse", vec![])], None);
        let record = flatten_for_rag(&poem, "en").unwrap();
        assert_eq!(record.full_text, "Only verse");
    }

    #[test]
    fn description_only_poem_is_dropped() {
        let poem = poem(vec![], Some("A description without any verse."));
        assert!(flatten_for_rag(&poem, "en").is_none());
    }

    #[test]
    fn poem_without_target_language_verses_is_dropped() {
        let poem = poem(vec![verse("1", "fa", "متن فارسی", vec![])], Some("English description."));
        assert!(flatten_for_rag(&poem, "en").is_none());
    }

    #[test]
    fn blank_verse_text_does_not_count_as_content() {
        let poem = poem(vec![verse("1", "en", "   ", vec![])], None);
        assert!(flatten_for_rag(&poem, "en").is_none());
    }

    #[test]
    fn other_languages_are_ignored_alongside_target() {
        let mut v = verse("1", "en", "English line", vec![]);
        v.content.insert("fa".into(), VerseContent {
            text: "سطر فارسی".into(),
            notes: vec![],
        });
        let record = flatten_for_rag(&poem(vec![v], None), "en").unwrap();
        assert_eq!(record.text_blocks, vec!["English line"]);
    }
}
