//! Poem document parsing and normalization.
//!
//! The source documents use the corpus's own field names (`sher` for a verse,
//! `sherContent` for its per-language renditions); these are mapped onto the
//! curated model and the distinct language list is aggregated while walking
//! the structure.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::curate::error::{CurateError, CurateResult};
use crate::curate::manifest::LangText;
use crate::curate::model::{LangMap, Note, Poem, Verse, VerseContent};

/// Raw poem document.
#[derive(Debug, Deserialize)]
pub struct RawPoemDoc {
    /// Multilingual poem descriptions.
    #[serde(default)]
    pub description: Vec<LangText>,
    /// Ordered verses.
    #[serde(rename = "sher", default)]
    pub verses: Vec<RawVerse>,
}

/// One verse with its per-language renditions.
#[derive(Debug, Deserialize)]
pub struct RawVerse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "sherContent", default)]
    pub content: Vec<RawVerseContent>,
}

/// One language's rendition of a verse.
#[derive(Debug, Deserialize)]
pub struct RawVerseContent {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub notes: Vec<RawNote>,
}

/// A phrase annotation on a verse rendition.
#[derive(Debug, Deserialize)]
pub struct RawNote {
    #[serde(default)]
    pub phrase: Option<String>,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(rename = "occurrence", default)]
    pub occurrences: Option<u32>,
}

/// Parse a poem document from disk.
pub fn load_poem_doc(path: &Path) -> CurateResult<RawPoemDoc> {
    let content = std::fs::read_to_string(path).map_err(|e| CurateError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|e| CurateError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Standardize a phrase annotation. Occurrence count defaults to 1.
pub fn process_note(raw: &RawNote) -> Note {
    Note {
        phrase: raw.phrase.clone().unwrap_or_default(),
        meaning: raw.meaning.clone().unwrap_or_default(),
        occurrences: raw.occurrences.unwrap_or(1),
    }
}

/// Normalize one verse into its language-keyed form.
pub fn process_verse(raw: &RawVerse) -> Verse {
    let mut content = BTreeMap::new();
    for entry in &raw.content {
        let lang = entry.lang.clone().unwrap_or_else(|| "unknown".into());
        content.insert(
            lang,
            VerseContent {
                text: entry.text.clone().unwrap_or_default(),
                notes: entry.notes.iter().map(process_note).collect(),
            },
        );
    }
    Verse {
        id: raw.id.clone().unwrap_or_default(),
        content,
    }
}

/// Assemble the raw archival poem structure from a parsed document and its
/// resolved section back-reference.
pub fn build_poem(
    poem_id: &str,
    book_id: &str,
    book_title: &str,
    section: (Option<u32>, Option<String>),
    doc: &RawPoemDoc,
) -> Poem {
    let mut descriptions = LangMap::new();
    let mut languages: Vec<String> = Vec::new();

    for entry in &doc.description {
        let lang = entry.lang.clone().unwrap_or_else(|| "unknown".into());
        if !languages.contains(&lang) {
            languages.push(lang.clone());
        }
        descriptions.insert(lang, entry.text.clone().unwrap_or_default());
    }

    let mut verses = Vec::with_capacity(doc.verses.len());
    for raw_verse in &doc.verses {
        for entry in &raw_verse.content {
            let lang = entry.lang.clone().unwrap_or_else(|| "unknown".into());
            if !languages.contains(&lang) {
                languages.push(lang);
            }
        }
        verses.push(process_verse(raw_verse));
    }

    let (section_id, section_title) = section;
    Poem {
        id: poem_id.to_string(),
        book_id: book_id.to_string(),
        book_title: book_title.to_string(),
        section_id,
        section_title,
        languages,
        descriptions,
        verses,
    }
}
