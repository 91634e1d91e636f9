//! Curated data types: the full archive and the retrieval-ready projection.
//!
//! Multilingual fields are language-keyed maps (`BTreeMap` for deterministic
//! serialization). A poem's section fields are weak back-references resolved
//! at curation time from the owning book's membership lists, never stored in
//! the source documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Language code → text, e.g. `{"en": "...", "ur": "...", "fa": "..."}`.
pub type LangMap = BTreeMap<String, String>;

/// An annotation on a verse explaining a phrase's meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub phrase: String,
    pub meaning: String,
    /// How many times the phrase occurs in the verse.
    pub occurrences: u32,
}

/// One language's rendition of a verse, with its annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseContent {
    pub text: String,
    #[serde(default)]
    pub notes: Vec<Note>,
}

/// An atomic unit of poem content, multilingual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub id: String,
    pub content: BTreeMap<String, VerseContent>,
}

/// Lightweight poem listing inside a section (id + titles, no content).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPoem {
    pub id: String,
    pub titles: LangMap,
    /// Distinct languages seen in the title entries, in source order.
    pub languages: Vec<String>,
}

/// A named grouping of poems within a book, positionally ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// 1-based position within the book.
    pub id: u32,
    pub titles: LangMap,
    pub poems: Vec<SectionPoem>,
    /// Membership list, the only structural poem → section signal.
    pub poem_ids: Vec<String>,
}

/// A processed book manifest with resolved sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub titles: LangMap,
    /// English title, or a synthesized `book_<id>` placeholder.
    pub primary_title: String,
    pub sections: Vec<Section>,
    pub total_sections: usize,
    /// Poems listed across all section membership lists.
    pub total_poems: usize,
}

/// The raw, pre-filter, multilingual poem structure kept in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    pub id: String,
    pub book_id: String,
    pub book_title: String,
    /// Resolved by membership lookup; `None` when no section lists the poem.
    pub section_id: Option<u32>,
    pub section_title: Option<String>,
    /// Distinct languages across descriptions and verses, in source order.
    pub languages: Vec<String>,
    pub descriptions: LangMap,
    pub verses: Vec<Verse>,
}

/// The flattened, target-language-filtered projection of a poem.
///
/// This is the sole contract the downstream retrieval indexer depends on:
/// `full_text` is the embeddable content, everything else is filterable or
/// citable metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalRecord {
    pub poem_id: String,
    pub book_id: String,
    pub book_title: String,
    pub section_id: Option<u32>,
    pub section_title: Option<String>,
    /// Target-language description + newline-joined verse texts.
    pub full_text: String,
    /// Per-verse target-language texts, in verse order.
    pub text_blocks: Vec<String>,
    /// `"phrase: meaning"` strings from target-language notes.
    pub phrases: Vec<String>,
}

/// Summary counts attached to the archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusMetadata {
    /// Books whose manifests were processed.
    pub total_books: usize,
    /// Poems that flattened into retrieval records.
    pub total_poems: usize,
}

/// The complete aggregate of processed books and raw poems.
///
/// The `poems` list holds the raw multilingual structures for archival
/// completeness; the retrieval record set is a derived, lossy view persisted
/// separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullCorpus {
    pub metadata: CorpusMetadata,
    pub books: Vec<Book>,
    pub poems: Vec<Poem>,
}
