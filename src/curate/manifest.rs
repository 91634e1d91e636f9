//! Book manifest parsing and cross-reference resolution.
//!
//! The source format interleaves section headers and poem-membership lists as
//! a flat sequence rather than nesting them, so section boundaries are
//! recovered by run-length grouping: a `sectionName` entry closes the
//! previous section and opens a new one, and `poems` entries attach to the
//! currently open section.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::curate::error::{CurateError, CurateResult};
use crate::curate::model::{LangMap, Section, SectionPoem};

/// One multilingual text entry, `{lang, text}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LangText {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Raw book manifest document.
#[derive(Debug, Deserialize)]
pub struct RawManifest {
    /// Multilingual book titles.
    #[serde(default)]
    pub name: Vec<LangText>,
    /// Flat interleaved sequence of section headers and poem lists.
    #[serde(default)]
    pub sections: Vec<RawSectionEntry>,
}

/// One entry of the flat `sections` sequence. May carry a section header,
/// a poem-membership list, or both.
#[derive(Debug, Deserialize)]
pub struct RawSectionEntry {
    #[serde(rename = "sectionName", default)]
    pub section_name: Option<Vec<LangText>>,
    #[serde(default)]
    pub poems: Option<Vec<RawPoemEntry>>,
}

/// A poem-membership entry: id plus multilingual titles.
#[derive(Debug, Deserialize)]
pub struct RawPoemEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "poemName", default)]
    pub poem_name: Vec<LangText>,
}

/// Parse a manifest document from disk.
pub fn load_manifest(path: &Path) -> CurateResult<RawManifest> {
    let content = std::fs::read_to_string(path).map_err(|e| CurateError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|e| CurateError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Build the language → title map. Returns the map plus the English entry,
/// which becomes the primary title when present.
pub fn resolve_titles(entries: &[LangText]) -> (LangMap, Option<String>) {
    let mut titles = LangMap::new();
    let mut english = None;
    for entry in entries {
        let lang = entry.lang.clone().unwrap_or_else(|| "unknown".into());
        let text = entry.text.clone().unwrap_or_default();
        if lang == "en" {
            english = Some(text.clone());
        }
        titles.insert(lang, text);
    }
    (titles, english)
}

/// Flatten poem-membership entries into the section's lightweight listing.
pub fn resolve_poem_metadata(entries: &[RawPoemEntry]) -> Vec<SectionPoem> {
    entries
        .iter()
        .map(|entry| {
            let mut titles = LangMap::new();
            let mut languages = Vec::new();
            for name in &entry.poem_name {
                let lang = name.lang.clone().unwrap_or_else(|| "unknown".into());
                if !languages.contains(&lang) {
                    languages.push(lang.clone());
                }
                titles.insert(lang, name.text.clone().unwrap_or_default());
            }
            SectionPoem {
                id: entry.id.clone().unwrap_or_default(),
                titles,
                languages,
            }
        })
        .collect()
}

/// Grouping state while walking the flat entry sequence.
enum GroupingState {
    NoOpenSection,
    SectionOpen(Section),
}

/// Recover section boundaries from the flat interleaved entry sequence.
///
/// Strictly input-order dependent: each section header closes the previous
/// in-progress section, membership entries attach to the open section (and
/// are dropped when none is open), and a trailing open section is closed at
/// end of input.
pub fn resolve_sections(entries: &[RawSectionEntry]) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut state = GroupingState::NoOpenSection;

    for entry in entries {
        if let Some(names) = &entry.section_name {
            if let GroupingState::SectionOpen(section) =
                std::mem::replace(&mut state, GroupingState::NoOpenSection)
            {
                sections.push(section);
            }
            let (titles, _) = resolve_titles(names);
            state = GroupingState::SectionOpen(Section {
                id: sections.len() as u32 + 1,
                titles,
                poems: Vec::new(),
                poem_ids: Vec::new(),
            });
        }

        if let Some(poems) = &entry.poems {
            if let GroupingState::SectionOpen(section) = &mut state {
                let metadata = resolve_poem_metadata(poems);
                section.poem_ids.extend(metadata.iter().map(|p| p.id.clone()));
                section.poems.extend(metadata);
            }
        }
    }

    if let GroupingState::SectionOpen(section) = state {
        sections.push(section);
    }
    sections
}

/// Per-book lookup from poem id to owning section, built once so curation
/// stays near-linear in poem count.
///
/// The first section (in manifest order) whose membership list contains a
/// poem wins; later duplicates are ignored silently.
pub struct SectionIndex {
    by_poem: HashMap<String, (u32, Option<String>)>,
}

impl SectionIndex {
    pub fn build(sections: &[Section]) -> Self {
        let mut by_poem = HashMap::new();
        for section in sections {
            for poem_id in &section.poem_ids {
                by_poem
                    .entry(poem_id.clone())
                    .or_insert_with(|| (section.id, section.titles.get("en").cloned()));
            }
        }
        Self { by_poem }
    }

    /// Resolve a poem's owning section. `(None, None)` when unlisted.
    pub fn lookup(&self, poem_id: &str) -> (Option<u32>, Option<String>) {
        match self.by_poem.get(poem_id) {
            Some((id, title)) => (Some(*id), title.clone()),
            None => (None, None),
        }
    }
}

/// The ordered union of poem ids referenced across all of a book's sections.
///
/// Used by the Acquirer to enumerate what to fetch; duplicates across
/// sections are collapsed to the first occurrence.
pub fn poem_ids(manifest: &RawManifest) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for entry in &manifest.sections {
        if let Some(poems) = &entry.poems {
            for poem in poems {
                if let Some(id) = &poem.id {
                    if seen.insert(id.clone()) {
                        ids.push(id.clone());
                    }
                }
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(yaml: &str) -> RawManifest {
        serde_yaml::from_str(yaml).unwrap()
    }

    const TWO_SECTIONS: &str = r#"
name:
  - lang: en
    text: "The Secrets of the Self"
  - lang: fa
    text: "Asrar-i-Khudi"
sections:
  - sectionName:
      - lang: en
        text: "Intro"
  - poems:
      - id: "p1"
        poemName:
          - lang: en
            text: "Prologue"
  - sectionName:
      - lang: en
        text: "Main"
  - poems:
      - id: "p2"
        poemName:
          - lang: en
            text: "Showing that the system of the universe originates in the Self"
      - id: "p3"
        poemName:
          - lang: en
            text: "Showing that the life of the Self comes from forming ideals"
"#;

    #[test]
    fn titles_resolve_with_english_primary() {
        let raw = manifest(TWO_SECTIONS);
        let (titles, english) = resolve_titles(&raw.name);
        assert_eq!(titles.get("en").unwrap(), "The Secrets of the Self");
        assert_eq!(titles.get("fa").unwrap(), "Asrar-i-Khudi");
        assert_eq!(english.as_deref(), Some("The Secrets of the Self"));
    }

    #[test]
    fn titles_without_english_yield_no_primary() {
        let entries = vec![LangText {
            lang: Some("ur".into()),
            text: Some("بالِ جبریل".into()),
        }];
        let (titles, english) = resolve_titles(&entries);
        assert_eq!(titles.len(), 1);
        assert!(english.is_none());
    }

    #[test]
    fn sections_group_by_header_boundaries() {
        let raw = manifest(TWO_SECTIONS);
        let sections = resolve_sections(&raw.sections);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].id, 1);
        assert_eq!(sections[0].titles.get("en").unwrap(), "Intro");
        assert_eq!(sections[0].poem_ids, vec!["p1"]);
        assert_eq!(sections[1].id, 2);
        assert_eq!(sections[1].titles.get("en").unwrap(), "Main");
        assert_eq!(sections[1].poem_ids, vec!["p2", "p3"]);
    }

    #[test]
    fn resolve_sections_is_idempotent() {
        let raw = manifest(TWO_SECTIONS);
        let first = resolve_sections(&raw.sections);
        let second = resolve_sections(&raw.sections);
        assert_eq!(first, second);
    }

    #[test]
    fn header_and_poems_in_one_entry_attach_to_that_section() {
        let raw = manifest(
            r#"
sections:
  - sectionName:
      - lang: en
        text: "Combined"
    poems:
      - id: "p9"
"#,
        );
        let sections = resolve_sections(&raw.sections);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].poem_ids, vec!["p9"]);
    }

    #[test]
    fn poems_before_any_header_are_dropped() {
        let raw = manifest(
            r#"
sections:
  - poems:
      - id: "orphan"
  - sectionName:
      - lang: en
        text: "First"
"#,
        );
        let sections = resolve_sections(&raw.sections);
        assert_eq!(sections.len(), 1);
        assert!(sections[0].poem_ids.is_empty());
    }

    #[test]
    fn section_index_resolves_membership() {
        let raw = manifest(TWO_SECTIONS);
        let sections = resolve_sections(&raw.sections);
        let index = SectionIndex::build(&sections);

        assert_eq!(index.lookup("p2"), (Some(2), Some("Main".into())));
        assert_eq!(index.lookup("p1"), (Some(1), Some("Intro".into())));
        assert_eq!(index.lookup("missing"), (None, None));
    }

    #[test]
    fn duplicate_membership_resolves_to_first_section() {
        let raw = manifest(
            r#"
sections:
  - sectionName:
      - lang: en
        text: "A"
  - poems:
      - id: "dup"
  - sectionName:
      - lang: en
        text: "B"
  - poems:
      - id: "dup"
"#,
        );
        let sections = resolve_sections(&raw.sections);
        let index = SectionIndex::build(&sections);
        assert_eq!(index.lookup("dup"), (Some(1), Some("A".into())));
    }

    #[test]
    fn poem_ids_union_preserves_order_and_dedupes() {
        let raw = manifest(TWO_SECTIONS);
        assert_eq!(poem_ids(&raw), vec!["p1", "p2", "p3"]);

        let raw = manifest(
            r#"
sections:
  - sectionName:
      - lang: en
        text: "A"
  - poems:
      - id: "x"
      - id: "y"
  - poems:
      - id: "x"
"#,
        );
        assert_eq!(poem_ids(&raw), vec!["x", "y"]);
    }
}
