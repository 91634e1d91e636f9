//! Post-run verification of persisted curation outputs.
//!
//! Reloads the archive and the retrieval set and cross-checks them: every
//! retrieval record must correspond to an archived poem, and the language
//! distribution makes silent data loss visible at a glance.

use std::collections::{BTreeMap, BTreeSet};

use crate::curate::error::{CurateError, CurateResult};
use crate::curate::model::{FullCorpus, RetrievalRecord};
use crate::paths::CorpusPaths;

/// Cross-check report over a persisted output pair.
#[derive(Debug)]
pub struct CorpusReport {
    pub archived_books: usize,
    pub archived_poems: usize,
    pub retrieval_records: usize,
    /// Archived poem ids with no retrieval record; expected for poems that
    /// failed target-language filtering.
    pub not_retrievable: Vec<String>,
    /// Retrieval record ids missing from the archive. Always a defect.
    pub missing_from_archive: Vec<String>,
    /// Language → number of archived poems carrying that language.
    pub language_counts: BTreeMap<String, usize>,
}

impl CorpusReport {
    /// A healthy output pair has every retrieval record backed by the archive.
    pub fn is_consistent(&self) -> bool {
        self.missing_from_archive.is_empty()
    }
}

/// Reload both persisted outputs.
pub fn load_outputs(paths: &CorpusPaths) -> CurateResult<(FullCorpus, Vec<RetrievalRecord>)> {
    let corpus: FullCorpus = read_json(&paths.corpus_full_file())?;
    let records: Vec<RetrievalRecord> = read_json(&paths.corpus_rag_file())?;
    Ok((corpus, records))
}

/// Cross-check the retrieval set against the archive.
pub fn verify(corpus: &FullCorpus, records: &[RetrievalRecord]) -> CorpusReport {
    let archived: BTreeSet<&str> = corpus.poems.iter().map(|p| p.id.as_str()).collect();
    let retrievable: BTreeSet<&str> = records.iter().map(|r| r.poem_id.as_str()).collect();

    let mut language_counts = BTreeMap::new();
    for poem in &corpus.poems {
        for lang in &poem.languages {
            *language_counts.entry(lang.clone()).or_insert(0) += 1;
        }
    }

    CorpusReport {
        archived_books: corpus.books.len(),
        archived_poems: corpus.poems.len(),
        retrieval_records: records.len(),
        not_retrievable: archived
            .difference(&retrievable)
            .map(|id| id.to_string())
            .collect(),
        missing_from_archive: retrievable
            .difference(&archived)
            .map(|id| id.to_string())
            .collect(),
        language_counts,
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> CurateResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| CurateError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| CurateError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
