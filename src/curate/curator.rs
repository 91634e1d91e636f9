//! Curation orchestration: local mirror in, archive + retrieval set out.
//!
//! The batch never aborts on a bad document: a malformed manifest skips that
//! book, a malformed poem skips that poem, and a missing poem directory is a
//! logged warning. Aggregates are threaded through explicitly rather than
//! accumulated in shared mutable state.

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::curate::error::{CurateError, CurateResult};
use crate::curate::flatten::flatten_for_rag;
use crate::curate::manifest::{self, SectionIndex};
use crate::curate::model::{Book, CorpusMetadata, FullCorpus, Poem, RetrievalRecord};
use crate::curate::poem;
use crate::paths::{CorpusPaths, book_id_for_ordinal};

/// Everything one curation run produces.
#[derive(Debug)]
pub struct CurationOutcome {
    /// The authoritative archive: all books plus raw multilingual poems.
    pub corpus: FullCorpus,
    /// The derived, lossy, retrieval-ready view.
    pub records: Vec<RetrievalRecord>,
}

/// Transforms the local mirror into the full corpus and retrieval record set.
pub struct Curator {
    paths: CorpusPaths,
    target_lang: String,
}

impl Curator {
    pub fn new(paths: CorpusPaths, target_lang: impl Into<String>) -> Self {
        Self {
            paths,
            target_lang: target_lang.into(),
        }
    }

    /// Parse and resolve one book's manifest.
    ///
    /// A malformed manifest propagates as a `Parse` error; the caller logs it
    /// and skips the book without aborting the batch.
    pub fn load_book(&self, book_id: &str) -> CurateResult<Book> {
        let raw = manifest::load_manifest(&self.paths.manifest_path(book_id))?;

        let (titles, english) = manifest::resolve_titles(&raw.name);
        let primary_title = english.unwrap_or_else(|| format!("book_{book_id}"));
        let sections = manifest::resolve_sections(&raw.sections);
        let total_poems = sections.iter().map(|s| s.poems.len()).sum();

        Ok(Book {
            id: book_id.to_string(),
            titles,
            primary_title,
            total_sections: sections.len(),
            total_poems,
            sections,
        })
    }

    /// Load, normalize and flatten every poem document under a book's
    /// directory, in sorted filename order.
    ///
    /// Returns the raw archival poems and the retrieval records of those that
    /// survived target-language filtering. Per-poem failures are logged and
    /// excluded; a missing directory yields empty results.
    pub fn load_poems(&self, book: &Book) -> (Vec<Poem>, Vec<RetrievalRecord>) {
        let dir = self.paths.book_poems_dir(&book.id);
        if !dir.is_dir() {
            warn!(
                book_id = %book.id,
                book_title = %book.primary_title,
                "missing poem directory for book"
            );
            return (Vec::new(), Vec::new());
        }

        let mut files: Vec<PathBuf> = match std::fs::read_dir(&dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "yaml"))
                .collect(),
            Err(e) => {
                warn!(book_id = %book.id, "cannot read poem directory: {e}");
                return (Vec::new(), Vec::new());
            }
        };
        files.sort();

        let index = SectionIndex::build(&book.sections);
        let mut poems = Vec::new();
        let mut records = Vec::new();

        for path in files {
            let poem_id = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            match self.load_poem(&path, &poem_id, book, &index) {
                Ok((poem, record)) => {
                    poems.push(poem);
                    if let Some(record) = record {
                        records.push(record);
                    }
                }
                Err(e) => error!(%poem_id, book_id = %book.id, "failed processing poem: {e}"),
            }
        }

        (poems, records)
    }

    fn load_poem(
        &self,
        path: &std::path::Path,
        poem_id: &str,
        book: &Book,
        index: &SectionIndex,
    ) -> CurateResult<(Poem, Option<RetrievalRecord>)> {
        let doc = poem::load_poem_doc(path)?;
        let section = index.lookup(poem_id);
        let poem = poem::build_poem(poem_id, &book.id, &book.primary_title, section, &doc);
        let record = flatten_for_rag(&poem, &self.target_lang);
        Ok((poem, record))
    }

    /// Run the full curation batch over book ordinals `1..=book_count`.
    ///
    /// Always completes; books with missing or malformed manifests are logged
    /// and skipped. Summary counts are computed at the end: `total_books` is
    /// the number of processed manifests, `total_poems` the number of poems
    /// that flattened into retrieval records.
    pub fn curate(&self, book_count: u32) -> CurationOutcome {
        let mut books = Vec::new();
        let mut poems = Vec::new();
        let mut records = Vec::new();

        for ordinal in 1..=book_count {
            let book_id = book_id_for_ordinal(ordinal);
            if !self.paths.manifest_path(&book_id).exists() {
                debug!(%book_id, "no local manifest, skipping book");
                continue;
            }

            match self.load_book(&book_id) {
                Ok(book) => {
                    let (book_poems, book_records) = self.load_poems(&book);
                    debug!(
                        %book_id,
                        sections = book.total_sections,
                        poems = book_poems.len(),
                        retrieval_ready = book_records.len(),
                        "processed book"
                    );
                    poems.extend(book_poems);
                    records.extend(book_records);
                    books.push(book);
                }
                Err(e) => error!(%book_id, "skipping malformed book manifest: {e}"),
            }
        }

        let metadata = CorpusMetadata {
            total_books: books.len(),
            total_poems: records.len(),
        };
        info!(
            total_books = metadata.total_books,
            total_poems = metadata.total_poems,
            "curation complete"
        );

        CurationOutcome {
            corpus: FullCorpus {
                metadata,
                books,
                poems,
            },
            records,
        }
    }

    /// Persist both outputs as pretty-printed JSON.
    pub fn persist(&self, outcome: &CurationOutcome) -> CurateResult<()> {
        write_json(&self.paths.corpus_full_file(), &outcome.corpus)?;
        write_json(&self.paths.corpus_rag_file(), &outcome.records)?;
        info!(
            archive = %self.paths.corpus_full_file().display(),
            retrieval_set = %self.paths.corpus_rag_file().display(),
            "saved {} retrieval-ready poems",
            outcome.records.len()
        );
        Ok(())
    }
}

fn write_json<T: serde::Serialize>(path: &std::path::Path, value: &T) -> CurateResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CurateError::WriteOutput {
        path: path.display().to_string(),
        source: std::io::Error::other(e),
    })?;
    std::fs::write(path, json).map_err(|e| CurateError::WriteOutput {
        path: path.display().to_string(),
        source: e,
    })
}
