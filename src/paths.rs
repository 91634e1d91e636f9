//! On-disk layout for the corpus mirror and curated outputs.
//!
//! The Acquirer writes into `{data_root}/{source}/lists/` and
//! `{data_root}/{source}/poems/{book_id}/`; the Curator reads the same tree
//! and writes its two JSON outputs into the output directory.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Errors from path resolution and directory creation.
#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("failed to create directory: {path}")]
    #[diagnostic(
        code(bayaz::paths::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type PathResult<T> = std::result::Result<T, PathError>;

/// Directory layout for one corpus source.
#[derive(Debug, Clone)]
pub struct CorpusPaths {
    /// `{data_root}/{source}/`
    pub mirror_root: PathBuf,
    /// `mirror_root/lists/` — one manifest file per book
    pub lists_dir: PathBuf,
    /// `mirror_root/poems/` — one subdirectory per book
    pub poems_dir: PathBuf,
    /// Curated outputs (`corpus_full.json`, `corpus_rag.json`)
    pub output_dir: PathBuf,
}

impl CorpusPaths {
    /// Derive the mirror layout for a named source under a data root.
    pub fn resolve(
        data_root: impl AsRef<Path>,
        source_name: &str,
        output_dir: impl AsRef<Path>,
    ) -> Self {
        let mirror_root = data_root.as_ref().join(source_name);
        Self {
            lists_dir: mirror_root.join("lists"),
            poems_dir: mirror_root.join("poems"),
            mirror_root,
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Create the mirror and output directories. Idempotent.
    ///
    /// An uncreatable directory is fatal to the run, so this is the one
    /// filesystem failure that propagates instead of being logged and skipped.
    pub fn ensure_dirs(&self) -> PathResult<()> {
        for dir in [
            &self.mirror_root,
            &self.lists_dir,
            &self.poems_dir,
            &self.output_dir,
        ] {
            std::fs::create_dir_all(dir).map_err(|e| PathError::CreateDir {
                path: dir.display().to_string(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Path to a book's manifest file, e.g. `lists/List_003.yaml`.
    pub fn manifest_path(&self, book_id: &str) -> PathBuf {
        self.lists_dir.join(format!("List_{book_id}.yaml"))
    }

    /// Path to a book's poem directory, e.g. `poems/003/`.
    pub fn book_poems_dir(&self, book_id: &str) -> PathBuf {
        self.poems_dir.join(book_id)
    }

    /// Path to a single poem document, e.g. `poems/003/042.yaml`.
    pub fn poem_path(&self, book_id: &str, poem_id: &str) -> PathBuf {
        self.book_poems_dir(book_id).join(format!("{poem_id}.yaml"))
    }

    /// Path to the full corpus archive output.
    pub fn corpus_full_file(&self) -> PathBuf {
        self.output_dir.join("corpus_full.json")
    }

    /// Path to the retrieval record set output.
    pub fn corpus_rag_file(&self) -> PathBuf {
        self.output_dir.join("corpus_rag.json")
    }
}

/// Render a 1-based book ordinal as the corpus's zero-padded 3-digit id.
pub fn book_id_for_ordinal(ordinal: u32) -> String {
    format!("{ordinal:03}")
}
