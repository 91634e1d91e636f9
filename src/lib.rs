// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # bayaz
//!
//! A curation pipeline that turns a scattered, multilingual poetry corpus
//! (per-book YAML manifests referencing per-poem YAML documents) into a
//! normalized, retrieval-ready record set.
//!
//! ## Architecture
//!
//! - **Acquirer** (`acquire`): populates a local mirror of manifest and poem
//!   documents over HTTP, idempotently. Existing files are never re-fetched,
//!   and individual failures never abort a batch.
//! - **Curator** (`curate`): reads the mirror, resolves book → section → poem
//!   cross-references, flattens multilingual structures into language-keyed
//!   maps, and emits a full archive plus a flat retrieval record set.
//!
//! ## Library usage
//!
//! ```no_run
//! use bayaz::curate::Curator;
//! use bayaz::paths::CorpusPaths;
//!
//! let paths = CorpusPaths::resolve("data", "github_iqbal_demystified", "data/processed");
//! let curator = Curator::new(paths, "en");
//! let outcome = curator.curate(11);
//! println!(
//!     "{} books, {} retrieval-ready poems",
//!     outcome.corpus.metadata.total_books,
//!     outcome.corpus.metadata.total_poems
//! );
//! ```

pub mod acquire;
pub mod config;
pub mod curate;
pub mod error;
pub mod paths;
pub mod pipeline;
pub mod source;
