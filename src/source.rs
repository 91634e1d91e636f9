//! Remote corpus source registry.
//!
//! Sources are addressed by name. Only sources that publish the structured
//! per-book / per-poem YAML layout can be mirrored; asking for anything else
//! is an operator error and aborts the run.

use miette::Diagnostic;
use thiserror::Error;

/// Known sources with the structured `lists/` + `poems/` YAML layout.
const SOURCES: &[(&str, &str)] = &[(
    "github_iqbal_demystified",
    "https://raw.githubusercontent.com/AzeemGhumman/iqbal-demystified-dataset/master/data",
)];

/// The source used when none is configured.
pub const DEFAULT_SOURCE: &str = "github_iqbal_demystified";

/// Errors from source resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("unsupported source: \"{name}\"")]
    #[diagnostic(
        code(bayaz::source::unsupported),
        help("Supported sources: github_iqbal_demystified.")
    )]
    Unsupported { name: String },
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// A resolved remote source the Acquirer can mirror.
#[derive(Debug, Clone)]
pub struct CorpusSource {
    pub name: String,
    pub base_url: String,
}

impl CorpusSource {
    /// Look up a source by name. Unknown names are fatal.
    pub fn lookup(name: &str) -> SourceResult<Self> {
        SOURCES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(n, url)| Self {
                name: (*n).to_string(),
                base_url: (*url).to_string(),
            })
            .ok_or_else(|| SourceError::Unsupported { name: name.into() })
    }

    /// A source with an explicit base URL, for mirrors and tests.
    pub fn with_base_url(name: &str, base_url: &str) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of a book's manifest document.
    pub fn manifest_url(&self, book_id: &str) -> String {
        format!("{}/lists/List_{book_id}.yaml", self.base_url)
    }

    /// URL of a single poem document.
    pub fn poem_url(&self, book_id: &str, poem_id: &str) -> String {
        format!("{}/poems/{book_id}/{poem_id}.yaml", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_source() {
        let source = CorpusSource::lookup(DEFAULT_SOURCE).unwrap();
        assert_eq!(source.name, "github_iqbal_demystified");
        assert!(source.base_url.starts_with("https://"));
    }

    #[test]
    fn lookup_unknown_source_is_an_error() {
        let err = CorpusSource::lookup("rekhta").unwrap_err();
        assert!(matches!(err, SourceError::Unsupported { .. }));
    }

    #[test]
    fn urls_follow_corpus_layout() {
        let source = CorpusSource::with_base_url("test", "http://localhost:8080/data/");
        assert_eq!(
            source.manifest_url("002"),
            "http://localhost:8080/data/lists/List_002.yaml"
        );
        assert_eq!(
            source.poem_url("002", "017"),
            "http://localhost:8080/data/poems/002/017.yaml"
        );
    }
}
