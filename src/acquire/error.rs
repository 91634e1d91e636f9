//! Diagnostic error types for the Acquirer.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from mirror acquisition.
///
/// Per-item fetch failures are logged and skipped by the batch loops; these
/// types exist so the individual fetch helpers can propagate cleanly to the
/// call site that decides to skip.
#[derive(Debug, Error, Diagnostic)]
pub enum AcquireError {
    #[error("fetch failed for \"{url}\": {message}")]
    #[diagnostic(
        code(bayaz::acquire::fetch),
        help(
            "Check that the URL is reachable and the network is available. \
             Re-running the batch retries only the missing items."
        )
    )]
    Fetch { url: String, message: String },

    #[error("failed to write mirror file: {path}")]
    #[diagnostic(
        code(bayaz::acquire::write_mirror),
        help("Check that the mirror directory exists and has write permissions.")
    )]
    WriteMirror {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] crate::paths::PathError),
}

/// Convenience alias for acquisition results.
pub type AcquireResult<T> = std::result::Result<T, AcquireError>;
