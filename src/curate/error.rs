//! Diagnostic error types for the Curator.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from curation operations.
///
/// None of these are fatal to a curation batch: a manifest parse failure
/// skips that book, a poem parse failure skips that poem. Only output
/// persistence failures surface to the operator.
#[derive(Debug, Error, Diagnostic)]
pub enum CurateError {
    #[error("malformed document: {path}: {message}")]
    #[diagnostic(
        code(bayaz::curate::parse),
        help(
            "The YAML document could not be parsed. Delete the file and re-run \
             the fetch stage to mirror a fresh copy."
        )
    )]
    Parse { path: String, message: String },

    #[error("failed to read document: {path}")]
    #[diagnostic(
        code(bayaz::curate::read),
        help("Check that the mirror directory is intact and readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {path}")]
    #[diagnostic(
        code(bayaz::curate::write_output),
        help("Check that the output directory exists and has write permissions.")
    )]
    WriteOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] crate::paths::PathError),
}

/// Convenience alias for curation results.
pub type CurateResult<T> = std::result::Result<T, CurateError>;
