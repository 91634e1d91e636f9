//! Rich diagnostic error types for the bayaz pipeline.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives, providing error codes, help text, and source chains. This module
//! only provides the top-level wrapper that preserves those chains through
//! to the operator.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the bayaz pipeline.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text, source spans) through to the
/// user.
#[derive(Debug, Error, Diagnostic)]
pub enum BayazError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Acquire(#[from] crate::acquire::AcquireError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Curate(#[from] crate::curate::CurateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] crate::source::SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] crate::paths::PathError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Convenience alias for pipeline results.
pub type Result<T> = std::result::Result<T, BayazError>;
