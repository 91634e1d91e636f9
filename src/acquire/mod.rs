//! The Acquirer: populates a local mirror of manifest and poem documents
//! from a remote source, idempotently.
//!
//! Restart safety comes entirely from the on-disk skip-if-exists check.
//! There is no checkpointing; an interrupted batch is simply re-run.

pub mod error;
pub mod fetcher;

pub use error::{AcquireError, AcquireResult};
pub use fetcher::{AcquireReport, FetchOptions, Fetcher};
