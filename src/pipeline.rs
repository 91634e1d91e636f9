//! Batch pipeline composition: acquisition followed by curation.
//!
//! Each stage resolves the source and directory layout from the pipeline
//! config, so callers (CLI or library users) only decide *what* to run.

use std::time::Duration;

use crate::acquire::{AcquireReport, FetchOptions, Fetcher};
use crate::config::PipelineConfig;
use crate::curate::{CurationOutcome, Curator};
use crate::error::Result;
use crate::paths::CorpusPaths;
use crate::source::CorpusSource;

/// Counts from one acquisition run.
#[derive(Debug)]
pub struct FetchSummary {
    /// Books whose manifests are available locally after the run.
    pub book_ids: Vec<String>,
    /// Poem-stage counts.
    pub poems: AcquireReport,
}

/// Resolve the directory layout for a configured source.
///
/// Fails fast on an unsupported source name, the one operator error that
/// aborts a run before any work happens.
pub fn paths_for(config: &PipelineConfig) -> Result<CorpusPaths> {
    let source = CorpusSource::lookup(&config.source)?;
    Ok(CorpusPaths::resolve(
        &config.data_dir,
        &source.name,
        &config.out_dir,
    ))
}

/// Run the acquisition stage: mirror manifests, then the poems they reference.
pub fn fetch(config: &PipelineConfig) -> Result<FetchSummary> {
    let source = CorpusSource::lookup(&config.source)?;
    let paths = paths_for(config)?;
    paths.ensure_dirs()?;

    let options = FetchOptions {
        rate_limit: Duration::from_millis(config.rate_limit_ms),
        timeout: Duration::from_secs(config.timeout_secs),
    };
    let fetcher = Fetcher::new(source, paths, options);

    let book_ids = fetcher.fetch_manifests(config.book_count);
    let poems = fetcher.fetch_poems(&book_ids);
    Ok(FetchSummary { book_ids, poems })
}

/// Run the curation stage and persist both outputs.
pub fn curate(config: &PipelineConfig) -> Result<CurationOutcome> {
    let paths = paths_for(config)?;
    paths.ensure_dirs()?;

    let curator = Curator::new(paths, config.target_language.clone());
    let outcome = curator.curate(config.book_count);
    curator.persist(&outcome)?;
    Ok(outcome)
}

/// Fetch then curate in one run.
pub fn run(config: &PipelineConfig) -> Result<(FetchSummary, CurationOutcome)> {
    let summary = fetch(config)?;
    let outcome = curate(config)?;
    Ok((summary, outcome))
}
