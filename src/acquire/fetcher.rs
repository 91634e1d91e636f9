//! Idempotent mirror fetcher.
//!
//! Uses `ureq` for synchronous HTTP requests with a per-request timeout.
//! Files already present locally are treated as successes and never
//! re-fetched, so re-running a batch naturally retries only the missing
//! items. A fixed pause between network requests bounds the request rate.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::acquire::error::{AcquireError, AcquireResult};
use crate::curate::manifest;
use crate::paths::{CorpusPaths, book_id_for_ordinal};
use crate::source::CorpusSource;

/// Network pacing and timeout knobs.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Pause between network requests.
    pub rate_limit: Duration,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            rate_limit: Duration::from_millis(500),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Per-run acquisition counts for the poem stage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AcquireReport {
    /// Poems fetched over the network this run.
    pub fetched: usize,
    /// Poems already present in the mirror.
    pub already_present: usize,
    /// Individual fetch failures (logged and skipped).
    pub failed: usize,
    /// Books skipped whole because their manifest was missing or unparsable.
    pub books_skipped: usize,
}

impl AcquireReport {
    /// Poems available in the mirror after this run.
    pub fn available(&self) -> usize {
        self.fetched + self.already_present
    }
}

/// Populates the local mirror from a remote source.
pub struct Fetcher {
    source: CorpusSource,
    paths: CorpusPaths,
    agent: ureq::Agent,
    rate_limit: Duration,
}

impl Fetcher {
    pub fn new(source: CorpusSource, paths: CorpusPaths, options: FetchOptions) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(options.timeout).build();
        Self {
            source,
            paths,
            agent,
            rate_limit: options.rate_limit,
        }
    }

    /// Mirror the manifest documents for book ordinals `1..=count`.
    ///
    /// Returns the ordered ids of books whose manifests are available locally
    /// after the run (pre-existing or newly fetched). Individual failures are
    /// logged and skipped; the batch always completes.
    pub fn fetch_manifests(&self, count: u32) -> Vec<String> {
        info!(count, source = %self.source.name, "fetching book manifests");

        let mut available = Vec::new();
        for ordinal in 1..=count {
            let book_id = book_id_for_ordinal(ordinal);
            let path = self.paths.manifest_path(&book_id);

            if path.exists() {
                debug!(%book_id, "manifest already mirrored, skipping fetch");
                available.push(book_id);
                continue;
            }

            let url = self.source.manifest_url(&book_id);
            match self.fetch_to(&url, &path) {
                Ok(()) => {
                    info!(%book_id, "fetched manifest");
                    available.push(book_id);
                }
                Err(e) => warn!(%book_id, "skipping manifest: {e}"),
            }
            std::thread::sleep(self.rate_limit);
        }

        info!(
            available = available.len(),
            requested = count,
            "manifest stage complete"
        );
        available
    }

    /// Mirror every poem document referenced by the given books' manifests.
    ///
    /// A book whose local manifest is missing or unparsable is skipped whole
    /// (logged); per-poem failures skip only that poem. Never aborts.
    pub fn fetch_poems(&self, book_ids: &[String]) -> AcquireReport {
        let mut report = AcquireReport::default();

        for book_id in book_ids {
            let manifest_path = self.paths.manifest_path(book_id);
            let poem_ids = match manifest::load_manifest(&manifest_path) {
                Ok(raw) => manifest::poem_ids(&raw),
                Err(e) => {
                    error!(%book_id, "skipping book, manifest unreadable: {e}");
                    report.books_skipped += 1;
                    continue;
                }
            };

            let dir = self.paths.book_poems_dir(book_id);
            if let Err(e) = std::fs::create_dir_all(&dir) {
                error!(%book_id, "skipping book, cannot create poem directory: {e}");
                report.books_skipped += 1;
                continue;
            }

            let before = report.available();
            for poem_id in &poem_ids {
                let path = self.paths.poem_path(book_id, poem_id);
                if path.exists() {
                    debug!(%book_id, %poem_id, "poem already mirrored, skipping fetch");
                    report.already_present += 1;
                    continue;
                }

                let url = self.source.poem_url(book_id, poem_id);
                match self.fetch_to(&url, &path) {
                    Ok(()) => report.fetched += 1,
                    Err(e) => {
                        warn!(%book_id, %poem_id, "skipping poem: {e}");
                        report.failed += 1;
                    }
                }
                std::thread::sleep(self.rate_limit);
            }

            info!(
                %book_id,
                available = report.available() - before,
                referenced = poem_ids.len(),
                "poem stage for book complete"
            );
        }

        report
    }

    /// Fetch one document and write the raw response body verbatim.
    fn fetch_to(&self, url: &str, path: &Path) -> AcquireResult<()> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| AcquireError::Fetch {
                url: url.into(),
                message: e.to_string(),
            })?;
        let body = response.into_string().map_err(|e| AcquireError::Fetch {
            url: url.into(),
            message: format!("read body: {e}"),
        })?;
        std::fs::write(path, body).map_err(|e| AcquireError::WriteMirror {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Connection-refused endpoint: failures are immediate, no real traffic.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn test_fetcher(dir: &Path) -> Fetcher {
        let source = CorpusSource::with_base_url("test", UNREACHABLE);
        let paths = CorpusPaths::resolve(dir, "test", dir.join("out"));
        paths.ensure_dirs().unwrap();
        Fetcher::new(source, paths, FetchOptions {
            rate_limit: Duration::ZERO,
            timeout: Duration::from_millis(200),
        })
    }

    #[test]
    fn existing_manifest_skips_network_and_counts_as_available() {
        let dir = tempfile::TempDir::new().unwrap();
        let fetcher = test_fetcher(dir.path());

        // Pre-seed the mirror; the source is unreachable, so any network
        // attempt for this id would fail and drop it from the result.
        std::fs::write(fetcher.paths.manifest_path("001"), "name: []\n").unwrap();

        let available = fetcher.fetch_manifests(1);
        assert_eq!(available, vec!["001"]);
    }

    #[test]
    fn fetch_failures_are_isolated_not_propagated() {
        let dir = tempfile::TempDir::new().unwrap();
        let fetcher = test_fetcher(dir.path());

        let available = fetcher.fetch_manifests(3);
        assert!(available.is_empty());
    }

    #[test]
    fn mixed_batch_returns_only_available_ids() {
        let dir = tempfile::TempDir::new().unwrap();
        let fetcher = test_fetcher(dir.path());

        std::fs::write(fetcher.paths.manifest_path("002"), "name: []\n").unwrap();

        let available = fetcher.fetch_manifests(3);
        assert_eq!(available, vec!["002"]);
    }

    #[test]
    fn missing_manifest_hard_skips_whole_book() {
        let dir = tempfile::TempDir::new().unwrap();
        let fetcher = test_fetcher(dir.path());

        let report = fetcher.fetch_poems(&["001".to_string()]);
        assert_eq!(report.books_skipped, 1);
        assert_eq!(report.available(), 0);
    }

    #[test]
    fn mirrored_poems_are_not_refetched() {
        let dir = tempfile::TempDir::new().unwrap();
        let fetcher = test_fetcher(dir.path());

        std::fs::write(
            fetcher.paths.manifest_path("001"),
            concat!(
                "sections:\n",
                "  - sectionName:\n",
                "      - lang: en\n",
                "        text: Main\n",
                "  - poems:\n",
                "      - id: \"p1\"\n",
                "      - id: \"p2\"\n",
            ),
        )
        .unwrap();
        std::fs::create_dir_all(fetcher.paths.book_poems_dir("001")).unwrap();
        std::fs::write(fetcher.paths.poem_path("001", "p1"), "sher: []\n").unwrap();

        let report = fetcher.fetch_poems(&["001".to_string()]);
        assert_eq!(report.already_present, 1);
        assert_eq!(report.failed, 1); // p2 hits the unreachable source
        assert_eq!(report.fetched, 0);
    }
}
