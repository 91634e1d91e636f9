//! bayaz CLI: poetry corpus acquisition and curation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;

use bayaz::config::PipelineConfig;
use bayaz::curate::{CurationOutcome, inspect};
use bayaz::pipeline::{self, FetchSummary};

#[derive(Parser)]
#[command(name = "bayaz", version, about = "Poetry corpus curation pipeline")]
struct Cli {
    /// Path to a TOML pipeline config; flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Named remote source to mirror.
    #[arg(long, global = true)]
    source: Option<String>,

    /// Root directory of the local mirror.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory for curated outputs.
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    /// Number of book ordinals to process (ids 001..).
    #[arg(long, global = true)]
    books: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mirror manifest and poem documents from the remote source.
    Fetch {
        /// Pause between network requests, in milliseconds.
        #[arg(long)]
        rate_limit_ms: Option<u64>,
    },

    /// Curate the local mirror into the archive and retrieval record set.
    Curate {
        /// Target language for retrieval-ready flattening.
        #[arg(long)]
        language: Option<String>,
    },

    /// Fetch then curate in one invocation.
    Run {
        #[arg(long)]
        rate_limit_ms: Option<u64>,

        #[arg(long)]
        language: Option<String>,
    },

    /// Verify persisted outputs and report corpus statistics.
    Inspect,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = resolve_config(&cli)?;

    match cli.command {
        Commands::Fetch { rate_limit_ms } => {
            if let Some(ms) = rate_limit_ms {
                config.rate_limit_ms = ms;
            }
            let summary = pipeline::fetch(&config)?;
            print_fetch_summary(&summary, config.book_count);
        }

        Commands::Curate { language } => {
            if let Some(language) = language {
                config.target_language = language;
            }
            let outcome = pipeline::curate(&config)?;
            print_curation_summary(&outcome);
        }

        Commands::Run {
            rate_limit_ms,
            language,
        } => {
            if let Some(ms) = rate_limit_ms {
                config.rate_limit_ms = ms;
            }
            if let Some(language) = language {
                config.target_language = language;
            }
            let (summary, outcome) = pipeline::run(&config)?;
            print_fetch_summary(&summary, config.book_count);
            print_curation_summary(&outcome);
        }

        Commands::Inspect => {
            let paths = pipeline::paths_for(&config)?;
            let (corpus, records) = inspect::load_outputs(&paths)?;
            let report = inspect::verify(&corpus, &records);

            println!("Corpus outputs at {}:", paths.output_dir.display());
            println!("  books archived:    {}", report.archived_books);
            println!("  poems archived:    {}", report.archived_poems);
            println!("  retrieval records: {}", report.retrieval_records);

            if !report.language_counts.is_empty() {
                println!("  languages:");
                for (lang, count) in &report.language_counts {
                    println!("    {lang}: {count} poems");
                }
            }
            if !report.not_retrievable.is_empty() {
                println!(
                    "  not retrievable (filtered): {}",
                    report.not_retrievable.join(", ")
                );
            }
            if report.is_consistent() {
                println!("  consistency: OK");
            } else {
                println!(
                    "  consistency: FAILED, records missing from archive: {}",
                    report.missing_from_archive.join(", ")
                );
            }
        }
    }

    Ok(())
}

/// Load the config file if given, then apply global flag overrides.
fn resolve_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(source) = &cli.source {
        config.source = source.clone();
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.display().to_string();
    }
    if let Some(out_dir) = &cli.out_dir {
        config.out_dir = out_dir.display().to_string();
    }
    if let Some(books) = cli.books {
        config.book_count = books;
    }
    Ok(config)
}

fn print_fetch_summary(summary: &FetchSummary, requested: u32) {
    println!("Fetch complete:");
    println!(
        "  manifests available: {} of {}",
        summary.book_ids.len(),
        requested
    );
    println!(
        "  poems: {} fetched, {} already mirrored, {} failed",
        summary.poems.fetched, summary.poems.already_present, summary.poems.failed
    );
    if summary.poems.books_skipped > 0 {
        println!(
            "  books skipped (unreadable manifest): {}",
            summary.poems.books_skipped
        );
    }
}

fn print_curation_summary(outcome: &CurationOutcome) {
    println!("Curation complete:");
    println!("  books:  {}", outcome.corpus.metadata.total_books);
    println!(
        "  poems:  {} retrieval-ready, {} archived",
        outcome.corpus.metadata.total_poems,
        outcome.corpus.poems.len()
    );
}
