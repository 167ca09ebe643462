use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::ingest::pipeline::DEFAULT_BATCH_SIZE;
use crate::ingest::{IngestOptions, PhaseReport, load_author_dump, load_work_dump};
use crate::mapping::DatePolicy;
use crate::models::{Author, Book};
use crate::store::{FileStore, Repository};
use crate::utils::{STORE_DIR_ENV, resolve_store_dir};

/// Failures listed per phase before the summary is truncated
const MAX_LISTED_FAILURES: usize = 10;

#[derive(Parser)]
#[command(name = "openlibrary-loader")]
#[command(version = "0.1.0")]
#[command(about = "Load Open Library author and work dumps into a local store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load author and/or work dumps into the store
    Load(LoadArgs),
    /// Show statistics about the store
    Stats(StoreArgs),
    /// Print one stored record as JSON
    Show {
        #[arg(value_enum)]
        kind: RecordKind,
        id: String,
        #[command(flatten)]
        store: StoreArgs,
    },
}

#[derive(Args)]
pub struct StoreArgs {
    /// Store directory (defaults to the platform data directory)
    #[arg(long, env = STORE_DIR_ENV)]
    pub store: Option<PathBuf>,
}

#[derive(Args)]
pub struct LoadArgs {
    /// Author dump to load first
    #[arg(long, env = "OPENLIBRARY_AUTHORS_DUMP")]
    pub authors: Option<PathBuf>,
    /// Works dump to load after the authors
    #[arg(long, env = "OPENLIBRARY_WORKS_DUMP")]
    pub works: Option<PathBuf>,
    /// Worker threads (defaults to available parallelism)
    #[arg(long)]
    pub jobs: Option<usize>,
    /// Lines mapped per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
    /// What to do with works whose creation date cannot be parsed
    #[arg(long, value_enum, default_value = "drop")]
    pub on_bad_date: DatePolicy,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Author,
    Book,
}

impl RecordKind {
    fn label(self) -> &'static str {
        match self {
            RecordKind::Author => "author",
            RecordKind::Book => "book",
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Load(args)) => {
            load(args)?;
        }
        Some(Commands::Stats(args)) => {
            show_stats(args)?;
        }
        Some(Commands::Show { kind, id, store }) => {
            show_record(kind, &id, store)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn open_store(args: StoreArgs) -> Result<FileStore> {
    let store_dir = resolve_store_dir(args.store)?;
    FileStore::open(&store_dir)
        .with_context(|| format!("Failed to open store at {}", store_dir.display()))
}

fn load(args: LoadArgs) -> Result<()> {
    if args.authors.is_none() && args.works.is_none() {
        bail!("Nothing to load: pass --authors and/or --works");
    }

    let options = IngestOptions::default()
        .with_batch_size(args.batch_size)
        .with_jobs(args.jobs)
        .with_date_policy(args.on_bad_date);
    let store = open_store(args.store)?;

    println!("Open Library Load");
    println!("=================");

    if let Some(path) = &args.authors {
        let report = load_author_dump(path, store.authors(), &options)
            .with_context(|| format!("Author phase failed for {}", path.display()))?;
        print_report(&report);
    }
    if let Some(path) = &args.works {
        let report = load_work_dump(path, store.authors(), store.books(), &options)
            .with_context(|| format!("Work phase failed for {}", path.display()))?;
        print_report(&report);
    }

    println!();
    println!("Store directory: {}", store.dir().display());

    Ok(())
}

fn print_report(report: &PhaseReport) {
    println!("{report}");
    for failure in report.failures.iter().take(MAX_LISTED_FAILURES) {
        println!("  line {}: {}", failure.line, failure.error);
    }
    if report.failed() > MAX_LISTED_FAILURES {
        println!("  ... and {} more", report.failed() - MAX_LISTED_FAILURES);
    }
}

fn show_stats(args: StoreArgs) -> Result<()> {
    let store = open_store(args)?;
    let manifest = store.manifest()?.unwrap_or_default();

    println!("Open Library Store Statistics");
    println!("=============================");
    println!("Authors: {}", store.authors().len()?);
    println!("Books: {}", store.books().len()?);

    for (collection, metadata) in &manifest.collections {
        println!(
            "Last {} update: {}",
            collection,
            metadata.updated_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    println!();
    println!("Store directory: {}", store.dir().display());

    Ok(())
}

fn show_record(kind: RecordKind, id: &str, args: StoreArgs) -> Result<()> {
    let store = open_store(args)?;

    let json = match kind {
        RecordKind::Author => {
            let author: Option<Author> = store.authors().find_by_id(id)?;
            author.map(|a| serde_json::to_string_pretty(&a)).transpose()?
        }
        RecordKind::Book => {
            let book: Option<Book> = store.books().find_by_id(id)?;
            book.map(|b| serde_json::to_string_pretty(&b)).transpose()?
        }
    };

    match json {
        Some(json) => {
            println!("{json}");
            Ok(())
        }
        None => bail!("No {} with id {id}", kind.label()),
    }
}
