mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docsim::{
    BatchComparator, BatchResult, DocId, DocumentStore, EngineConfig, Granularity, JsonStore,
};

use report::{PairRow, TargetRows};

#[derive(Parser, Debug)]
#[clap(
    name = "docsim",
    about = "A program to rank stored text documents by pairwise similarity."
)]
struct Args {
    /// File path to the JSON document store.
    #[clap(long, default_value = "docsim.json")]
    store: PathBuf,

    /// File path to the TOML engine configuration. Defaults apply if it does not exist.
    #[clap(long, default_value = ".docsim.toml")]
    config: PathBuf,

    /// Unit of the matched sequences, either "char" or "token".
    /// Overrides the configuration file.
    #[clap(short = 'g', long)]
    granularity: Option<Granularity>,

    /// Suppresses progress and informational messages.
    #[clap(short = 'q', long)]
    quiet: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Adds text files to the store.
    Add {
        #[clap(required = true)]
        files: Vec<PathBuf>,
    },

    /// Lists stored documents.
    List {
        #[clap(long)]
        json: bool,
    },

    /// Removes a document from the store.
    Remove { id: DocId },

    /// Compares two documents.
    Compare {
        id1: DocId,
        id2: DocId,
        #[clap(long)]
        json: bool,
    },

    /// Compares all pairs of stored documents.
    CheckAll {
        #[clap(long)]
        json: bool,
        /// Evaluates pairs in parallel.
        #[clap(short = 'p', long)]
        parallel: bool,
    },

    /// Compares all pairs of the selected documents.
    CompareSelected {
        ids: Vec<DocId>,
        #[clap(long)]
        json: bool,
        /// Evaluates pairs in parallel.
        #[clap(short = 'p', long)]
        parallel: bool,
    },

    /// Compares one document against every other stored document.
    Check {
        id: DocId,
        #[clap(long)]
        json: bool,
        /// Evaluates pairs in parallel.
        #[clap(short = 'p', long)]
        parallel: bool,
    },
}

fn main() {
    let args = Args::parse();
    init_logging(args.quiet);
    if let Err(e) = run(args) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let mut config = EngineConfig::load_or_default(&args.config)?;
    if let Some(granularity) = args.granularity {
        config.granularity = granularity;
    }
    let mut store = JsonStore::open(&args.store)?;
    let batch = |parallel: bool| {
        BatchComparator::from_config(&config)
            .parallel(parallel || config.parallel)
            .shows_progress(!args.quiet)
    };

    match args.command {
        Command::Add { files } => {
            for path in files {
                let (name, content) = read_document(&path)?;
                let id = store.insert(&name, &content)?;
                tracing::info!(id, name = %name, "added document");
                println!("{id}\t{name}");
            }
        }
        Command::List { json } => {
            let records = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print!("{}", report::document_table(&records));
            }
        }
        Command::Remove { id } => {
            let document = store.remove(id)?;
            println!("Removed {}\t{}", document.id, document.name);
        }
        Command::Compare { id1, id2, json } => {
            let documents = store.get_all()?;
            let result = batch(false).compare_pair(&documents, id1, id2)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "{} vs {}: {}",
                    result.doc_a_name,
                    result.doc_b_name,
                    report::percentage(result.ratio)
                );
                println!("{}", result.summary());
            }
        }
        Command::CheckAll { json, parallel } => {
            let documents = store.get_all()?;
            let start = Instant::now();
            let results = batch(parallel).compare_all(&documents)?;
            log_batch(&results, start);
            print_rows(&report::rows(&results), json)?;
        }
        Command::CompareSelected {
            ids,
            json,
            parallel,
        } => {
            let documents = store.get_all()?;
            let start = Instant::now();
            let results = batch(parallel).compare_selected(&documents, &ids)?;
            log_batch(&results, start);
            print_rows(&report::rows(&results), json)?;
        }
        Command::Check { id, json, parallel } => {
            let documents = store.get_all()?;
            let report = batch(parallel).compare_against(&documents, id)?;
            let rows = TargetRows::from(&report);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", report::pair_table(&rows.results));
                match rows.average_percentage {
                    Some(p) => println!("Average similarity: {p}"),
                    None => println!("Average similarity: n/a"),
                }
            }
        }
    }
    Ok(())
}

fn read_document(path: &Path) -> Result<(String, String)> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok((name, content))
}

fn log_batch(results: &BatchResult, start: Instant) {
    tracing::info!(
        pairs = results.len(),
        failures = results.failures().count(),
        "compared in {} sec",
        start.elapsed().as_secs_f64()
    );
}

fn print_rows(rows: &[PairRow], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
    } else {
        print!("{}", report::pair_table(rows));
    }
    Ok(())
}
