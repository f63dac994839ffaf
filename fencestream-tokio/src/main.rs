use clap::{Parser, ValueEnum};
use fencestream::adapters::pulldown;
use fencestream::{Document, FenceStream, Region};
use fencestream_tokio::{
    DriveOutcome, FragmentOptions, RandomFragments, SAMPLE_DOCUMENT, TickOptions,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fencestream",
    about = "Stream a document through the backtick splitter in random fragments"
)]
struct Cli {
    /// File to stream; the built-in sample document when omitted
    #[arg(long, env = "FENCESTREAM_INPUT")]
    input: Option<PathBuf>,

    /// Delay between fragments, in milliseconds
    #[arg(long, default_value_t = 20, env = "FENCESTREAM_INTERVAL_MS")]
    interval_ms: u64,

    /// Shortest fragment, in chars
    #[arg(long, default_value_t = 2)]
    min_fragment: usize,

    /// Longest fragment, in chars
    #[arg(long, default_value_t = 19)]
    max_fragment: usize,

    /// Seed for the fragment splitter (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// What to print once the stream ends
    #[arg(long, value_enum, default_value_t = Format::Regions)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One line per region: id, kind, status, text
    Regions,
    /// HTML through pulldown-cmark
    Html,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid fragment bounds: min {min} must be at least 1 and at most max {max}")]
    FragmentBounds { min: usize, max: usize },

    #[error(transparent)]
    Drive(#[from] fencestream_tokio::DriveError),

    #[error("update consumer failed: {0}")]
    Consumer(#[from] tokio::task::JoinError),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    check_bounds(&cli)?;
    let text = read_input(&cli)?;

    let fragments = RandomFragments::new(
        &text,
        FragmentOptions {
            min_len: cli.min_fragment,
            max_len: cli.max_fragment,
            seed: cli.seed,
        },
    );
    tracing::info!(
        seed = fragments.seed(),
        bytes = text.len(),
        interval_ms = cli.interval_ms,
        "streaming"
    );

    let (tx, mut rx) = mpsc::channel(64);
    let consumer = tokio::spawn(async move {
        let mut doc = Document::new();
        while let Some(update) = rx.recv().await {
            doc.apply(update);
        }
        doc
    });

    let (cancel_tx, cancel_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(());
        }
    });

    let opts = TickOptions {
        interval: Duration::from_millis(cli.interval_ms),
    };
    let outcome =
        fencestream_tokio::drive(FenceStream::new(), fragments, opts, tx, cancel_rx).await?;
    let doc = consumer.await?;

    if let DriveOutcome::Cancelled(stream) = &outcome {
        tracing::warn!(
            regions = stream.regions().len(),
            "interrupted; printing partial output"
        );
    }

    match cli.format {
        Format::Regions => print_regions(doc.regions()),
        Format::Html => print!("{}", pulldown::to_html(doc.regions())),
    }
    Ok(())
}

fn check_bounds(cli: &Cli) -> Result<(), CliError> {
    if cli.min_fragment == 0 || cli.min_fragment > cli.max_fragment {
        return Err(CliError::FragmentBounds {
            min: cli.min_fragment,
            max: cli.max_fragment,
        });
    }
    Ok(())
}

fn read_input(cli: &Cli) -> Result<String, CliError> {
    match &cli.input {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        }),
        None => Ok(SAMPLE_DOCUMENT.to_string()),
    }
}

fn print_regions(regions: &[Region]) {
    for r in regions {
        println!("{}", format_region(r));
    }
}

/// `  id kind   status "text"`, padded so the columns line up.
fn format_region(r: &Region) -> String {
    let status = if r.is_open() { "open" } else { "closed" };
    format!("{:>4} {:<6} {:<6} {:?}", r.id.0, r.kind.label(), status, r.text)
}
