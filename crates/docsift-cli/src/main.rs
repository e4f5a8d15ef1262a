//! CLI for extracting text, tables and metadata from documents and web pages.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use docsift_core::{process, render, DocsiftConfig, Toolbox};

/// Extract text, tables, images, links and metadata from web pages and
/// .pdf, .djvu, .doc and .docx documents
#[derive(Parser)]
#[command(name = "docsift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File path or URL to process
    input: String,

    /// Enable verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity; stdout is reserved for the report
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: failed to set up logging: {e}");
        return ExitCode::from(2);
    }

    std::panic::set_hook(Box::new(|info| error!("Unexpected failure: {}", info)));

    let toolbox = match load_config(cli.config.as_deref())
        .and_then(|config| Toolbox::new(config).context("failed to set up tools"))
    {
        Ok(toolbox) => toolbox,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(1);
        }
    };

    let input = cli.input.clone();
    let task = tokio::spawn(async move { process(&input, &toolbox).await });

    tokio::select! {
        joined = task => match joined {
            Ok(Ok(result)) => {
                println!("Processing: {}", cli.input);
                println!("{}", render(&result));
                ExitCode::SUCCESS
            }
            Ok(Err(e)) => {
                eprintln!("Error: {e}");
                ExitCode::from(1)
            }
            Err(e) => {
                error!("Extraction task failed: {}", e);
                eprintln!("Error: unexpected failure while processing {}", cli.input);
                ExitCode::from(2)
            }
        },
        Ok(()) = tokio::signal::ctrl_c() => {
            println!("Interrupted by user");
            ExitCode::SUCCESS
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DocsiftConfig> {
    match path {
        Some(path) => DocsiftConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(DocsiftConfig::default()),
    }
}
