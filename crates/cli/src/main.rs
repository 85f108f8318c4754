use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use kindler_core::{Config, Kindler, WorkDir, validate_url};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Send web articles to a Kindle as EPUB
#[derive(Parser, Debug)]
#[command(name = "kindler")]
#[command(author = "Kindler Contributors")]
#[command(version)]
#[command(about = "Send web articles to a Kindle as EPUB", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Working directory for downloaded pages and books
    #[arg(long, global = true, env = "SENDS_FOLDER", value_name = "DIR")]
    workdir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Converter executable
    #[arg(long, global = true, value_name = "PROGRAM")]
    pandoc: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch an article, convert it to EPUB and mail it
    Send {
        /// Article URL
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Delete every file in the working directory
    Cleanup,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("kindler_core=debug"))
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match &args.command {
        Command::Send { url } => send(&args, url).await,
        Command::Cleanup => cleanup(&args),
    };

    if let Err(e) = result {
        echo::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn send(args: &Args, url: &str) -> anyhow::Result<()> {
    let url = validate_url(url)?;

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(workdir) = &args.workdir {
        config.workdir = workdir.clone();
    }
    if let Some(timeout) = args.timeout {
        config.fetch.timeout = timeout;
    }
    if let Some(pandoc) = &args.pandoc {
        config.pandoc = pandoc.clone();
    }

    let kindler = Kindler::from_config(&config).context("Failed to set up pipeline")?;

    if args.verbose {
        echo::print_step(1, 1, &format!("Sending {}", url.as_str().bright_white().underline()));
        eprintln!("  {} {}", "Workdir:".dimmed(), config.workdir.display().bright_white());
        eprintln!("  {} {}", "Recipient:".dimmed(), config.smtp.recipient.bright_white());
    }

    let started = Instant::now();
    let delivery = kindler.send_article(&url).await.context("Failed to send article")?;

    if args.verbose {
        echo::print_timing("Total", started.elapsed());
        eprintln!();
    }
    echo::print_success(&delivery.message());

    Ok(())
}

fn cleanup(args: &Args) -> anyhow::Result<()> {
    let root = args
        .workdir
        .clone()
        .unwrap_or_else(|| PathBuf::from(kindler_core::config::DEFAULT_SENDS_FOLDER));
    let workdir = WorkDir::open(&root).with_context(|| format!("Failed to open {}", root.display()))?;

    let removed = workdir.cleanup().context("Failed to clean up files")?;
    echo::print_success(&format!("Removed {} file(s) from {}", removed, root.display()));

    Ok(())
}
