// ABOUTME: CLI driver for the subreap link harvester.
// ABOUTME: Reads a URL list, runs the bounded worker pool, and reports each outcome.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use futures::StreamExt;
use subreap_harvest::Harvester;

/// Harvest proxy subscription links from a list of URLs.
#[derive(Parser, Debug)]
#[command(name = "subreap")]
#[command(about = "Fetch URLs, extract their text, and collect proxy subscription links")]
struct Args {
    /// File with one URL per line; pruned in place when content does not match
    urls_file: PathBuf,

    /// Directory receiving per-URL extracted content files
    output_dir: PathBuf,

    /// Number of concurrent workers
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    num_threads: u64,

    /// Aggregate file receiving matched or decoded content blocks
    rest_file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let urls = match read_url_list(&args.urls_file) {
        Ok(urls) => urls,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    let harvester = Harvester::builder(&args.urls_file, &args.output_dir, &args.rest_file)
        .concurrency(args.num_threads as usize)
        .build();

    // Outcomes arrive in completion order; each URL is reported exactly once.
    let mut outcomes = harvester.run(urls);
    while let Some(outcome) = outcomes.next().await {
        println!("{}", outcome);
    }

    println!("all URLs processed");
    ExitCode::SUCCESS
}

/// Read the URL list as trimmed, non-empty lines.
fn read_url_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading URL list {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
