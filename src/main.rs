// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Make sure the output directory exists (the only fatal step)
// 4. Crawl the site and mirror its images
// 5. Print a summary and exit
//
// Exit codes:
//   0 = crawl completed (individual download failures are only logged)
//   1 = could not start (bad URL, output directory unusable, ...)
//
// Rust concepts used:
// - async/await: reqwest is async, so main runs on a tokio runtime
// - Result<T, E> and `?`: errors bubble up to main with context attached
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod crawl;    // src/crawl/ - crawl queue, driver and report
mod fetch;    // src/fetch/ - HTTP fetching and <img> extraction
mod logging;  // src/logging.rs - tracing setup
mod mirror;   // src/mirror/ - mapping URLs to files on disk

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use url::Url;

use cli::Cli;
use crawl::{CrawlReport, Crawler};
use fetch::HttpFetcher;
use mirror::OutputRoot;

// The crawl does one request at a time, so a single-threaded runtime is all
// we need
#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let root = Url::parse(&cli.url).with_context(|| format!("Invalid URL '{}'", cli.url))?;

    let output = OutputRoot::new(&cli.out_dir);
    output
        .ensure_exists()
        .context("Failed to ensure out dir")?;

    let fetcher = HttpFetcher::new(Duration::from_secs(cli.timeout_secs))
        .context("Failed to create HTTP client")?;

    if !cli.json {
        println!("🔍 Mirroring images from: {}", root);
        println!("📁 Output directory: {}", output.path().display());
        println!("📊 Max crawl depth: {}", cli.max_depth);
    }

    let crawler = Crawler::new(root, fetcher, output, cli.max_depth);
    let report = crawler.run().await;

    print_report(&report, cli.json)?;

    Ok(0)
}

// Prints the report either as a table or JSON
fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &CrawlReport) {
    println!();
    println!("📊 Summary:");
    println!("   🌐 Requests:       {}", report.requests);
    println!("   📄 HTML pages:     {}", report.html_pages);
    println!("   💾 Files saved:    {} ({} bytes)", report.files_saved, report.bytes_saved);
    println!("   ♻️  Already had:    {}", report.redundant);
    println!("   ⚠️  Missing src:    {}", report.missing_src);
    println!("   ⏹️  Depth limited:  {}", report.skipped_depth);
    println!("   ❌ Failures:       {}", report.failures);
}
