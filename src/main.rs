//! # Coverage Compare
//!
//! Scrape two news outlets for articles matching user-supplied keywords,
//! extract the article text, and ask an OpenAI-compatible LLM for a
//! comparative editorial analysis of the two outlets' coverage.
//!
//! ## Usage
//!
//! ```sh
//! coverage_compare -k "flood, wildfire" -j ./reports
//! ```
//!
//! ## Architecture
//!
//! The application is a strictly sequential pipeline:
//! 1. **Scrape**: for each of the two outlets in turn, fetch the outlet
//!    page, locate keyword-matching text nodes, resolve each match to the
//!    nearest enclosing hyperlink, and fetch every discovered article once
//!    per outlet, reducing it to plain text
//! 2. **Analyze**: serialize the aggregated coverage into a prompt and
//!    make one chat-completion call
//! 3. **Output**: print the analysis to stdout and optionally write the
//!    full JSON report
//!
//! Fetch failures degrade to placeholder content; the only hard failures
//! are input validation and the analysis call, reported as a JSON error
//! object and a nonzero exit status.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod api;
mod cli;
mod config;
mod models;
mod outputs;
mod scrapers;
mod utils;

use api::AnalysisClient;
use cli::Cli;
use config::Config;
use models::{CoverageMap, CoverageReport, ErrorReport, SearchTerm, parse_search_terms};
use scrapers::outlet::scrape_outlet;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("coverage_compare starting up");

    let args = Cli::parse();
    debug!(?args.first_outlet, ?args.second_outlet, ?args.json_output_dir, "Parsed CLI arguments");

    match run(&args).await {
        Ok(report) => {
            let elapsed = start_time.elapsed();
            info!(
                ?elapsed,
                first_articles = report.first.articles.len(),
                second_articles = report.second.articles.len(),
                "Execution complete"
            );
            println!("{}", report.analysis);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Coverage comparison failed");
            // The failure boundary: an error description and nothing else,
            // plus a nonzero exit status from the returned Err.
            let failure = ErrorReport {
                error: e.to_string(),
            };
            println!("{}", serde_json::to_string(&failure)?);
            Err(e)
        }
    }
}

/// Validate inputs, scrape both outlets sequentially, run the analysis
/// call, and assemble the response.
async fn run(args: &Cli) -> Result<CoverageReport, Box<dyn Error>> {
    let config = Config::resolve(args.config.as_deref())?;

    if let Some(dir) = &args.json_output_dir {
        ensure_writable_dir(dir).await?;
    }

    let (first_outlet, second_outlet) = resolve_outlets(args, &config)?;
    let terms = resolve_search_terms(args, &config)?;
    info!(
        first = %first_outlet,
        second = %second_outlet,
        terms = terms.len(),
        "Starting coverage scrape"
    );

    let api_key = args
        .api_key
        .clone()
        .or_else(|| config.analysis.api_key.clone())
        .ok_or("no API key: pass --api-key, set OPENAI_API_KEY, or set analysis.api_key")?;

    // Outlet 1 is fully scraped, article fetches included, before outlet 2
    // begins; the analysis call happens only after both complete.
    let mut coverage = CoverageMap::default();
    scrape_outlet(&first_outlet, &terms, &mut coverage).await;
    scrape_outlet(&second_outlet, &terms, &mut coverage).await;

    let client = AnalysisClient::new(&config.analysis, api_key);
    info!("Sending scraped coverage for analysis");
    let analysis = client.analyze_coverage(&coverage).await?;

    let report = CoverageReport::assemble(
        &coverage,
        first_outlet.as_str(),
        second_outlet.as_str(),
        analysis,
    );

    if let Some(dir) = &args.json_output_dir {
        let path = outputs::json::write_report(&report, dir).await?;
        info!(%path, "Coverage report written");
    }

    Ok(report)
}

/// Pick the two outlet URLs (CLI overrides, then config list) and require
/// both to be syntactically valid http(s) URLs.
fn resolve_outlets(args: &Cli, config: &Config) -> Result<(Url, Url), Box<dyn Error>> {
    let first_raw = args
        .first_outlet
        .clone()
        .or_else(|| config.outlets.first().cloned())
        .ok_or("no first outlet: pass --first-outlet or configure outlets")?;
    let second_raw = args
        .second_outlet
        .clone()
        .or_else(|| config.outlets.get(1).cloned())
        .ok_or("no second outlet: pass --second-outlet or configure two outlets")?;
    Ok((parse_outlet_url(&first_raw)?, parse_outlet_url(&second_raw)?))
}

fn parse_outlet_url(raw: &str) -> Result<Url, Box<dyn Error>> {
    let url = Url::parse(raw).map_err(|e| format!("invalid outlet URL {raw}: {e}"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("outlet URL must be http(s): {raw}").into());
    }
    Ok(url)
}

/// Build the search term list from the CLI keyword string (falling back to
/// the configured default) and require it to be non-empty after trimming.
fn resolve_search_terms(args: &Cli, config: &Config) -> Result<Vec<SearchTerm>, Box<dyn Error>> {
    let raw = args
        .keywords
        .clone()
        .or_else(|| config.keywords.clone())
        .ok_or("no keywords: pass --keywords or configure a default keyword list")?;
    let terms = parse_search_terms(&raw);
    if terms.is_empty() {
        return Err("keyword list is empty after trimming".into());
    }
    Ok(terms)
}
