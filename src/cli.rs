//! Command-line interface definitions.
//!
//! All options can be provided via command-line flags; the API key also
//! falls back to the `OPENAI_API_KEY` environment variable.

use clap::Parser;

/// Command-line arguments for the coverage comparison run.
///
/// # Examples
///
/// ```sh
/// # Scrape the configured default outlets
/// coverage_compare -k "flood, wildfire"
///
/// # Override the outlets and keep the JSON report
/// coverage_compare -k flood \
///     --first-outlet https://bbc.com/news \
///     --second-outlet https://edition.cnn.com \
///     -j ./reports
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Comma-delimited keywords or phrases to search for
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// First outlet URL (defaults to the first configured outlet)
    #[arg(long)]
    pub first_outlet: Option<String>,

    /// Second outlet URL (defaults to the second configured outlet)
    #[arg(long)]
    pub second_outlet: Option<String>,

    /// Optional path to config.yaml
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output directory for the JSON coverage report (omitted: no file is written)
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// API key for the analysis service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}
