//! JSON report writing.
//!
//! Each run writes one timestamped file under a date directory, so repeated
//! comparisons over a day accumulate side by side.

use crate::models::CoverageReport;
use chrono::Local;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`CoverageReport`] to `{json_output_dir}/{date}/{time}.json`.
///
/// Creates the date directory as needed and returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &CoverageReport,
    json_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    let now = Local::now();
    let report_dir = format!(
        "{}/{}",
        json_output_dir.trim_end_matches('/'),
        now.date_naive()
    );
    if let Err(e) = fs::create_dir_all(&report_dir).await {
        error!(%report_dir, error = %e, "Failed to create report dir");
        return Err(e.into());
    }

    let report_path = format!("{}/{}.json", report_dir, now.format("%H-%M-%S"));
    fs::write(&report_path, json).await?;
    info!(path = %report_path, "Wrote coverage report JSON");

    Ok(report_path)
}
