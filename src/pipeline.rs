use log::info;
use serde_json::Value;
use crate::config::Config;
use crate::error::{NormalizationError, PipelineError};
use crate::models::Report;
use crate::utils::normalize::normalize;
use crate::utils::score::score;
use crate::utils::upstream::fetch_results;

// Normalizes and scores one upstream document. Pure: no I/O, no shared state.
pub fn build_report(raw: &Value) -> Result<Report, NormalizationError> {
    let record = normalize(raw)?;
    let summary = score(&record);
    Ok(Report {
        details: record.details,
        semesters: record.semesters,
        summary,
    })
}

// Fetches the results for a roll number and turns them into a report.
pub async fn run(config: &Config, roll_number: &str) -> Result<Report, PipelineError> {
    let raw = fetch_results(config, roll_number).await?;
    info!("Results retrieved successfully");

    let report = build_report(&raw)?;
    info!(
        "Scored {} semester(s) for {}",
        report.summary.semesters.len(),
        report.details.roll_number
    );
    Ok(report)
}
