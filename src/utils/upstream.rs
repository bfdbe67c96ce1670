use log::debug;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use urlencoding::encode;
use crate::config::Config;
use crate::error::UpstreamError;

// Builds the lookup URL, appending the roll number as the `rollNumber` query parameter.
pub fn results_url(api_url: &str, roll_number: &str) -> String {
    let separator = if api_url.contains('?') { '&' } else { '?' };
    format!("{}{}rollNumber={}", api_url, separator, encode(roll_number))
}

// Performs a single lookup against the results API. No retries, no caching.
pub async fn fetch_results(config: &Config, roll_number: &str) -> Result<Value, UpstreamError> {
    let roll_number = roll_number.trim();
    if roll_number.is_empty() {
        return Err(UpstreamError::EmptyRollNumber);
    }

    let client = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(UpstreamError::Transport)?;

    let url = results_url(&config.api_url, roll_number);
    debug!("Requesting {}", url);

    let response = client
        .get(&url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(UpstreamError::Transport)?;

    let status = response.status();
    let body = response.text().await.map_err(UpstreamError::Transport)?;

    if !status.is_success() {
        return Err(UpstreamError::Status { status, body });
    }

    serde_json::from_str(&body).map_err(UpstreamError::MalformedBody)
}
