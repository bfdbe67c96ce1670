use reqwest::StatusCode;

// Raised by the lookup against the results API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("A roll number is required")]
    EmptyRollNumber,

    #[error("Failed to send results request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Results API responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Results API returned malformed JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("Response does not match any known results layout")]
    UnrecognizedShape,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

impl PipelineError {
    // Message shown to the user when the pipeline aborts.
    pub fn user_message(&self) -> String {
        match self {
            Self::Upstream(UpstreamError::EmptyRollNumber) => {
                "Please provide a roll number.".to_string()
            }
            Self::Upstream(e) => format!("Could not reach the results data source ({e})."),
            Self::Normalization(_) => {
                "The results data source returned data in an unexpected format.".to_string()
            }
        }
    }
}
