/// Errors from the upstream chat and image APIs.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The required API credential is not configured.
    #[error("API key is not set for {0}")]
    MissingApiKey(&'static str),

    /// Transport-level failure talking to the upstream API.
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream API answered with a non-success status.
    #[error("Upstream API error: status {status}, body: {body}")]
    Upstream {
        status: u16,
        body: String,
    },

    /// The model's reply could not be interpreted.
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),
}
