use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TmdbError {
    pub fn status(status: reqwest::StatusCode, body: String) -> Self {
        TmdbError::Status {
            status: status.as_u16(),
            body,
        }
    }
}
