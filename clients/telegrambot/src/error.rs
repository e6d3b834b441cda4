use reqwest::StatusCode;
use thiserror::Error;

/// Telegram client errors
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed, including a request body that was aborted while streaming
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Telegram answered with something other than 200 OK
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// Payload could not be serialized or the response could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image could not be encoded for upload
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Webhook URL is not a valid absolute URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Required environment variable is not set
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),
}

impl TelegramError {
    /// HTTP status of the failed response, if the failure was a status error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(status) => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }
}
