//! Error types for image generation.

/// Provider error code for a rejected credential.
pub const CODE_INVALID_API_KEY: &str = "invalid_api_key";

/// Provider error code for an exhausted account billing limit.
pub const CODE_BILLING_HARD_LIMIT: &str = "billing_hard_limit_reached";

/// Longest provider error text kept in messages and logs.
const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Errors that can occur while generating an image.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No usable API key is configured. Raised before any network call.
    #[error("{0}")]
    Config(String),

    /// The provider returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Structured error code from the response body, if any.
        code: Option<String>,
        /// Human-readable message from the provider.
        message: String,
    },

    /// The provider answered successfully but the body made no sense.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (e.g., saving a downloaded image).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the structured provider error code, if the provider sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Returns the bare message, without the variant prefix added by `Display`.
    pub fn message(&self) -> String {
        match self {
            Self::Config(message) | Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// True when the provider rejected the API key.
    pub fn is_invalid_api_key(&self) -> bool {
        self.code() == Some(CODE_INVALID_API_KEY)
    }

    /// True when the provider reports the account billing limit was reached.
    pub fn is_billing_limit(&self) -> bool {
        self.code() == Some(CODE_BILLING_HARD_LIMIT)
    }
}

/// Result type alias for image generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Redacts secret-looking tokens and caps the length of a provider error text.
///
/// OpenAI echoes part of a rejected key back (`Incorrect API key provided:
/// sk-abc***xyz`), so anything starting with `sk-` is masked.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let redacted = text
        .split(' ')
        .map(|word| {
            if word.starts_with("sk-") {
                "sk-***"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let trimmed = redacted.trim();
    if trimmed.chars().count() <= MAX_ERROR_MESSAGE_LEN {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
    cut.push_str("...");
    cut
}
