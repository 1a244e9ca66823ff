use reqwest::StatusCode;

/// Shown when a weather failure carries no message from the backend.
pub const GENERIC_WEATHER_ERROR: &str = "Unable to load weather for this city";

/// Failure talking to one of the external collaborators.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response carrying a structured `{ "error": ... }` payload.
    #[error("{message} (status {status})")]
    Api {
        status: StatusCode,
        message: String,
    },

    /// Non-2xx response without a usable payload.
    #[error("request failed with status {status}: {body}")]
    Status {
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    Malformed(String),

    /// The service answered 2xx but reported an error in its own envelope.
    #[error("service error: {0}")]
    Service(String),
}

impl FetchError {
    /// Text to show the user for a failed weather fetch.
    ///
    /// Only the backend's own `error` message is surfaced verbatim.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Api { message, .. } => message.clone(),
            _ => GENERIC_WEATHER_ERROR.to_string(),
        }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
