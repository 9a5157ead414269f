use thiserror::Error;

/// Represents errors that can occur when talking to the pitch-deck backend.
#[derive(Error, Debug)]
pub enum DeckApiError {
    /// Error originating from the underlying HTTP client (`reqwest`).
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Error occurred during the deserialization of the JSON response from the API.
    #[error("Failed to deserialize JSON response: {0}")]
    JsonDeserialization(#[from] serde_json::Error),

    /// The backend rejected the session (HTTP 401). Callers redirect to login.
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// The action needs a higher access tier (premium template gating).
    #[error("Upgrade required: {0}")]
    UpgradeRequired(String),

    /// Any other non-2xx answer from the backend.
    #[error("API returned an error: Status {status}, Message: {message}")]
    ApiError {
        status: reqwest::StatusCode,
        message: String,
    },

    /// An error indicating invalid input was provided to a client function.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An error related to reading environment variables.
    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] std::env::VarError),

    /// The client configuration is unusable (bad base URL, bad timeout).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DeckApiError {
    /// True when the failure is the premium-template gate.
    pub fn is_upgrade_required(&self) -> bool {
        matches!(self, DeckApiError::UpgradeRequired(_))
    }

    /// True when the caller should send the user back to the login page.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, DeckApiError::Unauthorized(_))
    }

    /// Message shown to the user after a failed slide mutation.
    ///
    /// Only the upgrade gate gets its own wording; everything else is generic.
    pub fn toast_message(&self) -> &'static str {
        match self {
            DeckApiError::UpgradeRequired(_) => {
                "This template requires an upgraded plan. Upgrade to use it."
            }
            _ => "Something went wrong. Please try again.",
        }
    }
}

/// A type alias for `Result<T, DeckApiError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, DeckApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_message_only_distinguishes_upgrade() {
        let upgrade = DeckApiError::UpgradeRequired("premium".to_string());
        let generic = DeckApiError::InvalidInput("empty deck id".to_string());
        let auth = DeckApiError::Unauthorized("expired".to_string());

        assert!(upgrade.is_upgrade_required());
        assert!(upgrade.toast_message().contains("Upgrade"));
        assert_eq!(generic.toast_message(), auth.toast_message());
        assert!(auth.is_unauthorized());
        assert!(!generic.is_unauthorized());
    }
}
