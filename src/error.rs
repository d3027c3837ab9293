use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActPerfError {
    #[error("API request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode workflow definition: {0}")]
    Decode(String),

    #[error("Invalid timestamp '{value}' on step '{step}'")]
    Timestamp { step: String, value: String },

    #[error("Step '{0}' has no recorded start or completion time")]
    MissingTimestamp(String),
}

impl From<serde_yaml::Error> for ActPerfError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<base64::DecodeError> for ActPerfError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode(format!("invalid base64 content: {err}"))
    }
}

impl ActPerfError {
    /// Short status used in one-line run diagnostics (HTTP status code when
    /// the failure came from the API).
    pub fn status(&self) -> String {
        match self {
            Self::ApiError { status, .. } => status.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ActPerfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_code_for_api_errors() {
        let err = ActPerfError::ApiError {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.status(), "404");
    }

    #[test]
    fn test_status_is_message_for_decode_errors() {
        let err: ActPerfError = serde_yaml::from_str::<u32>("[").unwrap_err().into();
        assert!(matches!(err, ActPerfError::Decode(_)));
        assert!(err.status().starts_with("Failed to decode workflow definition"));
    }
}
