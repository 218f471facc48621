// crates/campus-care-server/src/error.rs
// Standardized error types for Campus Care

use thiserror::Error;

/// Main error type for the Campus Care library
#[derive(Error, Debug)]
pub enum CareError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("a submission for this assessment is already in progress")]
    SubmissionInFlight,

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Convenience type alias for Result using CareError
pub type Result<T> = std::result::Result<T, CareError>;

impl CareError {
    /// Whether the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CareError::InvalidInput(_) | CareError::UnknownInstrument(_) | CareError::SubmissionInFlight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = CareError::InvalidInput("message is empty".to_string());
        assert!(err.to_string().contains("invalid input"));
        assert!(err.to_string().contains("message is empty"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_internal_error_is_not_client_error() {
        let err = CareError::Anyhow(anyhow::anyhow!("store unavailable"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_from_anyhow() {
        let err: CareError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_submission_in_flight_is_client_error() {
        let err = CareError::SubmissionInFlight;
        assert!(err.to_string().contains("already in progress"));
        assert!(err.is_client_error());
    }
}
