use thiserror::Error;

/// Errors surfaced by the prep core and its storage backends.
///
/// Analysis itself is total; only input validation, lookups, and the
/// backing store can fail.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PrepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_passed_through() {
        let err = PrepError::Validation("Job description is required.".to_string());
        assert_eq!(err.to_string(), "Job description is required.");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<Vec<bool>, _> = serde_json::from_str("not json");
        let err: PrepError = parse.unwrap_err().into();
        assert!(matches!(err, PrepError::Json(_)));
    }
}
