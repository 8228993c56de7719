// src/error.rs

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No API token provided (use --token or set CANVAS_API_TOKEN)")]
    TokenMissing,
    #[error("Authentication failed (401). Check token/permissions.")]
    Unauthorized,
    #[error("Access forbidden (403)")]
    Forbidden,
    #[error("Resource not found (404). Check the course ID and your enrollment.")]
    NotFound,
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Network middleware error: {0}")]
    NetworkMiddleware(#[from] reqwest_middleware::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to persist temporary file: {0}")]
    TempFilePersist(#[from] tempfile::PersistError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not parse API response from '{url}': {source}")]
    ApiParseFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Pagination of '{url}' did not finish within {max_pages} pages")]
    PaginationLimit { url: String, max_pages: usize },
    #[error("No valid module numbers selected.")]
    EmptySelection,
    #[error("Interrupted by user")]
    UserInterrupt,
    #[error("{0}")] // message only, no prefix
    UserInputError(String),
    #[error("Unexpected error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            AppError::Forbidden => Some(StatusCode::FORBIDDEN),
            AppError::NotFound => Some(StatusCode::NOT_FOUND),
            AppError::Network(e) => e.status(),
            AppError::NetworkMiddleware(reqwest_middleware::Error::Reqwest(e)) => e.status(),
            _ => None,
        }
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(StatusCode::FORBIDDEN)
    }

    /// Process exit code for an error that ends the run.
    pub fn exit_code(&self) -> i32 {
        match self.status() {
            Some(StatusCode::UNAUTHORIZED) => return 3,
            Some(StatusCode::NOT_FOUND) => return 4,
            _ => {}
        }
        match self {
            // any other HTTP or transport failure
            AppError::Network(_)
            | AppError::NetworkMiddleware(_)
            | AppError::Forbidden
            | AppError::ApiParseFailed { .. } => 2,
            AppError::EmptySelection => 5,
            AppError::UserInterrupt => 130,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_error_cause() {
        assert_eq!(AppError::TokenMissing.exit_code(), 1);
        assert_eq!(AppError::Unauthorized.exit_code(), 3);
        assert_eq!(AppError::NotFound.exit_code(), 4);
        assert_eq!(AppError::EmptySelection.exit_code(), 5);
        assert_eq!(AppError::UserInterrupt.exit_code(), 130);
        assert_eq!(
            AppError::PaginationLimit { url: "http://x".into(), max_pages: 3 }.exit_code(),
            1
        );
        assert_eq!(AppError::Forbidden.exit_code(), 2);
        let parse_error = serde_json::from_str::<u64>("not json").unwrap_err();
        assert_eq!(
            AppError::ApiParseFailed { url: "http://x".into(), source: parse_error }.exit_code(),
            2
        );
    }

    #[test]
    fn test_forbidden_detection() {
        assert!(AppError::Forbidden.is_forbidden());
        assert!(!AppError::NotFound.is_forbidden());
        assert!(!AppError::TokenMissing.is_forbidden());
    }
}
