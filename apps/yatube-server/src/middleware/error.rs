//! Error handling - failures rendered as error pages.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use yatube_core::DomainError;
use yatube_core::error::RepoError;
use yatube_core::ports::AuthError;

use crate::render;
use crate::views::View;

/// Application-level error type that converts to an error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let view = match self {
            AppError::NotFound(detail) => View::NotFound {
                detail: detail.clone(),
            },
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                View::ServerError
            }
        };

        render::respond_with(self.status_code(), view)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, key } => {
                AppError::NotFound(format!("{entity_type} '{key}' does not exist"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_not_found_is_404() {
        let err = AppError::from(DomainError::not_found("group", "missing"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Not found: group 'missing' does not exist");
    }

    #[test]
    fn test_repo_failure_is_500_page() {
        let err = AppError::from(RepoError::Query("boom".to_string()));
        let response = err.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.extensions().get::<View>().map(View::template),
            Some("core/500.html")
        );
    }
}
