use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("Video game with ID {0} not found")]
    NotFound(i64),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogueResult<T> = Result<T, CatalogueError>;

/// Convert CatalogueError to AppError for standardized error responses
impl From<CatalogueError> for AppError {
    fn from(err: CatalogueError) -> Self {
        match err {
            CatalogueError::NotFound(id) => {
                AppError::NotFound(format!("Video game with ID {} not found", id))
            }
            CatalogueError::Validation(errors) => AppError::ValidationError(errors),
            CatalogueError::BadRequest(msg) => AppError::BadRequest(msg),
            CatalogueError::Unauthorized => AppError::Unauthorized,
            CatalogueError::Database(e) => AppError::Database(e),
            CatalogueError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogueError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_helpers::ErrorCode;

    #[test]
    fn test_not_found_maps_to_404_with_id_message() {
        let app_error: AppError = CatalogueError::NotFound(42).into();
        assert_eq!(app_error.status(), StatusCode::NOT_FOUND);
        assert_eq!(app_error.to_string(), "Not Found: Video game with ID 42 not found");
    }

    #[test]
    fn test_server_side_errors_map_to_500() {
        let db: AppError = CatalogueError::Database(DbErr::Custom("connection reset".into())).into();
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(db.error_code(), ErrorCode::DatabaseError);

        let internal: AppError = CatalogueError::Internal("boom".into()).into();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_client_errors_map_to_4xx() {
        let bad: AppError = CatalogueError::BadRequest("mismatch".into()).into();
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let unauthorized: AppError = CatalogueError::Unauthorized.into();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let validation: AppError = CatalogueError::Validation(ValidationErrors::new()).into();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
    }
}
