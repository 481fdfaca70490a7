use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Application error taxonomy. Every variant maps to one HTTP status and a
/// JSON body with a human-readable `message` field; storage errors never leak
/// detail to the client.
#[derive(Debug, Error)]
pub enum AppError {
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  NotFound(String),

  /// A state conflict such as deleting a product still referenced by order
  /// items. Served as 400 to match the public contract.
  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  Auth(String),

  #[error("{0}")]
  Forbidden(String),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Database error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    match self {
      AppError::Validation(m) | AppError::Conflict(m) => {
        HttpResponse::BadRequest().json(json!({ "message": m }))
      }
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({ "message": m })),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({ "message": m })),
      AppError::Forbidden(m) => HttpResponse::Forbidden().json(json!({ "message": m })),
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => {
        // Full detail stays in the server logs only.
        tracing::error!(application_error = %self, "Responding with internal error");
        HttpResponse::InternalServerError().json(json!({ "message": "Internal server error" }))
      }
    }
  }
}

/// Result alias used throughout the application.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::http::StatusCode;

  #[test]
  fn validation_and_conflict_map_to_bad_request() {
    let res = AppError::Validation("Invalid order status".into()).error_response();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = AppError::Conflict("Cannot delete product".into()).error_response();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn not_found_maps_to_404() {
    let res = AppError::NotFound("Order not found".into()).error_response();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
  }

  #[test]
  fn auth_errors_map_to_401_and_403() {
    let res = AppError::Auth("Authentication required".into()).error_response();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = AppError::Forbidden("Admin access required".into()).error_response();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
  }

  #[test]
  fn storage_errors_map_to_generic_500() {
    let res = AppError::Sqlx(sqlx::Error::PoolClosed).error_response();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
