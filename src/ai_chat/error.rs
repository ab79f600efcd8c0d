use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Failure taxonomy for the chat/analysis endpoints. Validation failures
/// surface as a 400 with the message the UI expects; everything else is a
/// generic 500 so raw provider detail never reaches the client.
#[derive(Debug, Error)]
pub enum ChatError {
  #[error("{0}")]
  Validation(String),
  #[error("upstream provider failure: {0}")]
  Upstream(String),
  #[error("analysis store failure: {0}")]
  Persistence(String),
}

impl ResponseError for ChatError {
  fn status_code(&self) -> StatusCode {
    match self {
      ChatError::Validation(_) => StatusCode::BAD_REQUEST,
      ChatError::Upstream(_) | ChatError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    match self {
      ChatError::Validation(message) => {
        HttpResponse::BadRequest().json(serde_json::json!({ "message": message }))
      }
      other => {
        log::error!("AI Error: {}", other);
        HttpResponse::InternalServerError().json(serde_json::json!({ "error": "Internal Server Error" }))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validation_maps_to_bad_request() {
    let error = ChatError::Validation("No message provided.".to_string());
    assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn upstream_and_persistence_map_to_internal_error() {
    assert_eq!(
      ChatError::Upstream("connection reset".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
      ChatError::Persistence("write failed".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }
}
