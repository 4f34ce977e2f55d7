// ABOUTME: Error-to-response translation for the tarefas API
// ABOUTME: Maps storage and validation failures to HTTP status codes with JSON error bodies

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use tarefas_core::StorageError;

/// Errors surfaced to HTTP clients.
///
/// Every variant renders as `{"error": "<mensagem>"}`; the messages are in
/// Portuguese because the frontend displays them verbatim. Internal failures
/// keep their detail in the server log only.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Tarefa não encontrada.")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("Erro interno do servidor.")]
    Internal(#[source] StorageError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => ApiError::NotFound,
            StorageError::DuplicateNome(_) => {
                ApiError::Conflict("Já existe uma tarefa com esse nome.".to_string())
            }
            StorageError::DuplicateOrdem => {
                ApiError::Conflict("Já existe uma tarefa com essa ordem.".to_string())
            }
            other => ApiError::Internal(other),
        }
    }
}

/// Convert API errors to HTTP responses
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(source) = &self {
            error!("Internal error while handling request: {}", source);
        }

        let status = self.status_code();
        let body = json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}
