use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Category tag of an [`AccountError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationError,
    InvalidCredentials,
    StorageError,
}

/// Failures of the account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Campo inválido ou ausente: {field} ({reason})")]
    Validation { field: &'static str, reason: String },

    #[error("Email ou senha incorretos.")]
    InvalidCredentials,

    #[error("{0:#}")]
    Storage(#[source] anyhow::Error),
}

impl AccountError {
    pub fn missing(field: &'static str) -> Self {
        Self::Validation {
            field,
            reason: "obrigatório".into(),
        }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::ValidationError,
            Self::InvalidCredentials => ErrorKind::InvalidCredentials,
            Self::Storage(_) => ErrorKind::StorageError,
        }
    }
}

/// HTTP-facing error; always rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Rota não encontrada.")
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Método não permitido.")
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // shape/type mismatches are client errors like any other bad body
        let status = match &rejection {
            JsonRejection::JsonDataError(_) => StatusCode::BAD_REQUEST,
            other => other.status(),
        };
        Self::new(status, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: &self.message,
        });
        (self.status, body).into_response()
    }
}
