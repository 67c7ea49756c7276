use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{store::StoreError, utils::error_fmt_chain};

/// Every failure a request can end with. Each variant maps to one status
/// code and is sent back as [`ErrorBody`].
#[derive(Error)]
pub enum ApiError{
    #[error("{0}")]
    BadRequest(String),
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("failed to reach the document store")]
    Store(#[from] StoreError),
    #[error("unexpected error occured")]
    UnexpectedError(#[from] anyhow::Error)
}

impl ApiError {
    pub fn not_found(label: &str, id: &str) -> Self {
        ApiError::NotFound(format!("{} {} was not found", label, id))
    }

    fn message(&self) -> String {
        match self {
            ApiError::Store(StoreError::Duplicate(field)) => format!("this {} already exists", field),
            other => other.to_string()
        }
    }
}

impl Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorBody{
    pub code: u16,
    pub message: String
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) | ApiError::Store(StoreError::Duplicate(_)) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Store(_) | ApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }

        HttpResponse::build(status).json(ErrorBody{
            code: status.as_u16(),
            message: self.message()
        })
    }
}
