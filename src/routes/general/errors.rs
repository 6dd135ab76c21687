use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use super::super::helpers::error_chain_fmt;
use crate::{services::ServiceError, validation::ValidationIssue};

#[derive(thiserror::Error)]
pub enum GeneralError {
    #[error(transparent)]
    ValidationError(#[from] ValidationIssue),
    #[error("The request body could not be parsed: {0}")]
    ParseError(String),
    #[error("Authentication is required.")]
    Unauthorized,
    #[error(transparent)]
    DownstreamError(#[from] ServiceError),
    #[error("Something went wrong.")]
    UnexpectedError(#[source] anyhow::Error),
}

impl std::fmt::Debug for GeneralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(serde::Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl GeneralError {
    fn kind(&self) -> &'static str {
        match self {
            GeneralError::ValidationError(_) => "validation_error",
            GeneralError::ParseError(_) => "parse_error",
            GeneralError::Unauthorized => "unauthorized",
            GeneralError::DownstreamError(e) => e.kind(),
            GeneralError::UnexpectedError(_) => "unexpected_error",
        }
    }
}

impl ResponseError for GeneralError {
    fn status_code(&self) -> StatusCode {
        match self {
            GeneralError::ValidationError(_) | GeneralError::ParseError(_) => {
                StatusCode::BAD_REQUEST
            }
            GeneralError::Unauthorized => StatusCode::UNAUTHORIZED,
            GeneralError::DownstreamError(e) => e.status_code(),
            GeneralError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // 500s keep their cause chain in the logs only
        let message = if status.is_server_error() {
            "Something went wrong.".to_string()
        } else {
            self.to_string()
        };
        let field = match self {
            GeneralError::ValidationError(issue) => Some(issue.field),
            _ => None,
        };

        HttpResponse::build(status).json(ErrorBody {
            error: self.kind(),
            message,
            field,
        })
    }
}
