use actix_web::http::StatusCode;

use crate::routes::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidEmail(String),
    #[error("{0}")]
    Conflict(String),
    #[error("The payment was declined by the processor.")]
    PaymentDeclined(#[source] reqwest::Error),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::PaymentDeclined(_) => StatusCode::PAYMENT_REQUIRED,
            ServiceError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::InvalidEmail(_) => "invalid_email",
            ServiceError::Conflict(_) => "conflict",
            ServiceError::PaymentDeclined(_) => "payment_declined",
            ServiceError::Unexpected(_) => "unexpected_error",
        }
    }
}
