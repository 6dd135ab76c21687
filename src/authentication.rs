use std::ops::Deref;

use actix_web::{
    FromRequest, HttpMessage,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};
use uuid::Uuid;

use crate::{routes::GeneralError, session_state::TypedSession};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UserId(Uuid);

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for UserId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Lets the request through only when the session holds a user id, which is
/// then available to handlers as `web::ReqData<UserId>`.
pub async fn reject_anonymous_users(
    mut req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let session = {
        let (http_request, payload) = req.parts_mut();
        TypedSession::from_request(http_request, payload).await
    }?;

    let user_id = session
        .get_user_id()
        .map_err(|e| GeneralError::UnexpectedError(e.into()))?;

    match user_id {
        Some(user_id) => {
            req.extensions_mut().insert(UserId(user_id));
            next.call(req).await
        }
        None => {
            tracing::info!(path = %req.path(), "Rejecting an anonymous caller.");
            Err(GeneralError::Unauthorized.into())
        }
    }
}
