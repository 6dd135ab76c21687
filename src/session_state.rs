use std::future::{Ready, ready};

use actix_session::{Session, SessionExt, SessionGetError, SessionInsertError};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use tracing_actix_web::RequestId;
use uuid::Uuid;

pub struct TypedSession(Session);

impl TypedSession {
    const USER_ID_KEY: &'static str = "user_id";

    pub fn renew(&self) {
        self.0.renew();
    }

    pub fn insert_user_id(&self, user_id: Uuid) -> Result<(), SessionInsertError> {
        self.0.insert(Self::USER_ID_KEY, user_id)
    }

    pub fn get_user_id(&self) -> Result<Option<Uuid>, SessionGetError> {
        self.0.get(Self::USER_ID_KEY)
    }
}

impl FromRequest for TypedSession {
    type Error = <Session as FromRequest>::Error;
    type Future = Ready<Result<TypedSession, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(TypedSession(req.get_session())))
    }
}

/// Who is calling, as far as the service layer needs to know.
///
/// Built for every request; `user_id` is only set when the session carries
/// a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerSession {
    pub request_id: String,
    pub user_id: Option<Uuid>,
}

impl CallerSession {
    pub fn from_http_request(req: &HttpRequest) -> Self {
        let request_id = req
            .extensions()
            .get::<RequestId>()
            .map(ToString::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let user_id = match TypedSession(req.get_session()).get_user_id() {
            Ok(user_id) => user_id,
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    "Ignoring an unreadable user id stored in the session."
                );
                None
            }
        };

        Self {
            request_id,
            user_id,
        }
    }
}

impl FromRequest for CallerSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<CallerSession, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(CallerSession::from_http_request(req)))
    }
}
