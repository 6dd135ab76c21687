mod errors;
mod general_handler;
mod types;

use actix_web::{middleware::from_fn, web};

pub use errors::GeneralError;
pub use general_handler::{
    create_newsletter_member, delete_newsletter_member, payment_request, send_feedback,
};
pub use types::{FeedbackPayload, NewsletterMemberPayload, PaymentRequestPayload};

use crate::{
    authentication::reject_anonymous_users, notifications::FeedbackNotifier,
    services::GeneralService,
};

/// Mounts the newsletter, feedback and payment routes.
///
/// Expects `web::Data<S>` and `web::Data<N>` to be registered on the app.
pub fn general_routes<S, N>(cfg: &mut web::ServiceConfig)
where
    S: GeneralService + 'static,
    N: FeedbackNotifier + 'static,
{
    cfg.app_data(json_config())
        .route(
            "/newsletter/members",
            web::post().to(create_newsletter_member::<S>),
        )
        .route(
            "/newsletter/members",
            web::delete().to(delete_newsletter_member::<S>),
        )
        .route(
            "/newsletter/members/remove",
            web::post().to(delete_newsletter_member::<S>),
        )
        .route("/feedback", web::post().to(send_feedback::<N>))
        .service(
            web::scope("/payments")
                .wrap(from_fn(reject_anonymous_users))
                .route("", web::post().to(payment_request::<S>)),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| GeneralError::ParseError(err.to_string()).into())
}
