use actix_web::{HttpResponse, web};

use super::{
    errors::GeneralError,
    types::{FeedbackPayload, NewsletterMemberPayload, PaymentRequestPayload},
};
use crate::{
    authentication::UserId,
    domain::{NewsletterMember, PaymentRequest},
    notifications::FeedbackNotifier,
    services::GeneralService,
    session_state::CallerSession,
    validation::require,
};

#[tracing::instrument(
    name = "Adding a newsletter member",
    skip(payload, session, service),
    fields(request_id = %session.request_id)
)]
pub async fn create_newsletter_member<S: GeneralService>(
    payload: web::Json<NewsletterMemberPayload>,
    session: CallerSession,
    service: web::Data<S>,
) -> Result<HttpResponse, GeneralError> {
    let member: NewsletterMember = payload.into_inner().try_into()?;
    let record = service.create_newsletter_member(&session, member).await?;
    Ok(HttpResponse::Ok().json(record))
}

#[tracing::instrument(
    name = "Removing a newsletter member",
    skip(payload, session, service),
    fields(request_id = %session.request_id)
)]
pub async fn delete_newsletter_member<S: GeneralService>(
    payload: web::Json<NewsletterMemberPayload>,
    session: CallerSession,
    service: web::Data<S>,
) -> Result<HttpResponse, GeneralError> {
    let member: NewsletterMember = payload.into_inner().try_into()?;
    let removal = service.delete_newsletter_member(&session, member).await?;
    Ok(HttpResponse::Ok().json(removal))
}

#[tracing::instrument(name = "Submitting feedback", skip(payload, notifier))]
pub async fn send_feedback<N: FeedbackNotifier>(
    payload: web::Json<FeedbackPayload>,
    notifier: web::Data<N>,
) -> Result<HttpResponse, GeneralError> {
    let content = require("content", payload.into_inner().content)?;
    // TODO: move feedback delivery behind GeneralService once it owns the mailer
    notifier.feedback_email(&content);
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(
    name = "Requesting a payment",
    skip(payload, session, service, user_id),
    fields(request_id = %session.request_id, user_id = %&*user_id)
)]
pub async fn payment_request<S: GeneralService>(
    payload: web::Json<PaymentRequestPayload>,
    session: CallerSession,
    user_id: web::ReqData<UserId>,
    service: web::Data<S>,
) -> Result<HttpResponse, GeneralError> {
    let request: PaymentRequest = payload.into_inner().try_into()?;
    let receipt = service
        .payment_request(&session, user_id.into_inner(), request)
        .await?;
    Ok(HttpResponse::Ok().json(receipt))
}
