use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ServiceError;
use crate::{
    authentication::UserId,
    domain::{NewsletterMember, PaymentRequest},
    session_state::CallerSession,
};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NewsletterMemberRecord {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NewsletterMemberRemoval {
    pub email: String,
    pub removed: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaymentReceipt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub status: String,
    pub charge_id: Option<String>,
}

/// Business operations the general routes delegate to.
///
/// Implementations own the state (members, payments); handlers only
/// validate input and serialize whatever comes back.
#[allow(async_fn_in_trait)]
pub trait GeneralService {
    async fn create_newsletter_member(
        &self,
        session: &CallerSession,
        member: NewsletterMember,
    ) -> Result<NewsletterMemberRecord, ServiceError>;

    async fn delete_newsletter_member(
        &self,
        session: &CallerSession,
        member: NewsletterMember,
    ) -> Result<NewsletterMemberRemoval, ServiceError>;

    async fn payment_request(
        &self,
        session: &CallerSession,
        user_id: UserId,
        request: PaymentRequest,
    ) -> Result<PaymentReceipt, ServiceError>;
}
