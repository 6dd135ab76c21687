use anyhow::Context;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    GeneralService, NewsletterMemberRecord, NewsletterMemberRemoval, PaymentReceipt, ServiceError,
};
use crate::{
    authentication::UserId,
    domain::{EmailAddress, NewsletterMember, PaymentRequest},
    payment_client::PaymentClient,
    session_state::CallerSession,
};

#[derive(Clone)]
pub struct PgGeneralService {
    pool: PgPool,
    payment_client: PaymentClient,
}

impl PgGeneralService {
    pub fn new(pool: PgPool, payment_client: PaymentClient) -> Self {
        Self {
            pool,
            payment_client,
        }
    }
}

impl GeneralService for PgGeneralService {
    #[tracing::instrument(
        name = "Saving a new newsletter member",
        skip(self, session, member),
        fields(request_id = %session.request_id, member_email = %member.email)
    )]
    async fn create_newsletter_member(
        &self,
        session: &CallerSession,
        member: NewsletterMember,
    ) -> Result<NewsletterMemberRecord, ServiceError> {
        let email = EmailAddress::parse(member.email).map_err(ServiceError::InvalidEmail)?;
        let id = Uuid::new_v4();
        let created_at = Utc::now();

        let inserted = sqlx::query(
            r#"
            INSERT INTO newsletter_members (id, email, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(email.as_ref())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert a newsletter member in the database.")?;

        if inserted.rows_affected() == 0 {
            return Err(ServiceError::Conflict(format!(
                "{email} is already a newsletter member."
            )));
        }

        Ok(NewsletterMemberRecord {
            id,
            email: email.as_ref().to_owned(),
            created_at,
        })
    }

    #[tracing::instrument(
        name = "Removing a newsletter member",
        skip(self, session, member),
        fields(request_id = %session.request_id, member_email = %member.email)
    )]
    async fn delete_newsletter_member(
        &self,
        session: &CallerSession,
        member: NewsletterMember,
    ) -> Result<NewsletterMemberRemoval, ServiceError> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM newsletter_members WHERE email = $1
            "#,
        )
        .bind(&member.email)
        .execute(&self.pool)
        .await
        .context("Failed to delete a newsletter member from the database.")?;

        Ok(NewsletterMemberRemoval {
            email: member.email,
            removed: deleted.rows_affected() > 0,
        })
    }

    #[tracing::instrument(
        name = "Processing a payment request",
        skip(self, session, request),
        fields(request_id = %session.request_id, %user_id, amount = request.amount)
    )]
    async fn payment_request(
        &self,
        session: &CallerSession,
        user_id: UserId,
        request: PaymentRequest,
    ) -> Result<PaymentReceipt, ServiceError> {
        let payment_id = Uuid::new_v4();
        insert_payment_request(&self.pool, payment_id, user_id, session, &request)
            .await
            .context("Failed to store the payment request.")?;

        let charge = match self.payment_client.charge(&request, payment_id).await {
            Ok(charge) => charge,
            Err(e) => {
                let error = charge_error(e);
                if let ServiceError::PaymentDeclined(_) = error {
                    if let Err(update_error) =
                        update_payment_status(&self.pool, payment_id, "failed", None).await
                    {
                        tracing::error!(
                            error.cause_chain = ?update_error,
                            "Failed to mark the payment request as failed."
                        );
                    }
                } else {
                    // Charge outcome unknown, the row stays pending.
                    tracing::warn!(%payment_id, "Leaving the payment request pending.");
                }
                return Err(error);
            }
        };

        update_payment_status(&self.pool, payment_id, &charge.status, Some(&charge.id))
            .await
            .context("Failed to record the charge of a payment request.")?;

        Ok(PaymentReceipt {
            id: payment_id,
            user_id: *user_id,
            amount: request.amount,
            status: charge.status,
            charge_id: Some(charge.id),
        })
    }
}

fn charge_error(e: reqwest::Error) -> ServiceError {
    match e.status() {
        Some(status) if status.is_client_error() => ServiceError::PaymentDeclined(e),
        _ => ServiceError::Unexpected(
            anyhow::Error::new(e).context("Failed to charge the payment token."),
        ),
    }
}

#[tracing::instrument(name = "Saving a pending payment request", skip_all)]
async fn insert_payment_request(
    pool: &PgPool,
    payment_id: Uuid,
    user_id: UserId,
    session: &CallerSession,
    request: &PaymentRequest,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO payment_requests (id, user_id, request_id, amount, status, created_at)
        VALUES ($1, $2, $3, $4, 'pending', $5)
        "#,
    )
    .bind(payment_id)
    .bind(*user_id)
    .bind(&session.request_id)
    .bind(request.amount)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

#[tracing::instrument(name = "Updating payment request status", skip(pool))]
async fn update_payment_status(
    pool: &PgPool,
    payment_id: Uuid,
    status: &str,
    charge_id: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE payment_requests
        SET status = $2, charge_id = $3
        WHERE id = $1
        "#,
    )
    .bind(payment_id)
    .bind(status)
    .bind(charge_id)
    .execute(pool)
    .await?;

    Ok(())
}
