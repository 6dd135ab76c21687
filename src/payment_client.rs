use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::PaymentRequest;

/// Thin client for the payment processor's charge API.
#[derive(Clone, Debug)]
pub struct PaymentClient {
    http_client: Client,
    charges_url: Url,
    secret_key: SecretString,
    currency: String,
}

#[derive(Serialize)]
struct ChargeRequest<'a> {
    source: &'a str,
    amount_cents: i64,
    currency: &'a str,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Charge {
    pub id: String,
    pub status: String,
}

impl PaymentClient {
    pub fn new(
        base_url: String,
        secret_key: SecretString,
        currency: String,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the payment API http client.")?;
        let charges_url = Url::parse(&base_url)
            .and_then(|url| url.join("v1/charges"))
            .context("Failed parsing base payment api url.")?;

        Ok(Self {
            http_client,
            charges_url,
            secret_key,
            currency,
        })
    }

    /// Charges `request.token` for `request.amount`.
    ///
    /// The processor deduplicates on `idempotency_key`, so retrying with the
    /// same key never charges twice.
    #[tracing::instrument(
        name = "Charging a payment token",
        skip(self, request),
        fields(amount = request.amount)
    )]
    pub async fn charge(
        &self,
        request: &PaymentRequest,
        idempotency_key: Uuid,
    ) -> Result<Charge, reqwest::Error> {
        let body = ChargeRequest {
            source: &request.token,
            amount_cents: request.amount_cents(),
            currency: &self.currency,
        };

        self.http_client
            .post(self.charges_url.clone())
            .bearer_auth(self.secret_key.expose_secret())
            .header("Idempotency-Key", idempotency_key.to_string())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<Charge>()
            .await
    }
}
