use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::EmailAddress;

#[derive(Clone, Debug)]
pub struct EmailClient {
    http_client: Client,
    send_url: Url,
    sender: EmailAddress,
    auth_token: SecretString,
}

#[derive(Serialize)]
struct EmailUnit<'a> {
    email: &'a str,
}

impl<'a> EmailUnit<'a> {
    fn new(email: &'a str) -> Self {
        Self { email }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: EmailUnit<'a>,
    to: Vec<EmailUnit<'a>>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: EmailAddress,
        auth_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the email API http client.")?;
        let send_url = Url::parse(&base_url)
            .and_then(|url| url.join("v1/email"))
            .context("Failed parsing base email api url.")?;

        Ok(Self {
            http_client,
            send_url,
            sender,
            auth_token,
        })
    }

    #[tracing::instrument(
        name = "Sending an email",
        skip(self, html_content, text_content),
        fields(recipient = %recipient)
    )]
    pub async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), reqwest::Error> {
        let body = SendEmailRequest {
            from: EmailUnit::new(self.sender.as_ref()),
            to: vec![EmailUnit::new(recipient.as_ref())],
            html: html_content,
            text: text_content,
            subject,
        };

        self.http_client
            .post(self.send_url.clone())
            .bearer_auth(self.auth_token.expose_secret())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
