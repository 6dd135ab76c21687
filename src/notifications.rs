use anyhow::Context;
use tracing::Instrument;

use crate::{domain::EmailAddress, email_client::EmailClient, routes::prepare_html_template};

/// Sends notifications about submitted feedback.
///
/// Delivery is fire-and-forget: callers never learn whether it succeeded.
pub trait FeedbackNotifier {
    fn feedback_email(&self, content: &str);
}

#[derive(Clone)]
pub struct FeedbackMailer {
    email_client: EmailClient,
    recipient: EmailAddress,
}

impl FeedbackMailer {
    pub fn new(email_client: EmailClient, recipient: EmailAddress) -> Self {
        Self {
            email_client,
            recipient,
        }
    }

    #[tracing::instrument(name = "Delivering a feedback email", skip(self, content))]
    pub async fn deliver(&self, content: &str) -> Result<(), anyhow::Error> {
        let html = prepare_html_template(&[("content", content)], "feedback_email.html")
            .context("Failed to render the feedback email template.")?;

        self.email_client
            .send_email(&self.recipient, "New feedback", &html, content)
            .await
            .context("Failed to send the feedback email.")?;

        Ok(())
    }
}

impl FeedbackNotifier for FeedbackMailer {
    fn feedback_email(&self, content: &str) {
        let mailer = self.clone();
        let content = content.to_owned();

        tokio::spawn(
            async move {
                if let Err(e) = mailer.deliver(&content).await {
                    tracing::error!(
                        error.cause_chain = ?e,
                        error.message = %e,
                        "Feedback email was not delivered"
                    );
                }
            }
            .in_current_span(),
        );
    }
}
