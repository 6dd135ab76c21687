use serde_aux::field_attributes::deserialize_option_number_from_string;

use crate::{
    domain::{NewsletterMember, PaymentRequest},
    validation::{ValidationIssue, require, trim_string},
};

#[derive(serde::Deserialize, Debug)]
pub struct NewsletterMemberPayload {
    pub email: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
pub struct FeedbackPayload {
    pub content: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
pub struct PaymentRequestPayload {
    pub token: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub amount: Option<f64>,
}

impl TryFrom<NewsletterMemberPayload> for NewsletterMember {
    type Error = ValidationIssue;

    fn try_from(payload: NewsletterMemberPayload) -> Result<Self, Self::Error> {
        let email = require("email", trim_string(payload.email))?;
        Ok(Self { email })
    }
}

impl TryFrom<PaymentRequestPayload> for PaymentRequest {
    type Error = ValidationIssue;

    fn try_from(payload: PaymentRequestPayload) -> Result<Self, Self::Error> {
        let token = require("token", payload.token)?;
        let amount = require("amount", payload.amount)?;
        Ok(Self { token, amount })
    }
}
