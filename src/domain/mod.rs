mod email_address;
mod newsletter_member;
mod payment_request;

pub use email_address::EmailAddress;
pub use newsletter_member::NewsletterMember;
pub use payment_request::PaymentRequest;
