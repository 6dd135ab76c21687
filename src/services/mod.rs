mod errors;
mod general_service;
mod pg_general_service;

pub use errors::ServiceError;
pub use general_service::{
    GeneralService, NewsletterMemberRecord, NewsletterMemberRemoval, PaymentReceipt,
};
pub use pg_general_service::PgGeneralService;
