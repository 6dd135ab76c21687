pub mod authentication;
pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod notifications;
pub mod payment_client;
pub mod routes;
pub mod services;
pub mod session_state;
pub mod startup;
pub mod telemetry;
pub mod validation;
