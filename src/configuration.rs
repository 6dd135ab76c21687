use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::domain::EmailAddress;
use crate::email_client::EmailClient;
use crate::payment_client::PaymentClient;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub payment_client: PaymentClientSettings,
    pub redis_uri: SecretString,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    pub feedback_recipient: String,
    pub auth_token: SecretString,
    pub timeout_ms: u64,
}

impl EmailClientSettings {
    pub fn client(self) -> Result<EmailClient, anyhow::Error> {
        let sender_email = self.sender().map_err(anyhow::Error::msg)?;
        let timeout = self.timeout();
        EmailClient::new(self.base_url, sender_email, self.auth_token, timeout)
    }

    pub fn sender(&self) -> Result<EmailAddress, String> {
        EmailAddress::parse(self.sender_email.clone())
    }

    pub fn feedback_recipient(&self) -> Result<EmailAddress, String> {
        EmailAddress::parse(self.feedback_recipient.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct PaymentClientSettings {
    pub base_url: String,
    pub secret_key: SecretString,
    pub currency: String,
    pub timeout_ms: u64,
}

impl PaymentClientSettings {
    pub fn client(self) -> Result<PaymentClient, anyhow::Error> {
        let timeout = self.timeout();
        PaymentClient::new(self.base_url, self.secret_key, self.currency, timeout)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub hmac_secret: SecretString,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: SecretString,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
}

impl DatabaseSettings {
    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db()
            .database(&self.database_name)
            .log_statements(tracing::log::LevelFilter::Trace)
    }

    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(ssl_mode)
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{other} is not supported environment. Try to use `local` or `production`",
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, anyhow::Error> {
    let base_path = std::env::current_dir()?;
    let conf_dir = base_path.join("configuration");
    let env: Environment = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let settings = config::Config::builder()
        .add_source(config::File::from(conf_dir.join("base")).required(true))
        .add_source(config::File::from(conf_dir.join(env.as_str())).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .prefix_separator("_"),
        )
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?)
}
