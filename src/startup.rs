use crate::configuration::{DatabaseSettings, Settings};
use crate::notifications::{FeedbackMailer, FeedbackNotifier};
use crate::routes::{general_routes, health_check};
use crate::services::{GeneralService, PgGeneralService};
use actix_session::SessionMiddleware;
use actix_session::storage::RedisSessionStore;
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use secrecy::ExposeSecret;
use secrecy::SecretString;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let feedback_recipient = config
            .email_client
            .feedback_recipient()
            .map_err(anyhow::Error::msg)
            .context("Invalid feedback recipient email address.")?;
        let email_client = config.email_client.client()?;
        let payment_client = config.payment_client.client()?;

        let connection_pool = get_connection_pool(&config.database);
        let service = PgGeneralService::new(connection_pool, payment_client);
        let notifier = FeedbackMailer::new(email_client, feedback_recipient);

        let address = format!("{}:{}", config.app.host, config.app.port);
        let listener =
            TcpListener::bind(&address).with_context(|| format!("Failed to bind {address}"))?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            service,
            notifier,
            config.app.hmac_secret,
            config.redis_uri,
        )
        .await?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub async fn run<S, N>(
    listener: TcpListener,
    service: S,
    notifier: N,
    hmac_secret: SecretString,
    redis_uri: SecretString,
) -> Result<Server, anyhow::Error>
where
    S: GeneralService + Send + Sync + 'static,
    N: FeedbackNotifier + Send + Sync + 'static,
{
    let service = web::Data::new(service);
    let notifier = web::Data::new(notifier);
    let secret_key = Key::try_from(hmac_secret.expose_secret().as_bytes())
        .map_err(|e| anyhow::anyhow!(e))
        .context("The hmac secret must be at least 64 bytes long.")?;
    let redis_store = RedisSessionStore::new(redis_uri.expose_secret()).await?;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(SessionMiddleware::new(
                redis_store.clone(),
                secret_key.clone(),
            ))
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .configure(general_routes::<S, N>)
            .app_data(service.clone())
            .app_data(notifier.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn get_connection_pool(db_config: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(db_config.with_db())
}
