use std::time::Duration;

use claims::{assert_matches, assert_ok};
use general_api::{
    authentication::UserId,
    domain::{NewsletterMember, PaymentRequest},
    payment_client::PaymentClient,
    services::{GeneralService, PgGeneralService, ServiceError},
    session_state::CallerSession,
};
use secrecy::SecretString;
use sqlx::PgPool;
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use crate::helpers::spawn_database;

struct TestService {
    service: PgGeneralService,
    db_pool: PgPool,
    payment_server: MockServer,
}

async fn spawn_service() -> TestService {
    let db_pool = spawn_database().await;
    let payment_server = MockServer::start().await;
    let payment_client = PaymentClient::new(
        payment_server.uri(),
        SecretString::from("sk_test"),
        "usd".into(),
        Duration::from_millis(200),
    )
    .expect("Failed to build the payment client.");

    TestService {
        service: PgGeneralService::new(db_pool.clone(), payment_client),
        db_pool,
        payment_server,
    }
}

fn caller(user_id: Option<Uuid>) -> CallerSession {
    CallerSession {
        request_id: Uuid::new_v4().to_string(),
        user_id,
    }
}

fn member(email: &str) -> NewsletterMember {
    NewsletterMember {
        email: email.into(),
    }
}

fn payment() -> PaymentRequest {
    PaymentRequest {
        token: "tok_visa".into(),
        amount: 12.5,
    }
}

async fn stored_payment(pool: &PgPool, user_id: Uuid) -> (String, Option<String>) {
    sqlx::query_as::<_, (String, Option<String>)>(
        "SELECT status, charge_id FROM payment_requests WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .expect("Failed to fetch the stored payment request.")
}

#[tokio::test]
async fn create_persists_the_new_member() {
    let app = spawn_service().await;

    let record = app
        .service
        .create_newsletter_member(&caller(None), member("ursula@example.com"))
        .await
        .expect("Failed to create the member.");

    let (email,): (String,) = sqlx::query_as("SELECT email FROM newsletter_members WHERE id = $1")
        .bind(record.id)
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to fetch the saved member.");
    assert_eq!(email, "ursula@example.com");
    assert_eq!(record.email, "ursula@example.com");
}

#[tokio::test]
async fn creating_an_existing_member_is_a_conflict() {
    let app = spawn_service().await;
    let session = caller(None);

    assert_ok!(
        app.service
            .create_newsletter_member(&session, member("ursula@example.com"))
            .await
    );
    let error = app
        .service
        .create_newsletter_member(&session, member("ursula@example.com"))
        .await
        .unwrap_err();

    assert_matches!(&error, ServiceError::Conflict(_));
    assert_eq!(error.status_code().as_u16(), 409);
}

#[tokio::test]
async fn create_rejects_a_malformed_email() {
    let app = spawn_service().await;

    let error = app
        .service
        .create_newsletter_member(&caller(None), member("ursula.example.com"))
        .await
        .unwrap_err();

    assert_matches!(&error, ServiceError::InvalidEmail(_));
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM newsletter_members")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn delete_reports_whether_the_member_existed() {
    let app = spawn_service().await;
    let session = caller(None);
    assert_ok!(
        app.service
            .create_newsletter_member(&session, member("ursula@example.com"))
            .await
    );

    let first = app
        .service
        .delete_newsletter_member(&session, member("ursula@example.com"))
        .await
        .expect("Failed to delete the member.");
    let second = app
        .service
        .delete_newsletter_member(&session, member("ursula@example.com"))
        .await
        .expect("Failed to delete the member.");

    assert!(first.removed);
    assert!(!second.removed);
    assert_eq!(second.email, "ursula@example.com");
}

#[tokio::test]
async fn successful_charge_is_recorded_with_its_charge_id() {
    let app = spawn_service().await;
    let user_id = Uuid::new_v4();

    Mock::given(path("v1/charges"))
        .and(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": "ch_1", "status": "succeeded" })),
        )
        .expect(1)
        .mount(&app.payment_server)
        .await;

    let receipt = app
        .service
        .payment_request(&caller(Some(user_id)), UserId::from(user_id), payment())
        .await
        .expect("Failed to process the payment.");

    assert_eq!(receipt.status, "succeeded");
    assert_eq!(receipt.charge_id.as_deref(), Some("ch_1"));
    assert_eq!(
        stored_payment(&app.db_pool, user_id).await,
        ("succeeded".to_string(), Some("ch_1".to_string()))
    );
}

#[tokio::test]
async fn declined_charge_marks_the_payment_failed() {
    let app = spawn_service().await;
    let user_id = Uuid::new_v4();

    Mock::given(path("v1/charges"))
        .respond_with(ResponseTemplate::new(402))
        .expect(1)
        .mount(&app.payment_server)
        .await;

    let error = app
        .service
        .payment_request(&caller(Some(user_id)), UserId::from(user_id), payment())
        .await
        .unwrap_err();

    assert_matches!(&error, ServiceError::PaymentDeclined(_));
    assert_eq!(
        stored_payment(&app.db_pool, user_id).await,
        ("failed".to_string(), None)
    );
}

#[tokio::test]
async fn processor_outage_leaves_the_payment_pending() {
    let app = spawn_service().await;
    let user_id = Uuid::new_v4();

    Mock::given(path("v1/charges"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.payment_server)
        .await;

    let error = app
        .service
        .payment_request(&caller(Some(user_id)), UserId::from(user_id), payment())
        .await
        .unwrap_err();

    assert_matches!(&error, ServiceError::Unexpected(_));
    assert_eq!(
        stored_payment(&app.db_pool, user_id).await,
        ("pending".to_string(), None)
    );
}
