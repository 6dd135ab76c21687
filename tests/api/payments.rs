use general_api::{domain::PaymentRequest, services::PaymentReceipt};
use uuid::Uuid;

use crate::helpers::{ServiceCall, error_body, spawn_app};

#[tokio::test]
async fn anonymous_callers_are_rejected_with_401() {
    let app = spawn_app().await;

    let response = app
        .post_json("/payments", &serde_json::json!({ "token": "tok", "amount": 5 }))
        .await;

    assert_eq!(401, response.status().as_u16());
    let body = error_body(response).await;
    assert_eq!(body["error"], "unauthorized");
    assert!(app.service.calls().is_empty());
}

#[tokio::test]
async fn payment_request_is_forwarded_with_the_caller_identity() {
    let app = spawn_app().await;
    let user_id = Uuid::new_v4();
    app.login(user_id).await;

    let response = app
        .post_json("/payments", &serde_json::json!({ "token": "tok", "amount": 5 }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let receipt: PaymentReceipt = response.json().await.unwrap();
    assert_eq!(receipt.user_id, user_id);
    assert_eq!(receipt.amount, 5.0);
    assert_eq!(
        app.service.calls(),
        vec![ServiceCall::PaymentRequest {
            user_id,
            request: PaymentRequest {
                token: "tok".into(),
                amount: 5.0,
            },
        }]
    );
}

#[tokio::test]
async fn amount_may_be_sent_as_a_numeric_string() {
    let app = spawn_app().await;
    app.login(Uuid::new_v4()).await;

    let response = app
        .post_json(
            "/payments",
            &serde_json::json!({ "token": "tok", "amount": "12.5" }),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    let receipt: PaymentReceipt = response.json().await.unwrap();
    assert_eq!(receipt.amount, 12.5);
}

#[tokio::test]
async fn payment_request_returns_400_naming_the_first_missing_field() {
    let app = spawn_app().await;
    app.login(Uuid::new_v4()).await;
    let test_cases = vec![
        (serde_json::json!({ "token": "", "amount": 5 }), "token"),
        (serde_json::json!({ "amount": 5 }), "token"),
        (serde_json::json!({}), "token"),
        (serde_json::json!({ "token": "tok" }), "amount"),
        (serde_json::json!({ "token": "tok", "amount": null }), "amount"),
    ];

    for (body, field) in test_cases {
        let response = app.post_json("/payments", &body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when {field} was missing."
        );
        let body = error_body(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["field"], field);
    }

    assert!(app.service.calls().is_empty());
}

#[tokio::test]
async fn non_numeric_amount_is_a_parse_error() {
    let app = spawn_app().await;
    app.login(Uuid::new_v4()).await;

    let response = app
        .post_json(
            "/payments",
            &serde_json::json!({ "token": "tok", "amount": "five" }),
        )
        .await;

    assert_eq!(400, response.status().as_u16());
    let body = error_body(response).await;
    assert_eq!(body["error"], "parse_error");
    assert!(app.service.calls().is_empty());
}

#[tokio::test]
async fn infinite_amount_is_rejected_before_reaching_the_service() {
    let app = spawn_app().await;
    app.login(Uuid::new_v4()).await;

    for amount in ["inf", "infinity", "-inf"] {
        let response = app
            .post_json(
                "/payments",
                &serde_json::json!({ "token": "tok", "amount": amount }),
            )
            .await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API accepted {amount} as a payment amount."
        );
        let body = error_body(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["field"], "amount");
    }

    assert!(app.service.calls().is_empty());
}
