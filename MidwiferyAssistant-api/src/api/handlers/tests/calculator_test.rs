use axum::http::{Method, StatusCode};
use serde_json::json;

use super::send;
use crate::api::routes::tests::create_test_app;

const URI: &str = "/api/v1/calculator/gestational-age";

#[tokio::test]
async fn test_gestational_age_at_reference_date() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        URI,
        Some("m1"),
        Some(json!({ "lastPeriod": "2024-01-01", "referenceDate": "2024-04-01" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weeks"], 13);
    assert_eq!(body["days"], 0);
    assert_eq!(body["dueDate"], "2024-10-07");
    assert!(!body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_long_cycle_moves_due_date() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        URI,
        Some("m1"),
        Some(json!({ "lastPeriod": "2024-01-01", "cycleLength": 35, "referenceDate": "2024-04-01" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dueDate"], "2024-10-14");
    assert_eq!(body["weeks"], 12);
}

#[tokio::test]
async fn test_zero_cycle_length_is_invalid_input() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        URI,
        Some("m1"),
        Some(json!({ "lastPeriod": "2024-01-01", "cycleLength": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_last_period_after_reference_is_invalid_input() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        URI,
        Some("m1"),
        Some(json!({ "lastPeriod": "2024-05-01", "referenceDate": "2024-04-01" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_calculator_requires_midwife() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::POST, URI, None, Some(json!({ "lastPeriod": "2024-01-01" }))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}
