use axum::{
    http::{Method, StatusCode},
    Router,
};
use serde_json::json;

use super::{create_patient, send};
use crate::api::routes::tests::create_test_app;

async fn register_baby(app: &Router, midwife: &str, mother_id: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/postnatal/babies",
        Some(midwife),
        Some(json!({
            "mother_id": mother_id,
            "first_name": "Lina",
            "last_name": "Martin",
            "birth_date": "2024-09-30",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["success"], true);

    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_deliveries_are_listed_with_mother_name() {
    let app = create_test_app();
    let patient_id = create_patient(&app, "m1", None).await;

    for date in ["2024-09-28T08:15", "2024-09-30T23:40"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/postnatal/deliveries",
            Some("m1"),
            Some(json!({ "patient_id": patient_id, "delivery_date": date, "delivery_type": "vaginal" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, Method::GET, "/api/v1/postnatal/deliveries", Some("m1"), None).await;
    assert_eq!(status, StatusCode::OK);

    let deliveries = body["deliveries"].as_array().unwrap();
    assert_eq!(deliveries.len(), 2);
    assert_eq!(deliveries[0]["delivery_date"], "2024-09-30T23:40");
    assert_eq!(deliveries[0]["patient_name"], "Martin Claire");
}

#[tokio::test]
async fn test_malformed_delivery_date_is_bad_request() {
    let app = create_test_app();
    let patient_id = create_patient(&app, "m1", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/postnatal/deliveries",
        Some("m1"),
        Some(json!({ "patient_id": patient_id, "delivery_date": "30/09/2024", "delivery_type": "vaginal" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_babies_are_scoped_to_midwife() {
    let app = create_test_app();
    let mother_id = create_patient(&app, "m1", None).await;
    register_baby(&app, "m1", &mother_id).await;

    let (_, body) = send(&app, Method::GET, "/api/v1/postnatal/babies", Some("m1"), None).await;
    assert_eq!(body["babies"][0]["mother_name"], "Martin Claire");

    let (_, body) = send(&app, Method::GET, "/api/v1/postnatal/babies", Some("m2"), None).await;
    assert!(body["babies"].as_array().unwrap().is_empty());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/postnatal/babies",
        Some("m2"),
        Some(json!({
            "mother_id": mother_id,
            "first_name": "Noa",
            "last_name": "Martin",
            "birth_date": "2024-09-30",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkup_schedules_reminder() {
    let app = create_test_app();
    let mother_id = create_patient(&app, "m1", None).await;
    let baby_id = register_baby(&app, "m1", &mother_id).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/postnatal/checkup",
        Some("m1"),
        Some(json!({
            "checkup_type": "baby",
            "baby_id": baby_id,
            "checkup_date": "2024-10-02T10:00",
            "weight": 3.4,
            "next_checkup_date": "2024-10-09",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert!(body["reminder_id"].is_string());

    let (status, body) = send(&app, Method::GET, "/api/v1/postnatal/reminders", Some("m1"), None).await;
    assert_eq!(status, StatusCode::OK);
    let reminders = body["reminders"].as_array().unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0]["reminder_date"], "2024-10-09");
    assert_eq!(reminders[0]["reminder_type"], "baby");
    assert_eq!(reminders[0]["priority"], "normal");
}

#[tokio::test]
async fn test_checkup_of_foreign_baby_is_not_found() {
    let app = create_test_app();
    let mother_id = create_patient(&app, "m1", None).await;
    let baby_id = register_baby(&app, "m1", &mother_id).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/postnatal/checkup",
        Some("m2"),
        Some(json!({ "checkup_type": "baby", "baby_id": baby_id, "checkup_date": "2024-10-02T10:00" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vaccination_and_breastfeeding() {
    let app = create_test_app();
    let mother_id = create_patient(&app, "m1", None).await;
    let baby_id = register_baby(&app, "m1", &mother_id).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/postnatal/vaccination",
        Some("m1"),
        Some(json!({ "baby_id": baby_id, "vaccine_name": "Hepatitis B", "date_administered": "2024-10-01T11:20" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["reminder_id"].is_null());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/postnatal/breastfeeding",
        Some("m1"),
        Some(json!({
            "baby_id": baby_id,
            "mother_id": mother_id,
            "feeding_date": "2024-10-01T06:00",
            "feeding_type": "exclusive",
            "duration": 20,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/postnatal/vaccination",
        Some("m2"),
        Some(json!({ "baby_id": baby_id, "vaccine_name": "BCG", "date_administered": "2024-10-01T11:20" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
