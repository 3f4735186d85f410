use axum::http::{Method, StatusCode};

use super::send;
use crate::api::routes::tests::create_test_app;

#[tokio::test]
async fn test_health_without_midwife_header() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    // In-memory storage is degraded but still serving
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["components"]["database"]["status"], "degraded");
    assert_eq!(body["components"]["api"]["status"], "ok");
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn test_api_routes_require_midwife() {
    let app = create_test_app();

    for uri in ["/api/v1/dashboard", "/api/v1/patients", "/api/v1/postnatal/reminders"] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["error"], "unauthorized");
    }
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = create_test_app();

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/calculator/gestational-age"].is_object());
}
