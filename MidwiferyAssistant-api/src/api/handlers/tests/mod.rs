mod calculator_test;
mod health_test;
mod postnatal_test;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::api::extractors::MIDWIFE_HEADER;

/// Send a request as `midwife` and decode the JSON body
pub(super) async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    midwife: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(midwife) = midwife {
        builder = builder.header(MIDWIFE_HEADER, midwife);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

/// Create a patient for `midwife` and return its id
pub(super) async fn create_patient(app: &Router, midwife: &str, last_period_date: Option<&str>) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/patients",
        Some(midwife),
        Some(serde_json::json!({
            "first_name": "Claire",
            "last_name": "Martin",
            "last_period_date": last_period_date,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    body["id"].as_str().unwrap().to_string()
}
