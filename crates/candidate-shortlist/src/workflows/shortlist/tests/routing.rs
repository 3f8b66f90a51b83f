use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::shortlist::router::shortlist_handler;
use crate::workflows::shortlist::{shortlist_router, SettingsOverrides, ShortlistRequest};

fn post(body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post("/api/v1/shortlist")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn shortlist_route_returns_finalists() {
    let router = shortlist_router(Arc::new(engine()));

    let response = router
        .oneshot(post(request_body(&batch(), json!({}))))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_candidates"], 4);
    assert_eq!(payload["filtered_candidates"], 4);
    let finalists = payload["finalists"].as_array().expect("finalists array");
    assert_eq!(finalists.len(), 3);
    assert_eq!(finalists[0]["name"], "Ada");
    assert_eq!(finalists[0]["exp_years"], 10);
    assert_eq!(finalists[0]["github"], "https://github.com/ada");
    assert!(finalists[0]["explanation"]
        .as_str()
        .expect("explanation string")
        .starts_with("Strong skills match"));
}

#[tokio::test]
async fn shortlist_route_applies_setting_overrides() {
    let router = shortlist_router(Arc::new(engine()));

    let response = router
        .oneshot(post(request_body(
            &batch(),
            json!({ "top_n": 1, "skill_weight": 0, "experience_weight": 1 }),
        )))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["requested"], 1);
    assert_eq!(payload["weights"]["experience"], 1.0);
    assert_eq!(payload["finalists"][0]["name"], "Ada");
}

#[tokio::test]
async fn shortlist_route_passes_unknown_fields_through() {
    let router = shortlist_router(Arc::new(engine()));
    let body = json!({
        "candidates": [{
            "name": "Edsger",
            "email": "edsger@example.com",
            "skills": ["Python"],
            "work_experiences": [{ "startDate": "Jan 2015", "endDate": null, "company": "CWI" }]
        }]
    });

    let response = router.oneshot(post(body)).await.expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let finalist = &payload["finalists"][0];
    assert_eq!(finalist["email"], "edsger@example.com");
    assert_eq!(finalist["exp_years"], 10);
    assert_eq!(finalist["work_experiences"][0]["company"], "CWI");
}

#[tokio::test]
async fn shortlist_handler_rejects_invalid_overrides() {
    let request = ShortlistRequest {
        candidates: batch(),
        settings: SettingsOverrides {
            top_n: Some(0),
            ..SettingsOverrides::default()
        },
    };

    let response = shortlist_handler(State(Arc::new(engine())), Ok(axum::Json(request))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "top_n must be at least 1");
}

#[tokio::test]
async fn shortlist_handler_accepts_empty_batches() {
    let response =
        shortlist_handler(State(Arc::new(engine())), Ok(axum::Json(ShortlistRequest::default())))
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["finalists"], json!([]));
}

#[tokio::test]
async fn shortlist_route_reports_malformed_bodies_as_json() {
    let router = shortlist_router(Arc::new(engine()));
    let request = axum::http::Request::post("/api/v1/shortlist")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{\"candidates\": ["))
        .unwrap();

    let response = router.oneshot(request).await.expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"].as_str().is_some_and(|message| !message.is_empty()));
}

#[tokio::test]
async fn shortlist_route_reports_mistyped_bodies_as_json() {
    let router = shortlist_router(Arc::new(engine()));

    let response = router
        .oneshot(post(json!({ "candidates": "not-a-list" })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"].is_string());
}

#[tokio::test]
async fn shortlist_route_requires_a_json_content_type() {
    let router = shortlist_router(Arc::new(engine()));
    let request = axum::http::Request::post("/api/v1/shortlist")
        .body(axum::body::Body::from("{}"))
        .unwrap();

    let response = router.oneshot(request).await.expect("route executes");

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let payload = read_json_body(response).await;
    assert!(payload["error"].is_string());
}
