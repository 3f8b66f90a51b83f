use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::CandidateRecord;
use super::settings::SettingsOverrides;
use super::ShortlistEngine;

/// Payload accepted by the shortlist endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShortlistRequest {
    #[serde(default)]
    pub candidates: Vec<CandidateRecord>,
    #[serde(default)]
    pub settings: SettingsOverrides,
}

/// Router builder exposing the ranking endpoint.
pub fn shortlist_router(engine: Arc<ShortlistEngine>) -> Router {
    Router::new()
        .route("/api/v1/shortlist", post(shortlist_handler))
        .with_state(engine)
}

pub(crate) async fn shortlist_handler(
    State(engine): State<Arc<ShortlistEngine>>,
    payload: Result<axum::Json<ShortlistRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(axum::Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected shortlist payload");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    let ShortlistRequest {
        candidates,
        settings,
    } = request;

    let outcome = if settings.is_empty() {
        engine.rank(candidates)
    } else {
        match engine.with_overrides(settings) {
            Ok(engine) => engine.rank(candidates),
            Err(error) => {
                warn!(%error, "rejected shortlist settings");
                return error_response(StatusCode::BAD_REQUEST, error.to_string());
            }
        }
    };

    (StatusCode::OK, axum::Json(outcome)).into_response()
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}
