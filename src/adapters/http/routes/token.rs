use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;

use crate::{
    adapters::http::{app_state::AppState, extract::Authenticated},
    app_error::{AppError, AppResult},
    domain::entities::payload::{ClaimSet, Payload},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate))
        .route("/verify", get(verify))
        .route("/auth", get(auth))
}

#[derive(Serialize)]
struct TokenResponse {
    token: String,
}

async fn generate(
    State(app_state): State<AppState>,
    body: Result<Json<ClaimSet>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(claims) = body.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    claims
        .validate()
        .map_err(|msg| AppError::InvalidInput(msg.to_string()))?;

    let token = app_state.token_manager.issue(claims)?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

async fn verify(Authenticated(payload): Authenticated) -> Json<Payload> {
    Json(payload)
}

/// Forward-auth style check: empty body, claims echoed as headers.
async fn auth(
    State(app_state): State<AppState>,
    Authenticated(payload): Authenticated,
) -> impl IntoResponse {
    (StatusCode::OK, app_state.claim_headers.header_map(&payload.claims))
}
