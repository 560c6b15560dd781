use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{
    adapters::http::app_state::AppState, app_error::AppError, domain::entities::payload::Payload,
    token_error::TokenError,
};

/// Payload of a verified, unexpired bearer token from the `Authorization` header.
pub struct Authenticated(pub Payload);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let credential = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::InvalidCredentials(TokenError::MalformedCredential))?;

        let payload = state.authenticator.authenticate(credential)?;
        Ok(Authenticated(payload))
    }
}
