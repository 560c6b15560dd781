use std::sync::Arc;

use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    application::use_cases::token_manager::TokenManager, domain::entities::payload::Payload,
    token_error::TokenError,
};

const BEARER_PREFIX: &str = "Bearer ";

/// Returns the token part of `Bearer <a>.<b>.<c>`, or `None` when the
/// credential does not have that exact shape.
pub fn extract_bearer_token(credential: &str) -> Option<&str> {
    let token = credential.strip_prefix(BEARER_PREFIX)?;
    if token.chars().any(char::is_whitespace) {
        return None;
    }
    let mut segments = token.split('.');
    let well_formed = segments.by_ref().take(3).filter(|s| !s.is_empty()).count() == 3
        && segments.next().is_none();
    well_formed.then_some(token)
}

/// Bearer credential check: shape, signature (via the token manager), expiry.
pub struct Authenticator {
    tokens: Arc<TokenManager>,
}

impl Authenticator {
    pub fn new(tokens: Arc<TokenManager>) -> Self {
        Self { tokens }
    }

    #[instrument(skip(self, credential))]
    pub fn authenticate(&self, credential: &str) -> Result<Payload, TokenError> {
        self.authenticate_at(credential, OffsetDateTime::now_utc())
    }

    #[instrument(skip(self, credential))]
    pub fn authenticate_at(
        &self,
        credential: &str,
        now: OffsetDateTime,
    ) -> Result<Payload, TokenError> {
        self.check(credential, now).inspect_err(|e| {
            tracing::debug!(error = %e, outcome = ?e.outcome(), "credential rejected");
        })
    }

    fn check(&self, credential: &str, now: OffsetDateTime) -> Result<Payload, TokenError> {
        let token = extract_bearer_token(credential).ok_or(TokenError::MalformedCredential)?;
        let payload = self.tokens.parse(token)?;

        if !self.tokens.never_expires() && payload.metadata.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(payload)
    }
}
