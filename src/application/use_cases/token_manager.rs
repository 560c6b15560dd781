use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use tracing::instrument;

use crate::{
    application::ports::token_crypto::{PayloadCipher, PayloadSigner},
    domain::entities::payload::{ClaimSet, Metadata, Payload},
    token_error::TokenError,
};

/// Turns payloads into signed (and optionally encrypted) tokens and back.
///
/// Issuance: serialize, encrypt if a cipher is attached, sign.
/// Parsing runs the exact reverse and verifies the signature before anything
/// else touches the bytes. Expiry is not checked here; see
/// [`Authenticator`](super::authentication::Authenticator).
pub struct TokenManager {
    signer: Arc<dyn PayloadSigner>,
    cipher: Option<Arc<dyn PayloadCipher>>,
    validity: Duration,
}

impl TokenManager {
    pub fn new(signer: Arc<dyn PayloadSigner>, validity: Duration) -> Self {
        Self {
            signer,
            cipher: None,
            validity,
        }
    }

    /// Attach payload encryption. Only used while wiring the manager up.
    pub fn with_cipher(mut self, cipher: Arc<dyn PayloadCipher>) -> Self {
        self.cipher = Some(cipher);
        self
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// A zero validity window disables expiry enforcement.
    pub fn never_expires(&self) -> bool {
        self.validity.is_zero()
    }

    pub fn encrypts_payload(&self) -> bool {
        self.cipher.is_some()
    }

    #[instrument(skip(self))]
    pub fn issue(&self, claims: ClaimSet) -> Result<String, TokenError> {
        self.issue_at(claims, OffsetDateTime::now_utc())
    }

    #[instrument(skip(self))]
    pub fn issue_at(&self, claims: ClaimSet, now: OffsetDateTime) -> Result<String, TokenError> {
        let metadata = Metadata::starting_at(now, self.validity).ok_or_else(|| {
            tracing::error!(validity = %self.validity, "expiry timestamp out of range");
            TokenError::ValidityOverflow
        })?;
        let payload = Payload { claims, metadata };
        self.generate(&payload)
    }

    pub fn generate(&self, payload: &Payload) -> Result<String, TokenError> {
        let mut raw = serde_json::to_vec(payload).map_err(|e| {
            tracing::error!(error = %e, "payload serialization failed");
            TokenError::SerializationFailed
        })?;

        if let Some(cipher) = &self.cipher {
            raw = cipher.encrypt(&raw)?;
        }

        self.signer.sign(&raw)
    }

    #[instrument(skip(self, token))]
    pub fn parse(&self, token: &str) -> Result<Payload, TokenError> {
        let mut raw = self.signer.verify(token)?;

        if let Some(cipher) = &self.cipher {
            raw = cipher.decrypt(&raw)?;
        }

        serde_json::from_slice(&raw).map_err(|e| {
            tracing::warn!(error = %e, "authentic token carried an unreadable payload");
            TokenError::DeserializationFailed
        })
    }
}
