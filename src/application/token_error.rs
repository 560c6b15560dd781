use thiserror::Error;

/// Failure kinds of the token pipeline and the authentication check.
///
/// Variants carry no cause detail. Causes are logged where they occur.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to serialize payload")]
    SerializationFailed,

    #[error("failed to encrypt payload")]
    EncryptionFailed,

    #[error("validity window overflows the expiry timestamp")]
    ValidityOverflow,

    #[error("invalid key material")]
    InvalidKey,

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("ciphertext authentication failed")]
    AuthenticationFailed,

    #[error("ciphertext is shorter than the nonce")]
    CiphertextTooShort,

    #[error("credential is not a well-formed bearer token")]
    MalformedCredential,

    #[error("failed to deserialize payload")]
    DeserializationFailed,

    #[error("token is expired")]
    Expired,
}

/// Terminal state of a rejected credential, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Malformed,
    Unauthenticated,
    Expired,
    Internal,
}

impl TokenError {
    pub fn outcome(&self) -> AuthOutcome {
        match self {
            TokenError::MalformedCredential => AuthOutcome::Malformed,
            TokenError::Expired => AuthOutcome::Expired,
            TokenError::SignatureInvalid
            | TokenError::AuthenticationFailed
            | TokenError::CiphertextTooShort
            | TokenError::DeserializationFailed => AuthOutcome::Unauthenticated,
            TokenError::SerializationFailed
            | TokenError::EncryptionFailed
            | TokenError::InvalidKey
            | TokenError::ValidityOverflow => AuthOutcome::Internal,
        }
    }

    /// Whether the caller should see "not authenticated" rather than an internal failure.
    pub fn is_auth_failure(&self) -> bool {
        self.outcome() != AuthOutcome::Internal
    }
}
