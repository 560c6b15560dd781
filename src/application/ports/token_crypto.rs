use crate::token_error::TokenError;

/// Keyed signing over opaque bytes.
///
/// `sign` is deterministic for a given key and payload. `verify` returns the
/// signed payload only for an intact envelope; every other case is
/// [`TokenError::SignatureInvalid`].
pub trait PayloadSigner: Send + Sync {
    fn sign(&self, payload: &[u8]) -> Result<String, TokenError>;

    fn verify(&self, envelope: &str) -> Result<Vec<u8>, TokenError>;
}

/// Authenticated symmetric encryption over opaque bytes.
///
/// Ciphertexts are self-contained (`nonce || sealed`). `decrypt` fails only
/// with [`TokenError::CiphertextTooShort`] or [`TokenError::AuthenticationFailed`].
pub trait PayloadCipher: Send + Sync {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, TokenError>;

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, TokenError>;
}
