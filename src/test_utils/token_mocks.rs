//! Recording doubles for the token crypto ports.
//!
//! They keep every input they receive so tests can assert on pipeline order
//! and call counts without real cryptography.

use std::sync::Mutex;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::{
    application::ports::token_crypto::{PayloadCipher, PayloadSigner},
    token_error::TokenError,
};

// ============================================================================
// RecordingSigner
// ============================================================================

#[derive(Clone, Copy, Default, PartialEq, Eq)]
enum SignerMode {
    #[default]
    Transparent,
    Rejecting,
    Failing,
}

/// Signer that frames payloads as `stub.<b64url payload>.sig` and records calls.
#[derive(Default)]
pub struct RecordingSigner {
    mode: SignerMode,
    signed: Mutex<Vec<Vec<u8>>>,
    verified: Mutex<Vec<String>>,
}

impl RecordingSigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `verify` fails with `SignatureInvalid`.
    pub fn rejecting() -> Self {
        Self {
            mode: SignerMode::Rejecting,
            ..Self::default()
        }
    }

    /// Every `sign` fails.
    pub fn failing() -> Self {
        Self {
            mode: SignerMode::Failing,
            ..Self::default()
        }
    }

    pub fn signed(&self) -> Vec<Vec<u8>> {
        self.signed.lock().unwrap().clone()
    }

    pub fn verified(&self) -> Vec<String> {
        self.verified.lock().unwrap().clone()
    }

    pub fn verify_calls(&self) -> usize {
        self.verified.lock().unwrap().len()
    }
}

impl PayloadSigner for RecordingSigner {
    fn sign(&self, payload: &[u8]) -> Result<String, TokenError> {
        self.signed.lock().unwrap().push(payload.to_vec());
        if self.mode == SignerMode::Failing {
            return Err(TokenError::InvalidKey);
        }
        Ok(format!("stub.{}.sig", URL_SAFE_NO_PAD.encode(payload)))
    }

    fn verify(&self, envelope: &str) -> Result<Vec<u8>, TokenError> {
        self.verified.lock().unwrap().push(envelope.to_string());
        if self.mode == SignerMode::Rejecting {
            return Err(TokenError::SignatureInvalid);
        }
        envelope
            .strip_prefix("stub.")
            .and_then(|rest| rest.strip_suffix(".sig"))
            .and_then(|body| URL_SAFE_NO_PAD.decode(body).ok())
            .ok_or(TokenError::SignatureInvalid)
    }
}

// ============================================================================
// RecordingCipher
// ============================================================================

const SEAL_PREFIX: &[u8] = b"sealed:";

/// Cipher that "seals" by prefixing a marker and records calls.
#[derive(Default)]
pub struct RecordingCipher {
    encrypted: Mutex<Vec<Vec<u8>>>,
    decrypted: Mutex<Vec<Vec<u8>>>,
}

impl RecordingCipher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seal(plaintext: &[u8]) -> Vec<u8> {
        [SEAL_PREFIX, plaintext].concat()
    }

    pub fn encrypted(&self) -> Vec<Vec<u8>> {
        self.encrypted.lock().unwrap().clone()
    }

    pub fn decrypted(&self) -> Vec<Vec<u8>> {
        self.decrypted.lock().unwrap().clone()
    }
}

impl PayloadCipher for RecordingCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, TokenError> {
        self.encrypted.lock().unwrap().push(plaintext.to_vec());
        Ok(Self::seal(plaintext))
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, TokenError> {
        self.decrypted.lock().unwrap().push(ciphertext.to_vec());
        ciphertext
            .strip_prefix(SEAL_PREFIX)
            .map(<[u8]>::to_vec)
            .ok_or(TokenError::AuthenticationFailed)
    }
}
