use aes_gcm::{
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
    aead::{Aead, KeyInit, consts::U12},
    aes::Aes192,
};
use secrecy::{ExposeSecret, SecretString};

use crate::{application::ports::token_crypto::PayloadCipher, token_error::TokenError};

const NONCE_LEN: usize = 12;

type Aes192Gcm = AesGcm<Aes192, U12>;

#[derive(Clone)]
enum GcmCipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

/// AES-GCM payload cipher. Key size (16, 24 or 32 bytes) selects the variant.
#[derive(Clone)]
pub struct AesGcmCipher {
    cipher: GcmCipher,
}

impl AesGcmCipher {
    pub fn new(key: &[u8]) -> Result<Self, TokenError> {
        let cipher = match key.len() {
            16 => GcmCipher::Aes128(
                Aes128Gcm::new_from_slice(key).map_err(|_| TokenError::InvalidKey)?,
            ),
            24 => GcmCipher::Aes192(
                Aes192Gcm::new_from_slice(key).map_err(|_| TokenError::InvalidKey)?,
            ),
            32 => GcmCipher::Aes256(
                Aes256Gcm::new_from_slice(key).map_err(|_| TokenError::InvalidKey)?,
            ),
            _ => return Err(TokenError::InvalidKey),
        };
        Ok(Self { cipher })
    }

    pub fn from_secret(secret: &SecretString) -> Result<Self, TokenError> {
        Self::new(secret.expose_secret().as_bytes())
    }
}

impl PayloadCipher for AesGcmCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, TokenError> {
        let nonce_bytes = rand::random::<[u8; NONCE_LEN]>();
        let nonce = Nonce::from_slice(&nonce_bytes);
        let sealed = match &self.cipher {
            GcmCipher::Aes128(cipher) => cipher.encrypt(nonce, plaintext),
            GcmCipher::Aes192(cipher) => cipher.encrypt(nonce, plaintext),
            GcmCipher::Aes256(cipher) => cipher.encrypt(nonce, plaintext),
        }
        .map_err(|e| {
            tracing::error!(error = %e, "payload encryption failed");
            TokenError::EncryptionFailed
        })?;

        let mut buffer = Vec::with_capacity(NONCE_LEN + sealed.len());
        buffer.extend_from_slice(&nonce_bytes);
        buffer.extend_from_slice(&sealed);
        Ok(buffer)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, TokenError> {
        if ciphertext.len() < NONCE_LEN {
            return Err(TokenError::CiphertextTooShort);
        }
        let (nonce_bytes, sealed) = ciphertext.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);
        match &self.cipher {
            GcmCipher::Aes128(cipher) => cipher.decrypt(nonce, sealed),
            GcmCipher::Aes192(cipher) => cipher.decrypt(nonce, sealed),
            GcmCipher::Aes256(cipher) => cipher.decrypt(nonce, sealed),
        }
        .map_err(|_| TokenError::AuthenticationFailed)
    }
}
