use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, crypto};
use secrecy::{ExposeSecret, SecretString};

use crate::{application::ports::token_crypto::PayloadSigner, token_error::TokenError};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// HS256 JWS in compact serialization over arbitrary payload bytes.
///
/// The envelope is `B64URL(header).B64URL(payload).B64URL(mac)` where the MAC
/// covers the ASCII of the first two segments. Only `HS256` is accepted.
pub struct HmacJwsSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    encoded_header: String,
}

impl HmacJwsSigner {
    pub fn new(secret: &SecretString) -> Result<Self, TokenError> {
        let secret = secret.expose_secret().as_bytes();
        if secret.is_empty() {
            return Err(TokenError::InvalidKey);
        }
        let header = serde_json::to_vec(&Header::new(ALGORITHM))
            .map_err(|_| TokenError::SerializationFailed)?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            encoded_header: URL_SAFE_NO_PAD.encode(header),
        })
    }
}

impl PayloadSigner for HmacJwsSigner {
    fn sign(&self, payload: &[u8]) -> Result<String, TokenError> {
        let signing_input = format!("{}.{}", self.encoded_header, URL_SAFE_NO_PAD.encode(payload));
        let signature =
            crypto::sign(signing_input.as_bytes(), &self.encoding_key, ALGORITHM).map_err(|e| {
                tracing::error!(error = %e, "JWS signing failed");
                TokenError::InvalidKey
            })?;
        Ok(format!("{signing_input}.{signature}"))
    }

    fn verify(&self, envelope: &str) -> Result<Vec<u8>, TokenError> {
        let mut segments = envelope.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::SignatureInvalid);
        };
        if header_b64.is_empty() || signature.is_empty() {
            return Err(TokenError::SignatureInvalid);
        }

        let header: Header = URL_SAFE_NO_PAD
            .decode(header_b64)
            .ok()
            .and_then(|raw| serde_json::from_slice(&raw).ok())
            .ok_or(TokenError::SignatureInvalid)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::SignatureInvalid);
        }

        let signing_input = &envelope[..header_b64.len() + 1 + payload_b64.len()];
        let valid = crypto::verify(signature, signing_input.as_bytes(), &self.decoding_key, ALGORITHM)
            .unwrap_or(false);
        if !valid {
            return Err(TokenError::SignatureInvalid);
        }

        URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::SignatureInvalid)
    }
}
