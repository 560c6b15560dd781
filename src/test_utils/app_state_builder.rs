//! Test app state builder for handler-level testing.

use std::{net::SocketAddr, sync::Arc};

use secrecy::SecretString;
use time::Duration;

use crate::{
    adapters::{claim_headers::ClaimHeaders, http::app_state::AppState},
    application::ports::token_crypto::{PayloadCipher, PayloadSigner},
    infra::{
        config::{AppConfig, RunMode},
        crypto::AesGcmCipher,
        jws::HmacJwsSigner,
    },
    use_cases::{authentication::Authenticator, token_manager::TokenManager},
};

pub const TEST_JWS_SECRET: &str = "test_jws_secret";
pub const TEST_ENCRYPTION_KEY: &str = "0123456789abcdef0123456789abcdef";

/// Builder for creating `AppState` backed by real crypto or recording doubles.
///
/// # Example
///
/// ```ignore
/// let app_state = TestAppStateBuilder::new()
///     .with_validity(Duration::seconds(10))
///     .without_encryption()
///     .build();
/// ```
pub struct TestAppStateBuilder {
    signer: Option<Arc<dyn PayloadSigner>>,
    cipher: Option<Arc<dyn PayloadCipher>>,
    encrypt: bool,
    validity: Duration,
}

impl TestAppStateBuilder {
    /// Real HS256 signer and AES-256-GCM cipher, one hour validity.
    pub fn new() -> Self {
        Self {
            signer: None,
            cipher: None,
            encrypt: true,
            validity: Duration::hours(1),
        }
    }

    pub fn with_signer(mut self, signer: Arc<dyn PayloadSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn with_cipher(mut self, cipher: Arc<dyn PayloadCipher>) -> Self {
        self.cipher = Some(cipher);
        self.encrypt = true;
        self
    }

    pub fn without_encryption(mut self) -> Self {
        self.cipher = None;
        self.encrypt = false;
        self
    }

    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    pub fn build(self) -> AppState {
        let signer = self.signer.unwrap_or_else(|| {
            Arc::new(
                HmacJwsSigner::new(&SecretString::new(TEST_JWS_SECRET.into()))
                    .expect("test signing key should be valid"),
            )
        });

        let mut token_manager = TokenManager::new(signer, self.validity);
        if self.encrypt {
            let cipher = self.cipher.unwrap_or_else(|| {
                Arc::new(
                    AesGcmCipher::new(TEST_ENCRYPTION_KEY.as_bytes())
                        .expect("test encryption key should be valid"),
                )
            });
            token_manager = token_manager.with_cipher(cipher);
        }
        let token_manager = Arc::new(token_manager);

        let config = Arc::new(AppConfig {
            jws_secret_key: SecretString::new(TEST_JWS_SECRET.into()),
            payload_encryption_key: self
                .encrypt
                .then(|| SecretString::new(TEST_ENCRYPTION_KEY.into())),
            token_valid_time: self.validity,
            mode: RunMode::Development,
            http_bind_addr: "127.0.0.1:8080".parse::<SocketAddr>().unwrap(),
            grpc_bind_addr: "127.0.0.1:5050".parse::<SocketAddr>().unwrap(),
            shutdown_timeout: std::time::Duration::from_secs(1),
        });

        AppState {
            config,
            authenticator: Arc::new(Authenticator::new(token_manager.clone())),
            token_manager,
            claim_headers: Arc::new(ClaimHeaders::new().expect("claim header table should be valid")),
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
