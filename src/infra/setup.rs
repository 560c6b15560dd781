use crate::{
    adapters::{claim_headers::ClaimHeaders, http::app_state::AppState},
    infra::{
        config::{AppConfig, JWS_SECRET_KEY, PAYLOAD_ENCRYPTION_KEY, RunMode},
        crypto::AesGcmCipher,
        error::InfraError,
        jws::HmacJwsSigner,
    },
    use_cases::{authentication::Authenticator, token_manager::TokenManager},
};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    let signer = HmacJwsSigner::new(&config.jws_secret_key).map_err(|source| InfraError::KeyInit {
        var: JWS_SECRET_KEY,
        source,
    })?;

    let mut token_manager = TokenManager::new(Arc::new(signer), config.token_valid_time);
    if let Some(key) = &config.payload_encryption_key {
        let cipher = AesGcmCipher::from_secret(key).map_err(|source| InfraError::KeyInit {
            var: PAYLOAD_ENCRYPTION_KEY,
            source,
        })?;
        token_manager = token_manager.with_cipher(Arc::new(cipher));
    }
    let token_manager = Arc::new(token_manager);

    tracing::info!(
        encrypted = token_manager.encrypts_payload(),
        validity_secs = token_manager.validity().whole_seconds(),
        never_expires = token_manager.never_expires(),
        "token manager ready"
    );

    let authenticator = Arc::new(Authenticator::new(token_manager.clone()));
    let claim_headers = Arc::new(ClaimHeaders::new()?);

    Ok(AppState {
        config: Arc::new(config),
        token_manager,
        authenticator,
        claim_headers,
    })
}

pub fn init_tracing(mode: RunMode) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "heimdall=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);

    match mode {
        // Console (pretty logs)
        RunMode::Development => registry
            .with(
                fmt::layer()
                    .with_target(false) // don't show target (module path)
                    .with_level(true)
                    .pretty(),
            )
            .try_init()
            .ok(),
        // Structured JSON logs
        RunMode::Production => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
            .ok(),
    };
}
