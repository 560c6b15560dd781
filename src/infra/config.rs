use std::net::SocketAddr;

use env_helpers::get_env_default;
use secrecy::SecretString;
use strum::{AsRefStr, Display, EnumString};
use time::Duration;

use crate::infra::error::InfraError;

pub const JWS_SECRET_KEY: &str = "JWS_SECRET_KEY";
pub const PAYLOAD_ENCRYPTION_KEY: &str = "PAYLOAD_ENCRYPTION_KEY";
pub const TOKEN_VALID_SECS: &str = "TOKEN_VALID_SECS";
pub const MODE: &str = "MODE";

const DEFAULT_TOKEN_VALID_SECS: i64 = 3600;
/// One hundred years. Anything longer cannot be stamped as an expiry timestamp.
pub const MAX_TOKEN_VALID_SECS: i64 = 100 * 365 * 86_400;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RunMode {
    #[default]
    #[strum(to_string = "development", serialize = "dev")]
    Development,
    #[strum(to_string = "production", serialize = "prod")]
    Production,
}

pub struct AppConfig {
    pub jws_secret_key: SecretString,
    /// Presence enables payload encryption.
    pub payload_encryption_key: Option<SecretString>,
    /// Zero disables expiry enforcement.
    pub token_valid_time: Duration,
    pub mode: RunMode,
    pub http_bind_addr: SocketAddr,
    pub grpc_bind_addr: SocketAddr,
    pub shutdown_timeout: std::time::Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let jws_secret_key = std::env::var(JWS_SECRET_KEY)
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| SecretString::new(s.into()))
            .ok_or(InfraError::ConfigMissing { var: JWS_SECRET_KEY })?;

        // An empty value is treated like an unset one.
        let payload_encryption_key = std::env::var(PAYLOAD_ENCRYPTION_KEY)
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| SecretString::new(s.into()));

        let token_valid_time = match std::env::var(TOKEN_VALID_SECS) {
            Ok(raw) => parse_validity(&raw)?,
            Err(_) => Duration::seconds(DEFAULT_TOKEN_VALID_SECS),
        };

        let mode = match std::env::var(MODE) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|e: strum::ParseError| InfraError::InvalidConfig {
                    var: MODE,
                    reason: format!("{e}: {raw:?}"),
                })?,
            Err(_) => RunMode::default(),
        };

        let http_bind_addr: SocketAddr =
            get_env_default("HTTP_BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)));
        let grpc_bind_addr: SocketAddr =
            get_env_default("GRPC_BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 5050)));
        let shutdown_timeout_secs: u64 = get_env_default("SHUTDOWN_TIMEOUT_SECS", 5);

        Ok(Self {
            jws_secret_key,
            payload_encryption_key,
            token_valid_time,
            mode,
            http_bind_addr,
            grpc_bind_addr,
            shutdown_timeout: std::time::Duration::from_secs(shutdown_timeout_secs),
        })
    }
}

/// Parses `TOKEN_VALID_SECS`. `0` means never expire. Negative values and
/// values above [`MAX_TOKEN_VALID_SECS`] are rejected.
pub fn parse_validity(raw: &str) -> Result<Duration, InfraError> {
    let secs: i64 = raw.trim().parse().map_err(|_| InfraError::InvalidConfig {
        var: TOKEN_VALID_SECS,
        reason: format!("must be a whole number of seconds, got {raw:?}"),
    })?;
    if secs < 0 {
        return Err(InfraError::InvalidConfig {
            var: TOKEN_VALID_SECS,
            reason: "must not be negative".to_string(),
        });
    }
    if secs > MAX_TOKEN_VALID_SECS {
        return Err(InfraError::InvalidConfig {
            var: TOKEN_VALID_SECS,
            reason: format!("must not exceed {MAX_TOKEN_VALID_SECS} seconds"),
        });
    }
    Ok(Duration::seconds(secs))
}
