use thiserror::Error;

use crate::token_error::TokenError;

/// Infrastructure errors that can occur during startup and serving.
///
/// SECURITY: Display messages never include key material. Use Display (%e)
/// in logs.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Configuration error: environment variable {var} not set")]
    ConfigMissing { var: &'static str },

    #[error("Configuration error: {var} {reason}")]
    InvalidConfig { var: &'static str, reason: String },

    #[error("Key initialization failed for {var}")]
    KeyInit {
        var: &'static str,
        #[source]
        source: TokenError,
    },

    #[error("Claim header {0:?} is not a valid lowercase header name")]
    ClaimHeader(&'static str),

    #[error("TCP bind failed")]
    TcpBind(#[source] std::io::Error),

    #[error("HTTP server error")]
    Server(#[source] std::io::Error),

    #[error("gRPC server error")]
    Grpc(#[source] tonic::transport::Error),

    #[error("Server task failed")]
    Join(#[source] tokio::task::JoinError),
}
