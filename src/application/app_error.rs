use thiserror::Error;

use crate::token_error::TokenError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(#[source] TokenError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug)]
pub enum ErrorCode {
    InvalidCredentials,
    InvalidInput,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        if e.is_auth_failure() {
            AppError::InvalidCredentials(e)
        } else {
            AppError::Internal(e.to_string())
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
