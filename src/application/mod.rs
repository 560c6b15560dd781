pub mod app_error;
pub mod ports;
pub mod token_error;
pub mod use_cases;
