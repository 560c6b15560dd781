pub mod authentication;
pub mod token_manager;
