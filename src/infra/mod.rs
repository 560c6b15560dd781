pub mod app;
pub mod config;
pub mod crypto;
pub mod error;
pub mod jws;
pub mod server;
pub mod setup;
