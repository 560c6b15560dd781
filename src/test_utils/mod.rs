//! Test utilities.
//!
//! This module provides:
//! - Recording doubles for the signing and encryption ports
//! - `TestAppStateBuilder` for HTTP and gRPC handler tests

mod app_state_builder;
mod token_mocks;

pub use app_state_builder::*;
pub use token_mocks::*;
