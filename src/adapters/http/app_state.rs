use std::sync::Arc;

use crate::{
    adapters::claim_headers::ClaimHeaders,
    infra::config::AppConfig,
    use_cases::{authentication::Authenticator, token_manager::TokenManager},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub token_manager: Arc<TokenManager>,
    pub authenticator: Arc<Authenticator>,
    pub claim_headers: Arc<ClaimHeaders>,
}
