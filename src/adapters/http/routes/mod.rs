pub mod health;
pub mod token;

use axum::Router;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(token::router())
        .merge(health::router())
}
