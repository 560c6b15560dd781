use axum::{Json, Router, response::IntoResponse, routing::get};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/healthcheck", get(health_check))
}

async fn health_check() -> impl IntoResponse {
    let timestamp = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
    Json(serde_json::json!({ "success": true, "timestamp": timestamp }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::test_utils::TestAppStateBuilder;

    #[tokio::test]
    async fn healthcheck_reports_success_with_timestamp() {
        let app_state = TestAppStateBuilder::new().build();
        let server = TestServer::new(router().with_state(app_state)).unwrap();

        let response = server.get("/healthcheck").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(OffsetDateTime::parse(timestamp, &Rfc3339).is_ok());
    }
}
