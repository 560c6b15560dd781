//! tonic implementation of `heimdall.v1.TokenService`.

use std::sync::Arc;

use time::OffsetDateTime;
use tonic::{Request, Response, Status};

use crate::{
    adapters::{claim_headers::ClaimHeaders, http::app_state::AppState},
    app_error::AppError,
    domain::entities::payload::ClaimSet,
    proto::heimdall::v1::{
        GenerateTokenRequest, TokenResponse, VerifyTokenRequest, VerifyTokenResponse,
        token_service_server::TokenService,
    },
    token_error::TokenError,
    use_cases::{authentication::Authenticator, token_manager::TokenManager},
};

const AUTHORIZATION: &str = "authorization";

// --- AppError -> tonic::Status ---

impl From<AppError> for Status {
    fn from(e: AppError) -> Self {
        match e {
            AppError::InvalidCredentials(kind) => {
                tracing::warn!(error = %kind, outcome = ?kind.outcome(), "RPC rejected");
                Status::unauthenticated("invalid credentials")
            }
            AppError::InvalidInput(msg) => {
                tracing::warn!(error = %msg, "RPC rejected");
                Status::invalid_argument(msg)
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "RPC failed");
                Status::internal("internal error")
            }
        }
    }
}

fn to_timestamp(at: OffsetDateTime) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: at.unix_timestamp(),
        nanos: at.nanosecond() as i32,
    }
}

pub struct GrpcTokenService {
    token_manager: Arc<TokenManager>,
    authenticator: Arc<Authenticator>,
    claim_headers: Arc<ClaimHeaders>,
}

impl GrpcTokenService {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            token_manager: app_state.token_manager.clone(),
            authenticator: app_state.authenticator.clone(),
            claim_headers: app_state.claim_headers.clone(),
        }
    }
}

#[async_trait::async_trait]
impl TokenService for GrpcTokenService {
    async fn generate_token(
        &self,
        request: Request<GenerateTokenRequest>,
    ) -> Result<Response<TokenResponse>, Status> {
        let claims = ClaimSet {
            user_id: request.into_inner().user_id,
        };
        claims
            .validate()
            .map_err(|msg| AppError::InvalidInput(msg.to_string()))?;

        let token = self.token_manager.issue(claims).map_err(AppError::from)?;

        Ok(Response::new(TokenResponse { token }))
    }

    async fn verify_token(
        &self,
        request: Request<VerifyTokenRequest>,
    ) -> Result<Response<VerifyTokenResponse>, Status> {
        let credential = request
            .metadata()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::InvalidCredentials(TokenError::MalformedCredential))?;

        let payload = self
            .authenticator
            .authenticate(credential)
            .map_err(AppError::from)?;

        let mut response = Response::new(VerifyTokenResponse {
            user_id: payload.claims.user_id,
            issued_at: Some(to_timestamp(payload.metadata.issued_at)),
            expired_at: Some(to_timestamp(payload.metadata.expired_at)),
        });
        *response.metadata_mut() = self.claim_headers.metadata_map(&payload.claims);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, macros::datetime};
    use tonic::Code;

    use crate::test_utils::{RecordingSigner, TestAppStateBuilder};

    fn verify_request(credential: &str) -> Request<VerifyTokenRequest> {
        let mut request = Request::new(VerifyTokenRequest {});
        request
            .metadata_mut()
            .insert(AUTHORIZATION, credential.parse().unwrap());
        request
    }

    async fn generate(service: &GrpcTokenService, user_id: u32) -> String {
        service
            .generate_token(Request::new(GenerateTokenRequest { user_id }))
            .await
            .unwrap()
            .into_inner()
            .token
    }

    #[test]
    fn timestamps_keep_nanoseconds() {
        let ts = to_timestamp(datetime!(2022-07-19 03:30:39.000000123 UTC));
        assert_eq!(ts.seconds, 1_658_201_439);
        assert_eq!(ts.nanos, 123);
    }

    #[tokio::test]
    async fn generate_then_verify_round_trips() {
        let service = GrpcTokenService::new(&TestAppStateBuilder::new().build());
        let token = generate(&service, 99).await;

        let response = service
            .verify_token(verify_request(&format!("Bearer {token}")))
            .await
            .unwrap();

        assert_eq!(
            response.metadata().get("x-user-id").unwrap().to_str().unwrap(),
            "99"
        );
        let body = response.into_inner();
        assert_eq!(body.user_id, 99);
        let issued_at = body.issued_at.unwrap();
        let expired_at = body.expired_at.unwrap();
        assert_eq!(expired_at.seconds - issued_at.seconds, 3600);
        assert_eq!(expired_at.nanos, issued_at.nanos);
    }

    #[tokio::test]
    async fn generate_rejects_zero_user_id() {
        let service = GrpcTokenService::new(&TestAppStateBuilder::new().build());

        let status = service
            .generate_token(Request::new(GenerateTokenRequest { user_id: 0 }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn generate_failure_is_internal() {
        let app_state = TestAppStateBuilder::new()
            .with_signer(Arc::new(RecordingSigner::failing()))
            .build();
        let service = GrpcTokenService::new(&app_state);

        let status = service
            .generate_token(Request::new(GenerateTokenRequest { user_id: 1 }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "internal error");
    }

    #[tokio::test]
    async fn verify_without_metadata_is_unauthenticated() {
        let service = GrpcTokenService::new(&TestAppStateBuilder::new().build());

        let status = service
            .verify_token(Request::new(VerifyTokenRequest {}))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Unauthenticated);
    }

    #[tokio::test]
    async fn verify_rejects_malformed_foreign_and_expired_tokens() {
        let app_state = TestAppStateBuilder::new()
            .with_validity(Duration::seconds(10))
            .build();
        let expired = app_state
            .token_manager
            .issue_at(ClaimSet { user_id: 2 }, OffsetDateTime::now_utc() - Duration::hours(1))
            .unwrap();
        let service = GrpcTokenService::new(&app_state);

        let foreign = GrpcTokenService::new(&TestAppStateBuilder::new().without_encryption().build());
        let unencrypted = generate(&foreign, 2).await;

        for credential in [
            "Bearer nope".to_string(),
            format!("Bearer {unencrypted}"),
            format!("Bearer {expired}"),
        ] {
            let status = service.verify_token(verify_request(&credential)).await.unwrap_err();
            assert_eq!(status.code(), Code::Unauthenticated, "{credential}");
            assert_eq!(status.message(), "invalid credentials");
        }
    }
}
