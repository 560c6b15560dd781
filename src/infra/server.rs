use std::net::SocketAddr;

use tokio::{net::TcpListener, signal, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::{
    adapters::{grpc::token_service::GrpcTokenService, http::app_state::AppState},
    infra::{app::create_app, error::InfraError},
    proto::heimdall::v1::token_service_server::TokenServiceServer,
};

type ServerTask = JoinHandle<Result<(), InfraError>>;

/// Runs the HTTP and gRPC listeners until SIGINT/SIGTERM or until either one
/// stops on its own, then drains both within the configured timeout.
pub async fn serve(app_state: AppState) -> Result<(), InfraError> {
    let config = app_state.config.clone();
    let shutdown = CancellationToken::new();

    let listener = TcpListener::bind(config.http_bind_addr)
        .await
        .map_err(InfraError::TcpBind)?;
    info!("HTTP listening at {}", listener.local_addr().map_err(InfraError::TcpBind)?);

    let mut http = spawn_http(listener, app_state.clone(), shutdown.clone());
    let mut grpc = spawn_grpc(config.grpc_bind_addr, &app_state, shutdown.clone());
    info!("gRPC listening at {}", config.grpc_bind_addr);

    tokio::select! {
        _ = shutdown_signal() => {}
        _ = shutdown.cancelled() => warn!("a listener stopped unexpectedly, shutting down"),
    }
    shutdown.cancel();

    let drained = tokio::time::timeout(config.shutdown_timeout, async {
        tokio::join!(&mut http, &mut grpc)
    })
    .await;

    match drained {
        Ok((http_result, grpc_result)) => {
            flatten(http_result)?;
            flatten(grpc_result)?;
            Ok(())
        }
        Err(_) => {
            warn!(
                timeout_secs = config.shutdown_timeout.as_secs(),
                "graceful shutdown timed out, aborting listeners"
            );
            http.abort();
            grpc.abort();
            Ok(())
        }
    }
}

fn spawn_http(listener: TcpListener, app_state: AppState, shutdown: CancellationToken) -> ServerTask {
    let app = create_app(app_state);
    tokio::spawn(async move {
        let _stop_all = shutdown.clone().drop_guard();
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(InfraError::Server)
    })
}

fn spawn_grpc(addr: SocketAddr, app_state: &AppState, shutdown: CancellationToken) -> ServerTask {
    let service = TokenServiceServer::new(GrpcTokenService::new(app_state));
    tokio::spawn(async move {
        let _stop_all = shutdown.clone().drop_guard();
        tonic::transport::Server::builder()
            .add_service(service)
            .serve_with_shutdown(addr, shutdown.cancelled_owned())
            .await
            .map_err(InfraError::Grpc)
    })
}

fn flatten(result: Result<Result<(), InfraError>, tokio::task::JoinError>) -> Result<(), InfraError> {
    result.map_err(InfraError::Join)?.inspect_err(|e| error!(error = %e, "listener failed"))
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = signal::ctrl_c() => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
