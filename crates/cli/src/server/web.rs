use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use hyper_util::service::TowerToHyperService;
use rustls::ServerConfig;
use sentinel_dns_api::{create_api_routes, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Serves DoH and rule management; HTTPS when a TLS config is given.
pub async fn start_web_server(
    bind_addr: SocketAddr,
    state: AppState,
    tls: Option<Arc<ServerConfig>>,
) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = TcpListener::bind(&bind_addr).await?;

    match tls {
        Some(tls) => {
            info!(bind_address = %bind_addr, "Starting HTTPS server");
            serve_tls(listener, app, tls).await
        }
        None => {
            info!(bind_address = %bind_addr, "Starting HTTP server (no TLS configured)");
            axum::serve(listener, app).await?;
            Ok(())
        }
    }
}

fn create_app(state: AppState) -> Router {
    create_api_routes(state).layer(TraceLayer::new_for_http())
}

async fn serve_tls(
    listener: TcpListener,
    app: Router,
    tls: Arc<ServerConfig>,
) -> anyhow::Result<()> {
    let acceptor = TlsAcceptor::from(tls);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "HTTPS accept error");
                continue;
            }
        };

        let acceptor = acceptor.clone();
        let service = TowerToHyperService::new(app.clone());
        tokio::spawn(async move {
            let tls_stream = match acceptor.accept(stream).await {
                Ok(tls_stream) => tls_stream,
                Err(e) => {
                    debug!(client = %peer, error = %e, "TLS handshake failed");
                    return;
                }
            };

            if let Err(e) = Builder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(tls_stream), service)
                .await
            {
                debug!(client = %peer, error = %e, "HTTPS connection error");
            }
        });
    }
}
