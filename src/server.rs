// ABOUTME: HTTP endpoint exposing liveness and Prometheus metrics.
// ABOUTME: Plain hyper http1 connections served from a tokio listener.

use std::convert::Infallible;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::header::CONTENT_TYPE;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use prometheus::Registry;
use tokio::net::TcpListener;

use crate::error::{Error, Result};
use crate::metrics::export_metrics;

const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Parse a bind address; a missing host (`:8080`) means all interfaces.
pub fn parse_bind(bind: &str) -> Result<SocketAddr> {
    let bind = bind.trim();
    if let Some(port) = bind.strip_prefix(':') {
        let port: u16 = port
            .parse()
            .map_err(|_| Error::InvalidBind(bind.to_string()))?;
        return Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port));
    }
    bind.parse()
        .map_err(|_| Error::InvalidBind(bind.to_string()))
}

/// Answer one request.
pub fn route(method: &Method, path: &str, registry: &Registry) -> Response<Full<Bytes>> {
    match (method, path) {
        (&Method::GET, "/healthz") => text(StatusCode::OK, "Ok".to_string()),
        (&Method::GET, "/metrics") => match export_metrics(registry) {
            Ok(body) => Response::builder()
                .status(StatusCode::OK)
                .header(CONTENT_TYPE, METRICS_CONTENT_TYPE)
                .body(Full::new(Bytes::from(body)))
                .unwrap_or_else(|_| text(StatusCode::INTERNAL_SERVER_ERROR, String::new())),
            Err(e) => {
                tracing::error!("unable to encode metrics: {}", e);
                text(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        },
        _ => text(StatusCode::NOT_FOUND, "Not Found".to_string()),
    }
}

fn text(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
}

/// Bind `addr` and serve until the task is dropped.
pub async fn serve(addr: SocketAddr, registry: Registry) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_listener(listener, registry).await
}

/// Serve connections accepted on an already bound listener.
pub async fn serve_listener(listener: TcpListener, registry: Registry) -> Result<()> {
    tracing::info!("http endpoint listening on {}", listener.local_addr()?);

    loop {
        let (stream, peer) = listener.accept().await?;
        let registry = registry.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req: Request<Incoming>| {
                let response = route(req.method(), req.uri().path(), &registry);
                async move { Ok::<_, Infallible>(response) }
            });

            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                tracing::debug!(peer = %peer, "http connection error: {}", e);
            }
        });
    }
}
