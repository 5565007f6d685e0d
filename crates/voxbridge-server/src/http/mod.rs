//! HTTP ingress for voice clients and the world process.

mod error;
mod handlers;
mod wire;


use std::future::Future;

use axum::extract::Request;
use axum::http::header::{HeaderMap, HeaderName, HeaderValue};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use voxbridge_core::PresenceEngine;

use self::handlers::{health, heartbeat, minecraft_data, voice_states, voice_status};

/// Serve the ingress on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, engine: PresenceEngine, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown)
        .await
}

pub fn router(engine: PresenceEngine) -> Router {
    Router::new()
        .route("/voice-status", post(voice_status))
        .route("/heartbeat", post(heartbeat))
        .route("/minecraft-data", post(minecraft_data))
        .route("/voice-states", get(voice_states))
        .route("/health", get(health))
        .layer(middleware::from_fn(cors_middleware))
        .with_state(engine)
}

async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = Response::new(axum::body::Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        HeaderName::from_static("access-control-allow-origin"),
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-methods"),
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-headers"),
        HeaderValue::from_static("*"),
    );
}
