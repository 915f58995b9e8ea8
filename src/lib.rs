//! Quran content proxy.
//!
//! Sits between the web front-end and the Quran Foundation content API:
//! keeps the OAuth2 client credentials server-side, caches the
//! client-credentials access token, forwards content requests, and strips
//! footnote markers from translation text.

use std::sync::Arc;

use axum::http::{HeaderName, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod proxy;
pub mod token;

/// Shared application state passed to handlers.
pub struct AppState {
    pub config: config::Config,
    pub tokens: token::TokenManager,
    pub upstream: proxy::upstream::UpstreamClient,
}

impl AppState {
    pub fn new(config: config::Config) -> anyhow::Result<Self> {
        let tokens = token::TokenManager::new(&config);
        let upstream = proxy::upstream::UpstreamClient::new(&config)?;
        Ok(Self {
            config,
            tokens,
            upstream,
        })
    }
}

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    let allowed_origins = state.config.allowed_origins.clone();

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        // The deployed front-end calls /api/...; the routes also answer at
        // the root for clients that drop the prefix.
        .nest("/api", api::api_router())
        .merge(api::api_router())
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::predicate(move |origin, _| {
                    origin
                        .to_str()
                        .map(|o| allowed_origins.iter().any(|a| a == o))
                        .unwrap_or(false)
                }))
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([HeaderName::from_static("content-type")]),
        )
        .layer(axum::middleware::from_fn(request_id_middleware))
}

/// Middleware: injects a unique X-Request-Id into every response.
/// This allows clients to correlate errors with proxy logs.
async fn request_id_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = axum::http::HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}
