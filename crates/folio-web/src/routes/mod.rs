pub mod chat;
pub mod profile;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use folio_core::config::WebConfig;
use folio_core::llm::CompletionClient;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{panic_response, ApiError};
use crate::AppState;

/// Headers a browser caller may send on cross-origin requests.
const ALLOWED_HEADERS: [&str; 9] = [
    "x-csrf-token",
    "x-requested-with",
    "accept",
    "accept-version",
    "content-length",
    "content-md5",
    "content-type",
    "date",
    "x-api-version",
];

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .merge(chat::routes())
        .merge(profile::routes())
        .fallback(not_found)
}

/// Full application: routes, state, CORS, request tracing and panic capture.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.web);
    router()
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Permissive CORS: any origin (or the configured list), credentials, and the
/// common verbs and headers. Preflights are answered by the layer itself.
pub fn cors_layer(config: &WebConfig) -> CorsLayer {
    let origin = if config.allowed_origins.is_empty()
        || config.allowed_origins.iter().any(|o| o == "*")
    {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %o, "ignoring invalid allowed origin");
                        None
                    }
                }),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
}

async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    let llm = state.chat.client();
    let configured = llm.has_credential();

    let status = if configured {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(serde_json::json!({
            "status": if configured { "ok" } else { "degraded" },
            "provider": llm.provider_name(),
            "model": llm.model(),
            "credential": if configured { "configured" } else { "missing" },
        })),
    )
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
