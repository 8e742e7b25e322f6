use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use axum::Router;
use folio_core::error::FolioError;
use folio_core::model::{ChatRequest, INVALID_QUESTION_MESSAGE};

use crate::error::{AnswerError, ApiError};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/chat",
        post(chat).options(preflight).fallback(method_not_allowed),
    )
}

/// POST /api/chat: `{"question"}` in, `{"answer"}` out.
async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable chat body");
            return ApiError {
                status: rejection.status(),
                message: rejection.body_text(),
            }
            .into_response();
        }
    };

    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "rejected chat request");
            return ApiError::bad_request(INVALID_QUESTION_MESSAGE).into_response();
        }
    };

    match state.chat.answer(&request).await {
        Ok(reply) => Json(reply.into_response()).into_response(),
        Err(e) => AnswerError::from(e).into_response(),
    }
}

fn parse_request(body: &[u8]) -> Result<ChatRequest, FolioError> {
    let payload: serde_json::Value = serde_json::from_slice(body)?;
    ChatRequest::from_value(&payload)
}

/// Bare OPTIONS without CORS request headers. Real preflights are answered by
/// the CORS layer before reaching the router.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
