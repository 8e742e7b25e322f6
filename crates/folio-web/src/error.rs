use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use folio_core::error::FolioError;
use folio_core::model::ChatResponse;

/// JSON API error type for REST endpoints. Renders `{"error": message}`.
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: "Method not allowed".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

/// Failure on the chat path after validation. Always renders a 500 carrying
/// the apology answer. The cause is logged by `ChatService` and never sent.
pub struct AnswerError(pub FolioError);

impl IntoResponse for AnswerError {
    fn into_response(self) -> Response {
        tracing::debug!(config = self.0.is_config(), "rendering chat apology");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ChatResponse::apology()),
        )
            .into_response()
    }
}

impl From<FolioError> for AnswerError {
    fn from(err: FolioError) -> Self {
        Self(err)
    }
}

/// Last-resort response when a handler panics.
pub fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!(kind = "panic", "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ChatResponse::apology()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_api_error_shape() {
        let resp = ApiError::bad_request("nope").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, serde_json::json!({ "error": "nope" }));
    }

    #[tokio::test]
    async fn test_answer_error_hides_cause() {
        let resp =
            AnswerError(FolioError::Upstream("secret upstream detail".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert_eq!(json["answer"], folio_core::model::APOLOGY_ANSWER);
        assert!(!json.to_string().contains("secret upstream detail"));
    }

    #[tokio::test]
    async fn test_panic_response_carries_apology() {
        let resp = panic_response(Box::new("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["answer"], folio_core::model::APOLOGY_ANSWER);
    }
}
