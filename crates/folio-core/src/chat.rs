use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::{FolioError, Result};
use crate::knowledge::KnowledgeStore;
use crate::llm::{CompletionClient, CompletionRequest};
use crate::model::{ChatReply, ChatRequest};
use crate::prompt;

/// Fixed generation parameters sent with every completion.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: usize,
}

impl GenerationParams {
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::from_config(&LlmConfig::default())
    }
}

/// Answers visitor questions from the knowledge store via a completion backend.
///
/// Stateless per call: no history, no cache, no retries. Safe to share across
/// concurrent requests.
pub struct ChatService<C> {
    knowledge: Arc<KnowledgeStore>,
    client: C,
    params: GenerationParams,
}

impl<C: CompletionClient> ChatService<C> {
    pub fn new(knowledge: Arc<KnowledgeStore>, client: C, params: GenerationParams) -> Self {
        Self {
            knowledge,
            client,
            params,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeStore {
        &self.knowledge
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Answer one question with exactly one completion call.
    ///
    /// Quota exhaustion upstream is not an error: it yields
    /// `ChatReply::RateLimited`. A missing credential fails with
    /// `FolioError::Config` before any network call; every other failure is
    /// returned as `FolioError::Upstream`.
    pub async fn answer(&self, request: &ChatRequest) -> Result<ChatReply> {
        if !self.client.has_credential() {
            tracing::error!(kind = "configuration", "completion API credential not configured");
            return Err(FolioError::Config(
                "completion API credential not configured".into(),
            ));
        }

        let completion = CompletionRequest {
            system: prompt::compose(&self.knowledge),
            user: request.question.clone(),
            model: self.params.model.clone(),
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        };

        match self.client.complete(&completion).await {
            Ok(text) => Ok(ChatReply::Answered(text)),
            Err(e) if e.is_rate_limited() => {
                tracing::warn!(error = %e, "completion API rate limit reached");
                Ok(ChatReply::RateLimited)
            }
            Err(e) => {
                tracing::error!(kind = "upstream", error = %e, "completion call failed");
                Err(match e {
                    FolioError::Upstream(_) => e,
                    other => FolioError::Upstream(other.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RATE_LIMIT_ANSWER;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted completion backend that records every request it sees.
    struct FakeClient {
        credential: bool,
        reply: fn() -> Result<String>,
        calls: AtomicUsize,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl FakeClient {
        fn new(reply: fn() -> Result<String>) -> Self {
            Self {
                credential: true,
                reply,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn without_credential() -> Self {
            Self {
                credential: false,
                ..Self::new(|| Ok("unused".into()))
            }
        }
    }

    impl CompletionClient for FakeClient {
        fn has_credential(&self) -> bool {
            self.credential
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request.clone());
            (self.reply)()
        }
    }

    fn service(client: FakeClient) -> ChatService<FakeClient> {
        ChatService::new(
            Arc::new(KnowledgeStore::builtin()),
            client,
            GenerationParams::default(),
        )
    }

    fn ask(question: &str) -> ChatRequest {
        ChatRequest {
            question: question.to_string(),
        }
    }

    #[tokio::test]
    async fn test_answer_success() {
        let chat = service(FakeClient::new(|| Ok("I'm Naman Bordia.".into())));
        let reply = chat.answer(&ask("What is your name?")).await.unwrap();
        assert_eq!(reply, ChatReply::Answered("I'm Naman Bordia.".into()));
        assert_eq!(chat.client().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_answer_sends_composed_prompt_and_raw_question() {
        let chat = service(FakeClient::new(|| Ok("hello".into())));
        chat.answer(&ask("  hi there ")).await.unwrap();

        let seen = chat.client().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let req = &seen[0];
        assert_eq!(req.system, prompt::compose(&KnowledgeStore::builtin()));
        assert_eq!(req.user, "  hi there ");
        assert_eq!(req.model, "llama-3.1-8b-instant");
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(req.max_tokens, 512);
    }

    #[tokio::test]
    async fn test_answer_uses_configured_params() {
        let params = GenerationParams {
            model: "llama-3.3-70b-versatile".into(),
            temperature: 0.2,
            max_tokens: 128,
        };
        let chat = ChatService::new(
            Arc::new(KnowledgeStore::builtin()),
            FakeClient::new(|| Ok("ok".into())),
            params.clone(),
        );
        chat.answer(&ask("hi")).await.unwrap();
        let seen = chat.client().seen.lock().unwrap();
        assert_eq!(seen[0].model, params.model);
        assert_eq!(seen[0].max_tokens, 128);
    }

    #[tokio::test]
    async fn test_answer_rate_limited_downgrades() {
        let chat = service(FakeClient::new(|| {
            Err(FolioError::RateLimited("429 Too Many Requests".into()))
        }));
        let reply = chat.answer(&ask("hi")).await.unwrap();
        assert_eq!(reply, ChatReply::RateLimited);
        assert_eq!(reply.answer(), RATE_LIMIT_ANSWER);
    }

    #[tokio::test]
    async fn test_answer_rate_limit_marker_in_message_downgrades() {
        let chat = service(FakeClient::new(|| {
            Err(FolioError::Upstream("Error: rate_limit_exceeded on tokens".into()))
        }));
        let reply = chat.answer(&ask("hi")).await.unwrap();
        assert_eq!(reply.answer(), RATE_LIMIT_ANSWER);
    }

    #[tokio::test]
    async fn test_answer_generic_failure_is_upstream() {
        let chat = service(FakeClient::new(|| {
            Err(FolioError::Upstream("connection reset by peer".into()))
        }));
        let err = chat.answer(&ask("hi")).await.unwrap_err();
        assert!(matches!(err, FolioError::Upstream(_)));
        assert_eq!(chat.client().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_answer_non_upstream_failure_is_wrapped() {
        let chat = service(FakeClient::new(|| {
            Err(FolioError::Serialization(
                serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
            ))
        }));
        let err = chat.answer(&ask("hi")).await.unwrap_err();
        assert!(matches!(err, FolioError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_answer_missing_credential_skips_upstream() {
        let chat = service(FakeClient::without_credential());
        let err = chat.answer(&ask("hi")).await.unwrap_err();
        assert!(err.is_config());
        assert_eq!(chat.client().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_answer_no_retry_on_failure() {
        let chat = service(FakeClient::new(|| Err(FolioError::Upstream("timeout".into()))));
        let _ = chat.answer(&ask("hi")).await;
        let _ = chat.answer(&ask("hi again")).await;
        assert_eq!(chat.client().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_answers_are_independent() {
        let chat = Arc::new(service(FakeClient::new(|| Ok("ok".into()))));
        let mut handles = Vec::new();
        for i in 0..8 {
            let chat = Arc::clone(&chat);
            handles.push(tokio::spawn(async move {
                chat.answer(&ask(&format!("question {i}"))).await
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().answer(), "ok");
        }
        assert_eq!(chat.client().calls.load(Ordering::SeqCst), 8);
    }
}
