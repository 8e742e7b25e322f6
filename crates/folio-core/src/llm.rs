use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{self, LlmConfig};
use crate::error::{FolioError, Result};

/// One chat-completion call: a system instruction plus a single user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: usize,
}

/// A text-completion backend.
///
/// Implementations:
/// - `LlmService`: OpenAI-compatible HTTP API (Groq, OpenAI, Ollama)
/// - test fakes that script responses without touching the network
pub trait CompletionClient: Send + Sync {
    /// Whether a credential is available for the backend.
    fn has_credential(&self) -> bool;

    /// Run one completion and return the trimmed text of the first choice.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LlmProvider {
    Groq,
    OpenAI,
    Ollama,
}

impl LlmProvider {
    fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::Groq => "https://api.groq.com/openai/v1",
            LlmProvider::OpenAI => "https://api.openai.com/v1",
            LlmProvider::Ollama => "http://localhost:11434/v1",
        }
    }

    /// Environment variable holding the key; `None` for keyless providers.
    fn default_env_var(self) -> Option<&'static str> {
        match self {
            LlmProvider::Groq => Some("GROQ_API_KEY"),
            LlmProvider::OpenAI => Some("OPENAI_API_KEY"),
            LlmProvider::Ollama => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            LlmProvider::Groq => "groq",
            LlmProvider::OpenAI => "openai",
            LlmProvider::Ollama => "ollama",
        }
    }
}

/// Chat-completion client for OpenAI-compatible endpoints.
pub struct LlmService {
    provider: LlmProvider,
    model: String,
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl std::fmt::Debug for LlmService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmService")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl LlmService {
    /// Create an LLM service from configuration.
    ///
    /// A missing API key is not an error here: the service still builds and
    /// reports it through `has_credential()`, so each chat call can surface it.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let provider = match config.provider.as_str() {
            "groq" => LlmProvider::Groq,
            "openai" => LlmProvider::OpenAI,
            "ollama" => LlmProvider::Ollama,
            other => {
                return Err(FolioError::Config(format!(
                    "unknown LLM provider: '{other}' (expected 'groq', 'openai', or 'ollama')"
                )));
            }
        };

        let api_key = match provider.default_env_var() {
            Some(env_var) => config::resolve_api_key(
                config.api_key.as_deref(),
                config.env_var.as_deref(),
                env_var,
            ),
            None => config.api_key.clone(),
        };

        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(provider.default_base_url())
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FolioError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            provider,
            model: config.model.clone(),
            base_url,
            api_key,
            client,
        })
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Name of the variable that should hold the key, for log messages.
    pub fn credential_hint(&self) -> &'static str {
        self.provider.default_env_var().unwrap_or("llm.api_key")
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: usize,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl ErrorDetail {
    fn is_rate_limit(&self) -> bool {
        [self.code.as_deref(), self.kind.as_deref()]
            .into_iter()
            .flatten()
            .any(|c| c == "rate_limit_exceeded" || c == "rate_limit")
    }
}

/// Map a non-success response to an error, classifying quota exhaustion by
/// status code or structured error code.
fn classify_failure(status: reqwest::StatusCode, body: &str) -> FolioError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);
    let message = detail
        .as_ref()
        .and_then(|d| d.message.clone())
        .unwrap_or_else(|| body.to_string());

    let rate_limited = status == reqwest::StatusCode::TOO_MANY_REQUESTS
        || detail.as_ref().is_some_and(ErrorDetail::is_rate_limit);

    if rate_limited {
        FolioError::RateLimited(format!("completion API {status}: {message}"))
    } else {
        FolioError::Upstream(format!("completion API error {status}: {message}"))
    }
}

impl CompletionClient for LlmService {
    fn has_credential(&self) -> bool {
        match self.provider {
            LlmProvider::Ollama => true,
            _ => self.api_key.is_some(),
        }
    }

    /// POST {base_url}/chat/completions
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = ChatCompletionBody {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let mut req = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await.map_err(|e| {
            FolioError::Upstream(format!("{} completion request failed: {e}", self.provider.name()))
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(classify_failure(status, &text));
        }

        let parsed: ChatCompletionResponse = resp.json().await.map_err(|e| {
            FolioError::Upstream(format!("completion response parse error: {e}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| FolioError::Upstream("completion response has no choices".into()))
    }
}
