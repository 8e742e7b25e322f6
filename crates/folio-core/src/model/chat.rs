use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// Answer returned when the completion service reports an exhausted quota.
pub const RATE_LIMIT_ANSWER: &str = "I'm taking a quick break! The free API limit has been reached. Please try again in about an hour, or contact Naman directly via the contact form.";

/// Best-effort answer for any failure the caller cannot act on.
pub const APOLOGY_ANSWER: &str =
    "I'm sorry, I'm having trouble responding right now. Could you please try again?";

pub const INVALID_QUESTION_MESSAGE: &str = "Question is required and must be a string";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

impl ChatRequest {
    /// Validate an inbound JSON payload.
    ///
    /// `question` must be present, a string, and non-blank. The question is
    /// kept verbatim (untrimmed) for forwarding.
    pub fn from_value(payload: &serde_json::Value) -> Result<Self> {
        let question = payload
            .get("question")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| FolioError::InvalidRequest(INVALID_QUESTION_MESSAGE.into()))?;

        if question.trim().is_empty() {
            return Err(FolioError::InvalidRequest(INVALID_QUESTION_MESSAGE.into()));
        }

        Ok(Self {
            question: question.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

impl ChatResponse {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }

    pub fn apology() -> Self {
        Self::new(APOLOGY_ANSWER)
    }
}

/// Outcome of a chat call that produced something to show the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Answered(String),
    /// Quota exhausted upstream; rendered as a normal answer.
    RateLimited,
}

impl ChatReply {
    pub fn answer(&self) -> &str {
        match self {
            ChatReply::Answered(text) => text,
            ChatReply::RateLimited => RATE_LIMIT_ANSWER,
        }
    }

    pub fn into_response(self) -> ChatResponse {
        match self {
            ChatReply::Answered(text) => ChatResponse::new(text),
            ChatReply::RateLimited => ChatResponse::new(RATE_LIMIT_ANSWER),
        }
    }
}
