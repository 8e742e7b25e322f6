use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FolioError {
    /// Returns `true` when the completion service refused the call because a
    /// usage quota is exhausted.
    ///
    /// Structured `RateLimited` errors are the normal path. Upstream messages
    /// that still carry a rate-limit marker land in the same family.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::RateLimited(_) => true,
            Self::Upstream(msg) => has_rate_limit_marker(msg),
            _ => false,
        }
    }

    /// Returns `true` for deployment defects (missing credential, bad config).
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

fn has_rate_limit_marker(msg: &str) -> bool {
    let msg_lower = msg.to_lowercase();
    ["rate_limit", "429"].iter().any(|m| msg_lower.contains(m))
}

pub type Result<T> = std::result::Result<T, FolioError>;
