use serde::{Deserialize, Serialize};

/// One canned fact about the profile subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
}

impl QaEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
    #[serde(default)]
    pub live: Option<String>,
}

impl ProjectEntry {
    pub fn new(id: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            technologies: Vec::new(),
            github: None,
            demo: None,
            live: None,
        }
    }

    pub fn with_technologies(mut self, technologies: &[&str]) -> Self {
        self.technologies = technologies.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_github(mut self, url: impl Into<String>) -> Self {
        self.github = Some(url.into());
        self
    }

    pub fn with_demo(mut self, url: impl Into<String>) -> Self {
        self.demo = Some(url.into());
        self
    }

    pub fn with_live(mut self, url: impl Into<String>) -> Self {
        self.live = Some(url.into());
        self
    }
}

/// Example phrasing pair used to steer the tone of answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSnippet {
    pub prompt_text: String,
    pub response_text: String,
}

impl ContextSnippet {
    pub fn new(prompt_text: impl Into<String>, response_text: impl Into<String>) -> Self {
        Self {
            prompt_text: prompt_text.into(),
            response_text: response_text.into(),
        }
    }
}

/// Who the assistant speaks as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    /// One-line description, e.g. "a B.Tech CSE student specializing in AI/ML".
    pub headline: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}
