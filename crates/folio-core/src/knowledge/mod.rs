mod builtin;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::KnowledgeConfig;
use crate::error::{FolioError, Result};
use crate::model::{ContextSnippet, Persona, ProjectEntry, QaEntry};

/// Read-only profile data the assistant answers from.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it after
/// construction. Table order is insertion order and is preserved in the
/// composed prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeStore {
    persona: Persona,
    #[serde(default)]
    profile: Vec<QaEntry>,
    #[serde(default)]
    projects: Vec<ProjectEntry>,
    #[serde(default)]
    snippets: Vec<ContextSnippet>,
}

impl KnowledgeStore {
    pub fn new(
        persona: Persona,
        profile: Vec<QaEntry>,
        projects: Vec<ProjectEntry>,
        snippets: Vec<ContextSnippet>,
    ) -> Self {
        Self {
            persona,
            profile,
            projects,
            snippets,
        }
    }

    /// The profile compiled into the binary.
    pub fn builtin() -> Self {
        Self::new(
            builtin::persona(),
            builtin::profile(),
            builtin::projects(),
            builtin::snippets(),
        )
    }

    /// Load a store from a JSON document with `persona`, `profile`,
    /// `projects` and `snippets` keys.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FolioError::Config(format!(
                "failed to read knowledge file {}: {e}",
                path.display()
            ))
        })?;
        let store: Self = serde_json::from_str(&raw).map_err(|e| {
            FolioError::Config(format!(
                "failed to parse knowledge file {}: {e}",
                path.display()
            ))
        })?;
        store.validate()?;
        Ok(store)
    }

    /// Built-in profile unless `knowledge.path` points at a file.
    pub fn load(config: &KnowledgeConfig) -> Result<Self> {
        match config.path.as_deref() {
            Some(path) => {
                let store = Self::from_file(Path::new(path))?;
                tracing::info!(
                    path,
                    profile = store.profile.len(),
                    projects = store.projects.len(),
                    snippets = store.snippets.len(),
                    "loaded knowledge file"
                );
                Ok(store)
            }
            None => Ok(Self::builtin()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.persona.name.trim().is_empty() {
            return Err(FolioError::Config("persona name cannot be empty".into()));
        }
        let mut seen = HashSet::new();
        for project in &self.projects {
            if !seen.insert(project.id) {
                return Err(FolioError::Config(format!(
                    "duplicate project id {} ('{}')",
                    project.id, project.title
                )));
            }
        }
        Ok(())
    }

    /// All three tables, unmodified and in insertion order.
    pub fn tables(&self) -> (&[QaEntry], &[ProjectEntry], &[ContextSnippet]) {
        (&self.profile, &self.projects, &self.snippets)
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }
}
