use crate::error::{FolioError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_web_port")]
    pub port: u16,
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Origins allowed to call the API from a browser. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            host: default_web_host(),
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub env_var: Option<String>,
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,
    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            model: default_llm_model(),
            api_key: None,
            base_url: None,
            env_var: None,
            temperature: default_llm_temperature(),
            max_tokens: default_llm_max_tokens(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// JSON file with persona, profile, projects and snippets.
    /// Unset means the built-in profile.
    #[serde(default)]
    pub path: Option<String>,
}

/// Valid LLM provider names.
pub const VALID_LLM_PROVIDERS: &[&str] = &["groq", "openai", "ollama"];

fn default_web_port() -> u16 {
    3001
}
fn default_web_host() -> String {
    "127.0.0.1".to_string()
}
fn default_llm_provider() -> String {
    "groq".to_string()
}
fn default_llm_model() -> String {
    "llama-3.1-8b-instant".to_string()
}
fn default_llm_temperature() -> f32 {
    0.7
}
fn default_llm_max_tokens() -> usize {
    512
}
fn default_llm_timeout_secs() -> u64 {
    30
}

impl FolioConfig {
    /// Load configuration with layered merge:
    /// 1. ~/.config/folio/config.toml (global)
    /// 2. .folio/config.toml (project)
    /// 3. .folio/config.local.toml (local, gitignored)
    /// 4. FOLIO__SECTION__KEY environment variables
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            let project_config = dir.join(".folio").join("config.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }

            let local_config = dir.join(".folio").join("config.local.toml");
            if local_config.exists() {
                builder = builder.add_source(File::from(local_config).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| FolioError::Config(e.to_string()))?;

        let mut cfg: Self = config
            .try_deserialize()
            .map_err(|e| FolioError::Config(e.to_string()))?;

        for warning in cfg.validate() {
            tracing::warn!("config: {warning}");
        }
        Ok(cfg)
    }

    /// Defaults only (no files, no environment).
    pub fn default_config() -> Self {
        Self {
            web: WebConfig::default(),
            llm: LlmConfig::default(),
            knowledge: KnowledgeConfig::default(),
        }
    }

    /// Validate config values, clamping out-of-range values.
    /// Lenient: fixes values rather than rejecting the config.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !VALID_LLM_PROVIDERS.contains(&self.llm.provider.as_str()) {
            warnings.push(format!(
                "unknown LLM provider '{}', valid: {}",
                self.llm.provider,
                VALID_LLM_PROVIDERS.join(", ")
            ));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) || self.llm.temperature.is_nan() {
            let clamped = if self.llm.temperature.is_nan() {
                default_llm_temperature()
            } else {
                self.llm.temperature.clamp(0.0, 2.0)
            };
            warnings.push(format!(
                "llm.temperature {} out of range [0.0, 2.0], using {clamped}",
                self.llm.temperature
            ));
            self.llm.temperature = clamped;
        }

        if self.llm.max_tokens == 0 {
            warnings.push(format!(
                "llm.max_tokens is 0, using {}",
                default_llm_max_tokens()
            ));
            self.llm.max_tokens = default_llm_max_tokens();
        }

        if self.llm.timeout_secs == 0 {
            warnings.push(format!(
                "llm.timeout_secs is 0, using {}",
                default_llm_timeout_secs()
            ));
            self.llm.timeout_secs = default_llm_timeout_secs();
        }

        warnings
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("folio").join("config.toml"))
}

/// Resolve an API key: config field first, then environment variable.
/// Returns `None` when neither is set; callers decide whether that is fatal.
pub fn resolve_api_key(
    api_key: Option<&str>,
    env_var_override: Option<&str>,
    default_env_var: &str,
) -> Option<String> {
    if let Some(key) = api_key {
        if !key.is_empty() {
            return Some(key.to_string());
        }
    }

    let env_var_name = env_var_override.unwrap_or(default_env_var);
    std::env::var(env_var_name)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default_config();
        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.web.port, 3001);
        assert!(config.web.allowed_origins.is_empty());
        assert_eq!(config.llm.provider, "groq");
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert!((config.llm.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.llm.max_tokens, 512);
        assert!(config.knowledge.path.is_none());
    }

    #[test]
    fn test_load_config_no_files() {
        let config = FolioConfig::load(Some(Path::new("/nonexistent/path"))).unwrap();
        assert_eq!(config.llm.max_tokens, 512);
    }

    #[test]
    fn test_load_project_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".folio")).unwrap();
        std::fs::write(
            dir.path().join(".folio").join("config.toml"),
            r#"
[web]
port = 8080
allowed_origins = ["https://namanbordia.in"]

[llm]
model = "llama-3.3-70b-versatile"
max_tokens = 256
"#,
        )
        .unwrap();

        let config = FolioConfig::load(Some(dir.path())).unwrap();
        assert_eq!(config.web.port, 8080);
        assert_eq!(config.web.allowed_origins, vec!["https://namanbordia.in"]);
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.max_tokens, 256);
        // Untouched keys keep their defaults
        assert_eq!(config.llm.provider, "groq");
    }

    #[test]
    fn test_local_config_overrides_project() {
        let dir = tempfile::tempdir().unwrap();
        let folio_dir = dir.path().join(".folio");
        std::fs::create_dir_all(&folio_dir).unwrap();
        std::fs::write(folio_dir.join("config.toml"), "[llm]\nmax_tokens = 256\n").unwrap();
        std::fs::write(
            folio_dir.join("config.local.toml"),
            "[llm]\nmax_tokens = 1024\n",
        )
        .unwrap();

        let config = FolioConfig::load(Some(dir.path())).unwrap();
        assert_eq!(config.llm.max_tokens, 1024);
    }

    #[test]
    fn test_load_bad_value_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let folio_dir = dir.path().join(".folio");
        std::fs::create_dir_all(&folio_dir).unwrap();
        std::fs::write(
            folio_dir.join("config.toml"),
            "[knowledge]\npath = \"/srv/me.json\"\n\n[llm]\ntemperature = \"warm\"\n",
        )
        .unwrap();

        let err = FolioConfig::load(Some(dir.path())).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("temperature"), "got: {err}");
    }

    #[test]
    fn test_load_malformed_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let folio_dir = dir.path().join(".folio");
        std::fs::create_dir_all(&folio_dir).unwrap();
        std::fs::write(folio_dir.join("config.toml"), "[llm\nmodel = ").unwrap();

        assert!(FolioConfig::load(Some(dir.path())).is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = FolioConfig::default_config();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: FolioConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.web.port, config.web.port);
        assert_eq!(parsed.llm.model, config.llm.model);
    }

    #[test]
    fn test_llm_config_backward_compat() {
        let toml_str = r#"
[llm]
provider = "openai"
"#;
        let config: FolioConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert_eq!(config.llm.timeout_secs, 30);
    }

    #[test]
    fn test_validate_default_config_no_warnings() {
        let mut config = FolioConfig::default_config();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_clamps_temperature() {
        let mut config = FolioConfig::default_config();
        config.llm.temperature = 5.0;
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!((config.llm.temperature - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_validate_zero_integers() {
        let mut config = FolioConfig::default_config();
        config.llm.max_tokens = 0;
        config.llm.timeout_secs = 0;
        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
        assert_eq!(config.llm.max_tokens, 512);
        assert_eq!(config.llm.timeout_secs, 30);
    }

    #[test]
    fn test_validate_unknown_llm_provider() {
        let mut config = FolioConfig::default_config();
        config.llm.provider = "banana".into();
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("banana"));
    }

    #[test]
    fn test_resolve_api_key_from_config() {
        let key = resolve_api_key(Some("config-key"), None, "FOLIO_TEST_UNSET_KEY");
        assert_eq!(key.as_deref(), Some("config-key"));
    }

    #[test]
    fn test_resolve_api_key_empty_config_falls_through() {
        let key = resolve_api_key(Some(""), None, "FOLIO_TEST_NEVER_SET_KEY");
        assert!(key.is_none());
    }

    #[test]
    fn test_resolve_api_key_custom_env_var() {
        std::env::set_var("FOLIO_TEST_LLM_KEY", "env-llm-key");
        let key = resolve_api_key(None, Some("FOLIO_TEST_LLM_KEY"), "GROQ_API_KEY");
        assert_eq!(key.as_deref(), Some("env-llm-key"));
        std::env::remove_var("FOLIO_TEST_LLM_KEY");
    }
}
