//! Configuration for the AquaGrow site

use aquagrow_gateway::backend::gemini::{DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL};
use aquagrow_gateway::{GatewayConfig, GeminiBackend, LlmBackend, MockBackend, OpenAiBackend};
use aquagrow_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::SiteError;

/// Default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aquagrow")
}

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Directory holding the record database
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Port for the content functions server
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub content: GatewayConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

fn default_http_port() -> u16 {
    8888
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            http_port: default_http_port(),
            store: StoreConfig::default(),
            llm: LlmConfig::default(),
            content: GatewayConfig::default(),
            admin: AdminConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load config from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SiteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `config.toml` from `data_dir` when present, otherwise use
    /// defaults. The result is always rooted at `data_dir`.
    pub fn load_from_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, SiteError> {
        let mut config = Self {
            data_dir: data_dir.into(),
            ..Self::default()
        };
        let path = config.config_path();
        if path.exists() {
            info!(path = %path.display(), "Loading config");
            let data_dir = config.data_dir;
            config = Self::load(&path)?;
            config.data_dir = data_dir;
        }
        Ok(config)
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self, SiteError> {
        toml::from_str(content).map_err(|e| SiteError::Config(e.to_string()))
    }

    /// Save config to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SiteError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| SiteError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get record database path
    pub fn records_db_path(&self) -> PathBuf {
        self.data_dir.join("records.sled")
    }

    /// Get config file path
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }
}

/// Which text-generation service backs the gateway
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Gemini,
    OpenAi,
    /// Canned empty replies, for offline runs
    Mock,
}

/// Text-generation backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,

    /// Model name; provider default when unset
    #[serde(default)]
    pub model: Option<String>,

    /// API base URL; provider default when unset
    #[serde(default)]
    pub base_url: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: None,
            base_url: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Build the configured backend.
    ///
    /// Gemini refuses to start without a key; OpenAI-compatible servers
    /// (vLLM, Ollama) are allowed to run without one.
    pub fn build_backend(&self) -> Result<Arc<dyn LlmBackend>, SiteError> {
        let timeout = Duration::from_secs(self.timeout_secs);

        let backend: Arc<dyn LlmBackend> = match self.provider {
            LlmProvider::Gemini => {
                let key = self.api_key().ok_or_else(|| {
                    SiteError::Config(format!(
                        "environment variable {} is not set",
                        self.api_key_env
                    ))
                })?;
                let backend = GeminiBackend::new(
                    self.base_url.as_deref().unwrap_or(DEFAULT_GEMINI_URL),
                    self.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL),
                    key,
                )?;
                Arc::new(backend.with_timeout(timeout))
            }
            LlmProvider::OpenAi => {
                let key = self.api_key();
                if key.is_none() {
                    warn!(env = %self.api_key_env, "No API key set for OpenAI-compatible backend");
                }
                let backend = OpenAiBackend::new(
                    self.base_url.as_deref().unwrap_or(DEFAULT_OPENAI_URL),
                    self.model.as_deref().unwrap_or(DEFAULT_OPENAI_MODEL),
                    key,
                )?;
                Arc::new(backend.with_timeout(timeout))
            }
            LlmProvider::Mock => Arc::new(MockBackend::default()),
        };

        info!(backend = %backend.id(), "Content backend configured");
        Ok(backend)
    }
}

/// Admin console credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    #[serde(default = "default_admin_password")]
    pub password: String,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "password".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

impl AdminConfig {
    /// Whether the shipped placeholder credentials are still in use
    pub fn is_default(&self) -> bool {
        self.username == default_admin_username() && self.password == default_admin_password()
    }
}
