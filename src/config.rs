use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Process-wide gateway configuration, read once at startup.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GatewayConfig {
    /// Listening socket
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote chat-completion model used for prompt-based conversion
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
    /// External command-line importer
    #[serde(default)]
    pub importer: ImporterConfig,
    /// Outbound recipe page fetches
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenRouterConfig {
    /// Bearer token; the prompt-based path is unavailable without it
    pub api_key: Option<String>,
    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,
    /// API root, `/chat/completions` is appended
    #[serde(default = "default_openrouter_base_url")]
    pub base_url: String,
    #[serde(default = "default_conversion_timeout")]
    pub timeout_secs: u64,
    /// Upper bound on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Replacement prompt template; must contain `{recipe_text}`
    pub prompt_file: Option<PathBuf>,
}

impl OpenRouterConfig {
    /// The configured key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_openrouter_base_url(),
            timeout_secs: default_conversion_timeout(),
            max_tokens: default_max_tokens(),
            prompt_file: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImporterConfig {
    /// Executable name or path
    #[serde(default = "default_importer_command")]
    pub command: String,
    /// Arguments placed before the per-request ones
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_conversion_timeout")]
    pub timeout_secs: u64,
}

impl ImporterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            command: default_importer_command(),
            args: Vec::new(),
            timeout_secs: default_conversion_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_model() -> String {
    "anthropic/claude-3.5-sonnet".to_string()
}

fn default_openrouter_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_conversion_timeout() -> u64 {
    60
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_importer_command() -> String {
    "cooklang-import".to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; PantryPilot/1.0)".to_string()
}

impl GatewayConfig {
    /// Load configuration from file and environment variables
    ///
    /// See [`load_config`] for the source priority.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. `OPENROUTER_API_KEY`, `OPENROUTER_MODEL` and `PORT`
/// 2. Environment variables with GATEWAY__ prefix
/// 3. config.toml file in current directory
/// 4. Default values
///
/// Environment variable format: GATEWAY__IMPORTER__TIMEOUT_SECS
pub fn load_config() -> Result<GatewayConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(
            Environment::with_prefix("GATEWAY")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("openrouter.api_key", env::var("OPENROUTER_API_KEY").ok())?
        .set_override_option("openrouter.model", env::var("OPENROUTER_MODEL").ok())?
        .set_override_option("server.port", env::var("PORT").ok())?
        .build()?;

    settings.try_deserialize()
}
