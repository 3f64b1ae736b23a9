//! Configuration management for Larder.
//!
//! Loads configuration from environment variables: server binding, the data
//! directory for the store, and generation providers keyed by which API keys
//! are present.

use std::env;
use std::sync::OnceLock;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory the store persists its documents under.
    pub data_path: String,
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub providers: Vec<GenerationProvider>,
}

#[derive(Debug, Clone)]
pub struct GenerationProvider {
    pub name: String,
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub priority: u8,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "8088").parse().expect("Invalid PORT"),
            },
            storage: StorageConfig {
                data_path: env_or("DATA_PATH", "./data"),
            },
            generation: GenerationConfig {
                providers: Self::parse_generation_providers(),
            },
        }
    }

    /// Parse generation providers from environment.
    ///
    /// A provider is configured when its API key is present; the relay uses
    /// the highest-priority one.
    fn parse_generation_providers() -> Vec<GenerationProvider> {
        let mut providers = Vec::new();

        // Gemini (priority 1 - the provider the tracker was built against)
        if let Ok(api_key) = env::var("GOOGLE_API_KEY") {
            providers.push(GenerationProvider {
                name: "gemini".to_string(),
                base_url: larder_llm::default_endpoint("gemini"),
                model: env_or("GEMINI_MODEL", "gemini-2.0-flash-exp"),
                api_key,
                priority: 1,
            });
        }

        // Anthropic/Claude (priority 2)
        if let Ok(api_key) = env::var("ANTHROPIC_API_KEY") {
            providers.push(GenerationProvider {
                name: "anthropic".to_string(),
                base_url: larder_llm::default_endpoint("anthropic"),
                model: env_or("ANTHROPIC_MODEL", "claude-3-5-haiku-20241022"),
                api_key,
                priority: 2,
            });
        }

        // OpenAI (priority 3)
        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            providers.push(GenerationProvider {
                name: "openai".to_string(),
                base_url: larder_llm::default_endpoint("openai"),
                model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
                api_key,
                priority: 3,
            });
        }

        providers.sort_by_key(|p| p.priority);
        providers
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
