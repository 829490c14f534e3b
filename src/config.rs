use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::core::preferences::{
    MatchingRules, DEFAULT_UNIVERSAL_HEAD_COVERING, DEFAULT_WILDCARD_PHRASES,
};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
    /// Upper bound on request bodies; pools travel inline
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_max_payload_bytes() -> usize { 4 * 1024 * 1024 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_wildcard_phrases")]
    pub wildcard_phrases: Vec<String>,
    #[serde(default = "default_universal_head_covering")]
    pub universal_head_covering: String,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    /// Pools at least this large are evaluated in parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            wildcard_phrases: default_wildcard_phrases(),
            universal_head_covering: default_universal_head_covering(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl MatchingSettings {
    pub fn rules(&self) -> MatchingRules {
        MatchingRules::new(&self.wildcard_phrases, self.universal_head_covering.clone())
    }
}

fn default_wildcard_phrases() -> Vec<String> {
    DEFAULT_WILDCARD_PHRASES.iter().map(|p| p.to_string()).collect()
}
fn default_universal_head_covering() -> String { DEFAULT_UNIVERSAL_HEAD_COVERING.to_string() }
fn default_limit() -> usize { 20 }
fn default_max_limit() -> usize { 100 }
fn default_parallel_threshold() -> usize { 512 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingSettings {
    /// Apply `LOG_LEVEL` / `LOG_FORMAT` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.overridden_by(env::var("LOG_LEVEL").ok(), env::var("LOG_FORMAT").ok())
    }

    /// Blank overrides are ignored
    pub fn overridden_by(mut self, level: Option<String>, format: Option<String>) -> Self {
        if let Some(level) = level.filter(|v| !v.trim().is_empty()) {
            self.level = level.trim().to_string();
        }
        if let Some(format) = format.filter(|v| !v.trim().is_empty()) {
            self.format = format.trim().to_lowercase();
        }
        self
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SHIDDUCH)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SHIDDUCH__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SHIDDUCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("matching.wildcard_phrases")
}
