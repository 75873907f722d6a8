use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Transcription provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Backend collaborator config
    #[serde(default)]
    pub backend: BackendConfig,

    /// Upload ceilings
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Export config
    #[serde(default)]
    pub export: ExportConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Normal operation
    #[default]
    Info,
    /// Diagnostic detail
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    // @returns: log crate filter for this level
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Transcription provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: API key (falls back to the HF_API_KEY environment variable)
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL; empty uses the public inference endpoint
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Request timeout seconds
    #[serde(default = "default_provider_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            model: default_model(),
            api_key: String::new(),
            endpoint: String::new(),
            timeout_secs: default_provider_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    /// API key from the config file, or the HF_API_KEY environment
    /// variable when the file leaves it empty
    pub fn effective_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var("HF_API_KEY").unwrap_or_default()
    }
}

/// Backend collaborator configuration.
///
/// An empty base URL disables the rate-limit, project, and stats
/// collaborators; the pipeline then runs standalone.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    // @field: Base URL of the collaborator, e.g. "https://caption-ai.vercel.app"
    #[serde(default = "String::new")]
    pub base_url: String,

    // @field: Request timeout seconds
    #[serde(default = "default_backend_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_backend_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Whether a collaborator is configured at all
    pub fn enabled(&self) -> bool {
        !self.base_url.is_empty()
    }

    /// Rate-limit contract endpoint
    pub fn rate_limit_endpoint(&self) -> String {
        format!("{}/api/rate-limit", self.base_url.trim_end_matches('/'))
    }

    /// Project persistence contract endpoint
    pub fn projects_endpoint(&self) -> String {
        format!("{}/api/project", self.base_url.trim_end_matches('/'))
    }

    /// Stats aggregation contract endpoint
    pub fn stats_endpoint(&self) -> String {
        format!("{}/api/stats", self.base_url.trim_end_matches('/'))
    }
}

/// Upload ceilings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LimitsConfig {
    // @field: Maximum video length in seconds
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: u64,

    // @field: Maximum video file size in bytes
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: default_max_duration_secs(),
            max_file_size_bytes: default_max_file_size_bytes(),
        }
    }
}

/// Export configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportConfig {
    // @field: Default embed mode, "soft" or "hard"
    #[serde(default = "default_embed_mode")]
    pub embed_mode: String,

    // @field: Font size for hard-burned subtitles
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    // @field: Font name for hard-burned subtitles
    #[serde(default = "default_font_name")]
    pub font_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            embed_mode: default_embed_mode(),
            font_size: default_font_size(),
            font_name: default_font_name(),
        }
    }
}

impl ExportConfig {
    /// force_style string handed to the transcoder for hard burns
    pub fn burn_style(&self) -> String {
        format!("FontSize={},FontName={}", self.font_size, self.font_name)
    }
}

fn default_provider_type() -> String {
    "whisper".to_string()
}

fn default_model() -> String {
    "openai/whisper-large-v3-turbo".to_string()
}

fn default_provider_timeout_secs() -> u64 {
    60
}

fn default_backend_timeout_secs() -> u64 {
    15
}

fn default_max_duration_secs() -> u64 {
    300
}

fn default_max_file_size_bytes() -> u64 {
    50 * 1024 * 1024
}

fn default_embed_mode() -> String {
    "soft".to_string()
}

fn default_font_size() -> u32 {
    24
}

fn default_font_name() -> String {
    "Arial".to_string()
}

impl Config {
    /// Load configuration from a JSON file, creating a default file when
    /// none exists yet
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !FileManager::file_exists(path) {
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = FileManager::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        FileManager::write_to_file(path, &content)
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.provider.endpoint.is_empty() {
            Url::parse(&self.provider.endpoint)
                .map_err(|e| anyhow!("Invalid provider endpoint: {}", e))?;
        }
        if self.backend.enabled() {
            Url::parse(&self.backend.base_url)
                .map_err(|e| anyhow!("Invalid backend base URL: {}", e))?;
        }
        if self.provider.timeout_secs == 0 {
            return Err(anyhow!("Provider timeout must be greater than zero"));
        }
        if self.limits.max_duration_secs == 0 {
            return Err(anyhow!("Maximum video duration must be greater than zero"));
        }
        self.export.embed_mode.parse::<crate::media::EmbedMode>()?;
        Ok(())
    }
}
