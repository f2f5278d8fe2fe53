use config::{Config as ConfigLoader, ConfigError, Environment, File};
use mapamente_audio::{DEFAULT_TRANSCRIPTION_URL, DEFAULT_TTS_MODEL, DEFAULT_VOICE_ID, ELEVENLABS_API_URL};
use mapamente_llm::config::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL};
use mapamente_llm::OllamaConfig;
use mapamente_mindmap::DEFAULT_MINDMAP_MODEL;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    #[serde(default)]
    pub tts: TtsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub elevenlabs_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    /// Model for conversation and transcript formatting
    pub model: String,
    /// Model for mind-map generation
    pub mindmap_model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            mindmap_model: DEFAULT_MINDMAP_MODEL.to_string(),
        }
    }
}

impl From<&LlmConfig> for OllamaConfig {
    fn from(config: &LlmConfig) -> Self {
        OllamaConfig::new(&config.base_url).with_model(&config.model)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `chats.json` and `user.json`
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".mapamente"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub url: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TRANSCRIPTION_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    pub base_url: String,
    pub model: String,
    pub voice_id: String,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: ELEVENLABS_API_URL.to_string(),
            model: DEFAULT_TTS_MODEL.to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables, `MAPAMENTE_<SECTION>__<KEY>`
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("MAPAMENTE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let cfg: Config = builder.build()?.try_deserialize()?;
        Ok(cfg.with_env_secrets())
    }

    /// Fill secrets from ENV (never read from TOML)
    pub fn with_env_secrets(mut self) -> Self {
        // Optional: speech synthesis is disabled without it
        self.elevenlabs_api_key = std::env::var("ELEVENLABS_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        self
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));
        builder.build()?.try_deserialize()
    }
}
