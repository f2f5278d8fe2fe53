use std::sync::Arc;

use anyhow::{Context, Result};
use mapamente_audio::{ElevenLabsClient, Transcriber, TranscriptionClient};
use mapamente_llm::{ChatClient, OllamaClient, OllamaConfig};
use mapamente_mindmap::MindMapGenerator;
use mapamente_persist::{restore_user, JsonFileStorage, UserStorage};
use mapamente_store::ChatStore;
use mapamente_types::User;

use crate::config::Config;

/// Everything the shell operates on
pub struct AppState {
    pub config: Config,
    pub store: ChatStore,
    pub users: Arc<dyn UserStorage>,
    pub user: Option<User>,
    pub chat_client: Arc<dyn ChatClient>,
    pub generator: MindMapGenerator,
    pub transcriber: Transcriber,
    /// `None` without an ElevenLabs API key
    pub tts: Option<ElevenLabsClient>,
}

impl AppState {
    /// Wire up file storage under `storage.data_dir` and the HTTP clients.
    pub fn new(config: Config) -> Result<Self> {
        let storage = Arc::new(
            JsonFileStorage::open(&config.storage.data_dir).with_context(|| {
                format!("Failed to open data directory {}", config.storage.data_dir.display())
            })?,
        );
        tracing::info!(dir = %storage.dir().display(), "using file storage");

        let chat_client: Arc<dyn ChatClient> =
            Arc::new(OllamaClient::from_config(&OllamaConfig::from(&config.llm))?);

        let store = ChatStore::open(storage.clone());
        Self::from_parts(config, store, storage, chat_client)
    }

    pub fn from_parts(
        config: Config,
        store: ChatStore,
        users: Arc<dyn UserStorage>,
        chat_client: Arc<dyn ChatClient>,
    ) -> Result<Self> {
        let generator =
            MindMapGenerator::new(chat_client.clone()).with_model(&config.llm.mindmap_model);

        let transcriber = Transcriber::new(
            TranscriptionClient::new(&config.transcription.url)?,
            chat_client.clone(),
            &config.llm.model,
        );

        let tts = match &config.elevenlabs_api_key {
            Some(key) => Some(
                ElevenLabsClient::with_base_url(key, &config.tts.base_url)?
                    .with_model(&config.tts.model),
            ),
            None => {
                tracing::info!("ELEVENLABS_API_KEY not set, speech synthesis disabled");
                None
            }
        };

        let user = restore_user(users.as_ref());

        Ok(Self {
            config,
            store,
            users,
            user,
            chat_client,
            generator,
            transcriber,
            tts,
        })
    }
}
