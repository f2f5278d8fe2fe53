//! # Mapamente
//!
//! Chat with a local language model and turn conversations or documents
//! into mind-maps.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mapamente::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = Arc::new(JsonFileStorage::open(".mapamente")?);
//!     let mut store = ChatStore::open(storage);
//!
//!     let chat_id = store.create_chat(Some("Física"));
//!     store.add_message(&chat_id, "O que é gravidade?", MessageRole::User);
//!
//!     let client = Arc::new(OllamaClient::new("http://localhost:11434")?);
//!     let generator = MindMapGenerator::new(client);
//!     let generated = generator.generate_from_text("Gravidade e órbitas", None).await;
//!
//!     store.add_mind_map(
//!         &chat_id,
//!         &generated.title,
//!         Some(generated.root_node),
//!         MindMapSource::Chat,
//!         None,
//!     );
//!     println!("{:?}", store.active_mind_map().map(|m| &m.title));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`mapamente-types`**: chats, messages, mind-map trees, user record
//! - **`mapamente-persist`**: storage port with in-memory and JSON-file backends
//! - **`mapamente-store`**: `ChatStore`, the owner of chats and the active selection
//! - **`mapamente-llm`**: `ChatClient` trait and the Ollama client
//! - **`mapamente-mindmap`**: mind-map generation and document text extraction
//! - **`mapamente-audio`**: speech transcription and text-to-speech

pub mod prelude;

pub use mapamente_types::{
    Chat, Message, MessageRole, MindMap, MindMapNode, MindMapSource, MindMapUpdate, User,
};

pub use mapamente_persist::{
    ChatStorage, InMemoryStorage, JsonFileStorage, KeyValueStore, PersistError, UserStorage,
};

pub use mapamente_store::{ChatStore, ChatStoreBuilder, StoreError};

pub use mapamente_llm::{
    ChatClient, ChatOptions, ChatRequest, ChatResponse, Message as LlmMessage, OllamaClient,
    OllamaConfig, StreamEvent,
};

pub use mapamente_mindmap::{
    DiagnosticsSink, DocumentError, DocumentKind, GeneratedMindMap, GenerationError,
    MindMapGenerator,
};

pub use mapamente_audio::{
    AudioError, ElevenLabsClient, Transcriber, TranscriptionClient, TranscriptionResult,
    VoiceSettings,
};
