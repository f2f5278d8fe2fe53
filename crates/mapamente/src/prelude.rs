//! Prelude module for convenient imports
//!
//! ```rust
//! use mapamente::prelude::*;
//! ```

pub use crate::{
    Chat, MessageRole, MindMap, MindMapNode, MindMapSource, MindMapUpdate,
    ChatStorage, InMemoryStorage, JsonFileStorage,
    ChatStore,
    ChatClient, ChatRequest, LlmMessage, OllamaClient, StreamEvent,
    GeneratedMindMap, MindMapGenerator,
    ElevenLabsClient, Transcriber,
};
