pub mod types;
pub mod traits;
pub mod streaming;
pub mod config;
pub mod prompts;
pub mod ollama;

pub use traits::{ChatClient, ChatRequest, ChatResponse, ChatOptions};
pub use streaming::StreamEvent;
pub use config::OllamaConfig;
pub use ollama::OllamaClient;
pub use prompts::{with_default_system_prompt, DEFAULT_ASSISTANT_PROMPT};
pub use types::{Message, Role};
