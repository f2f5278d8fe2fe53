//! Mind-map generation.
//!
//! [`MindMapGenerator`] asks a chat model for a JSON tree wrapped in
//! `[JSON-MAPA-MENTAL]` tags and always hands back something renderable;
//! [`document`] turns uploaded files into text to generate from.

pub mod diagnostics;
pub mod document;
pub mod error;
pub mod generator;
pub mod prompts;

pub use diagnostics::{DiagnosticsSink, NoopDiagnostics};
pub use document::{extract_text, is_supported, DocumentError, DocumentKind};
pub use error::GenerationError;
pub use generator::{extract_tagged_json, GeneratedMindMap, MindMapGenerator, DEFAULT_MINDMAP_MODEL};
pub use prompts::{mind_map_request, MINDMAP_CLOSE_TAG, MINDMAP_OPEN_TAG, MINDMAP_SYSTEM_PROMPT};
