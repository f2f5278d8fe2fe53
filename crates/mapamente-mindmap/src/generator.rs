use std::sync::Arc;

use mapamente_llm::{ChatClient, ChatOptions, ChatRequest};
use mapamente_types::{MindMapNode, FALLBACK_MIND_MAP_TITLE};
use serde::Deserialize;

use crate::diagnostics::{DiagnosticsSink, NoopDiagnostics};
use crate::error::GenerationError;
use crate::prompts::{mind_map_request, MINDMAP_CLOSE_TAG, MINDMAP_OPEN_TAG};

pub const DEFAULT_MINDMAP_MODEL: &str = "llama3:8b";

/// Title and tree ready to be stored as a mind-map
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMindMap {
    pub title: String,
    pub root_node: MindMapNode,
}

impl GeneratedMindMap {
    /// The tree shown when generation fails
    pub fn fallback(title: Option<&str>) -> Self {
        Self {
            title: non_empty(title).unwrap_or(FALLBACK_MIND_MAP_TITLE).to_string(),
            root_node: MindMapNode::generation_fallback(),
        }
    }
}

/// Shape of the JSON object the model is asked to produce
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MindMapReply {
    #[serde(default)]
    title: Option<String>,
    root_node: MindMapNode,
}

/// Turns free text into a mind-map through a chat model.
pub struct MindMapGenerator {
    client: Arc<dyn ChatClient>,
    model: String,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl MindMapGenerator {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            model: DEFAULT_MINDMAP_MODEL.to_string(),
            diagnostics: Arc::new(NoopDiagnostics),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a mind-map, reporting why when the reply is unusable.
    ///
    /// A non-empty `title` wins over the one the model proposes.
    pub async fn try_generate(
        &self,
        text: &str,
        title: Option<&str>,
    ) -> Result<GeneratedMindMap, GenerationError> {
        let request = ChatRequest::new(&self.model, mind_map_request(text))
            .with_options(ChatOptions::new().raw(true));

        let response = self
            .client
            .chat(request)
            .await
            .map_err(GenerationError::Completion)?;

        let json = extract_tagged_json(&response.content).ok_or(GenerationError::MissingMarkers)?;
        tracing::debug!(chars = json.len(), "extracted mind-map JSON");

        let reply: MindMapReply = serde_json::from_str(json)?;

        let title = non_empty(title)
            .map(str::to_string)
            .or(reply.title)
            .unwrap_or_else(|| FALLBACK_MIND_MAP_TITLE.to_string());

        Ok(GeneratedMindMap {
            title,
            root_node: reply.root_node,
        })
    }

    /// Generate a mind-map, substituting the fallback tree on any failure.
    pub async fn generate_from_text(&self, text: &str, title: Option<&str>) -> GeneratedMindMap {
        match self.try_generate(text, title).await {
            Ok(generated) => {
                tracing::info!(
                    title = %generated.title,
                    nodes = generated.root_node.node_count(),
                    "generated mind-map"
                );
                generated
            }
            Err(e) => {
                tracing::warn!("Mind-map generation failed, using fallback: {}", e);
                self.diagnostics.generation_failed(text, &e).await;
                GeneratedMindMap::fallback(title)
            }
        }
    }
}

/// Trimmed text between the first opening tag and the closing tag after it.
///
/// `None` when either tag is missing or nothing sits between them.
pub fn extract_tagged_json(reply: &str) -> Option<&str> {
    let start = reply.find(MINDMAP_OPEN_TAG)? + MINDMAP_OPEN_TAG.len();
    let len = reply[start..].find(MINDMAP_CLOSE_TAG)?;
    if len == 0 {
        return None;
    }
    Some(reply[start..start + len].trim())
}

fn non_empty(title: Option<&str>) -> Option<&str> {
    title.filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_between_tags() {
        let reply = "[JSON-MAPA-MENTAL]\n  {\"a\": 1}\n[/JSON-MAPA-MENTAL]";
        assert_eq!(extract_tagged_json(reply), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_stops_at_first_close() {
        let reply = "ok [JSON-MAPA-MENTAL]{}[/JSON-MAPA-MENTAL] and [JSON-MAPA-MENTAL]x[/JSON-MAPA-MENTAL]";
        assert_eq!(extract_tagged_json(reply), Some("{}"));
    }

    #[test]
    fn test_extract_missing_tags() {
        assert_eq!(extract_tagged_json("{\"title\": \"x\"}"), None);
        assert_eq!(extract_tagged_json("[JSON-MAPA-MENTAL]{}"), None);
        assert_eq!(extract_tagged_json("{}[/JSON-MAPA-MENTAL]"), None);
        assert_eq!(extract_tagged_json("[JSON-MAPA-MENTAL][/JSON-MAPA-MENTAL]"), None);
    }

    #[test]
    fn test_fallback_title() {
        assert_eq!(GeneratedMindMap::fallback(None).title, FALLBACK_MIND_MAP_TITLE);
        assert_eq!(GeneratedMindMap::fallback(Some("")).title, FALLBACK_MIND_MAP_TITLE);
        assert_eq!(GeneratedMindMap::fallback(Some("Física")).title, "Física");
    }
}
