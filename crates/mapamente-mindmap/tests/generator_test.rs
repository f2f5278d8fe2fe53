use std::pin::Pin;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::Stream;
use mapamente_llm::{ChatClient, ChatRequest, ChatResponse, OllamaClient, Role, StreamEvent};
use mapamente_mindmap::{DiagnosticsSink, GenerationError, MindMapGenerator};
use mapamente_types::MindMapNode;

/// Replies with a fixed string, or fails, and remembers the last request
struct ScriptedClient {
    reply: Option<String>,
    last_request: Mutex<Option<ChatRequest>>,
}

impl ScriptedClient {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            last_request: Mutex::new(None),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            last_request: Mutex::new(None),
        })
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        *self.last_request.lock().unwrap() = Some(request);
        let content = self.reply.clone().ok_or_else(|| anyhow!("connection refused"))?;
        Ok(ChatResponse {
            content,
            model: None,
            done: true,
            raw: serde_json::Value::Null,
        })
    }

    async fn chat_stream(
        &self,
        _request: ChatRequest,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>>> {
        Err(anyhow!("streaming not scripted"))
    }
}

#[derive(Default)]
struct RecordingDiagnostics {
    reports: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl DiagnosticsSink for RecordingDiagnostics {
    async fn generation_failed(&self, text: &str, error: &GenerationError) {
        self.reports
            .lock()
            .unwrap()
            .push((text.to_string(), error.to_string()));
    }
}

const TAGGED_REPLY: &str = r##"[JSON-MAPA-MENTAL]
{
  "title": "Gravidade",
  "rootNode": {
    "id": "root1",
    "text": "Gravidade",
    "children": [
      {"id": "c1", "text": "Newton", "children": [{"id": "c1-1", "text": "Lei universal"}]},
      {"id": "c2", "text": "Einstein", "color": "#ff0000"}
    ]
  }
}
[/JSON-MAPA-MENTAL]"##;

#[tokio::test]
async fn test_generate_parses_tagged_reply() {
    let client = ScriptedClient::replying(TAGGED_REPLY);
    let generator = MindMapGenerator::new(client.clone());

    let generated = generator.generate_from_text("Explique a gravidade", None).await;

    assert_eq!(generated.title, "Gravidade");
    assert_eq!(generated.root_node.children().len(), 2);
    assert_eq!(generated.root_node.children()[1].color.as_deref(), Some("#ff0000"));
    assert!(generated.root_node.children()[1].children.is_none());
    assert_eq!(generated.root_node.node_count(), 4);

    let request = client.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(request.model, "llama3:8b");
    assert!(request.options.raw);
    assert_eq!(request.messages[0].role(), Role::System);
    assert!(request.messages[1].content().ends_with("\n\nExplique a gravidade"));
}

#[tokio::test]
async fn test_caller_title_wins() {
    let generator = MindMapGenerator::new(ScriptedClient::replying(TAGGED_REPLY));

    let generated = generator.generate_from_text("texto", Some("Física")).await;
    assert_eq!(generated.title, "Física");
    assert_eq!(generated.root_node.text, "Gravidade");

    let generated = generator.generate_from_text("texto", Some("")).await;
    assert_eq!(generated.title, "Gravidade");
}

#[tokio::test]
async fn test_untagged_reply_falls_back() {
    let diagnostics = Arc::new(RecordingDiagnostics::default());
    let generator = MindMapGenerator::new(ScriptedClient::replying(
        "Claro! A gravidade é a força que atrai os corpos.",
    ))
    .with_diagnostics(diagnostics.clone());

    let generated = generator.generate_from_text("Explain gravity", None).await;

    assert_eq!(generated.title, "Mapa mental");
    assert_eq!(
        generated.root_node,
        MindMapNode::branch(
            "root1",
            "Tema principal",
            vec![MindMapNode::branch(
                "error1",
                "Erro ao gerar mapa mental",
                vec![MindMapNode::leaf("error1-1", "Tente novamente mais tarde")],
            )],
        )
    );

    let reports = diagnostics.reports.lock().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].0, "Explain gravity");
    assert!(reports[0].1.contains("JSON-MAPA-MENTAL"));
}

#[tokio::test]
async fn test_try_generate_reports_cause() {
    let generator = MindMapGenerator::new(ScriptedClient::failing());
    assert!(matches!(
        generator.try_generate("x", None).await,
        Err(GenerationError::Completion(_))
    ));

    let generator = MindMapGenerator::new(ScriptedClient::replying(
        "[JSON-MAPA-MENTAL]{\"title\": \"sem raiz\"[/JSON-MAPA-MENTAL]",
    ));
    assert!(matches!(
        generator.try_generate("x", None).await,
        Err(GenerationError::MalformedJson(_))
    ));

    let generator = MindMapGenerator::new(ScriptedClient::replying("nada aqui"));
    assert!(matches!(
        generator.try_generate("x", None).await,
        Err(GenerationError::MissingMarkers)
    ));
}

#[tokio::test]
async fn test_transport_failure_keeps_caller_title() {
    let generator = MindMapGenerator::new(ScriptedClient::failing());
    let generated = generator.generate_from_text("x", Some("Revisão")).await;

    assert_eq!(generated.title, "Revisão");
    assert_eq!(generated.root_node, MindMapNode::generation_fallback());
}

#[tokio::test]
async fn test_generate_against_ollama_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let reply = serde_json::json!({
        "model": "llama3:8b",
        "created_at": "2024-06-01T12:00:00Z",
        "message": {"role": "assistant", "content": TAGGED_REPLY},
        "done": true
    });
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "llama3:8b",
            "stream": false,
            "raw": true
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply.to_string())
        .create_async()
        .await;

    let generator = MindMapGenerator::new(Arc::new(OllamaClient::new(server.url()).unwrap()));
    let generated = generator.try_generate("Explique a gravidade", None).await.unwrap();

    assert_eq!(generated.title, "Gravidade");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .with_status(503)
        .with_body("model not loaded")
        .create_async()
        .await;

    let generator = MindMapGenerator::new(Arc::new(OllamaClient::new(server.url()).unwrap()));
    let generated = generator.generate_from_text("x", None).await;

    assert_eq!(generated.root_node, MindMapNode::generation_fallback());
    mock.assert_async().await;
}
