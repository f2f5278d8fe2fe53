use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::Stream;
use mapamente_audio::{AudioError, Transcriber, TranscriptionClient};
use mapamente_llm::{ChatClient, ChatRequest, ChatResponse, StreamEvent};
use mockito::Matcher;
use tempfile::TempDir;

struct FormattingClient {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl FormattingClient {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ChatClient for FormattingClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let prompt = request.messages[0].content().to_string();
        self.prompts.lock().unwrap().push(prompt);
        Ok(ChatResponse {
            content: self.reply.clone(),
            model: Some(request.model),
            done: true,
            raw: serde_json::Value::Null,
        })
    }

    async fn chat_stream(
        &self,
        _request: ChatRequest,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>>> {
        Err(anyhow!("not used"))
    }
}

fn audio_file(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, b"RIFF....WAVEfmt ").unwrap();
    (dir, path)
}

#[tokio::test]
async fn test_transcribe_uploads_file_field() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/transcrever")
        .match_header("content-type", Matcher::Regex("multipart/form-data".to_string()))
        .match_body(Matcher::Regex(r#"name="file"; filename="aula.wav""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"texto": "ola turma hoje vamos falar de fotossintese"}"#)
        .create_async()
        .await;

    let (_dir, path) = audio_file("aula.wav");
    let client = TranscriptionClient::new(format!("{}/transcrever", server.url())).unwrap();

    let text = client.transcribe(&path).await.unwrap();
    assert_eq!(text, "ola turma hoje vamos falar de fotossintese");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transcribe_service_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/transcrever")
        .with_status(200)
        .with_body(r#"{"error": "arquivo corrompido"}"#)
        .create_async()
        .await;

    let (_dir, path) = audio_file("aula.wav");
    let client = TranscriptionClient::new(format!("{}/transcrever", server.url())).unwrap();

    match client.transcribe(&path).await {
        Err(AudioError::Service(msg)) => assert_eq!(msg, "arquivo corrompido"),
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transcribe_http_status_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/transcrever")
        .with_status(500)
        .with_body("whisper crashed")
        .create_async()
        .await;

    let (_dir, path) = audio_file("aula.mp3");
    let client = TranscriptionClient::new(format!("{}/transcrever", server.url())).unwrap();

    match client.transcribe(&path).await {
        Err(AudioError::Api { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "whisper crashed");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transcriber_formats_transcript() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/transcrever")
        .with_status(200)
        .with_body(r#"{"texto": "bom dia ana bom dia joao"}"#)
        .create_async()
        .await;

    let chat = FormattingClient::new(
        "<TRANSCRICAO>\n<b>Ana:</b> Bom dia.\n<b>João:</b> Bom dia.\n</TRANSCRICAO>",
    );
    let transcriber = Transcriber::new(
        TranscriptionClient::new(format!("{}/transcrever", server.url())).unwrap(),
        chat.clone(),
        "llama3",
    );

    let (_dir, path) = audio_file("conversa.ogg");
    let result = transcriber.transcribe_audio(&path).await.unwrap();

    assert_eq!(result.text, "<b>Ana:</b> Bom dia.\n<b>João:</b> Bom dia.");
    assert_eq!(result.raw_text, "bom dia ana bom dia joao");

    let prompts = chat.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].ends_with("bom dia ana bom dia joao"));
}

#[tokio::test]
async fn test_transcriber_rejects_unsupported_format() {
    let server = mockito::Server::new_async().await;
    let transcriber = Transcriber::new(
        TranscriptionClient::new(format!("{}/transcrever", server.url())).unwrap(),
        FormattingClient::new("unused"),
        "llama3",
    );

    let (_dir, path) = audio_file("video.mp4");
    assert!(matches!(
        transcriber.try_transcribe(&path).await,
        Err(AudioError::UnsupportedFormat(_))
    ));
    assert!(transcriber.transcribe_audio(&path).await.is_none());
}

#[tokio::test]
async fn test_transcriber_empty_transcript_is_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/transcrever")
        .with_status(200)
        .with_body(r#"{"texto": ""}"#)
        .create_async()
        .await;

    let chat = FormattingClient::new("unused");
    let transcriber = Transcriber::new(
        TranscriptionClient::new(format!("{}/transcrever", server.url())).unwrap(),
        chat.clone(),
        "llama3",
    );

    let (_dir, path) = audio_file("silencio.wav");
    assert!(transcriber.transcribe_audio(&path).await.is_none());
    assert!(chat.prompts.lock().unwrap().is_empty());
}
