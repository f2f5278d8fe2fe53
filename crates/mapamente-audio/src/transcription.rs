use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::{check_status, AudioError, Result};
use crate::format::AudioFormat;

pub const DEFAULT_TRANSCRIPTION_URL: &str = "http://127.0.0.1:5001/transcrever";

#[derive(Debug, Deserialize)]
struct TranscriptionReply {
    #[serde(default)]
    texto: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the speech-to-text service.
///
/// Uploads one file per request as the multipart field `file` and reads back
/// `{"texto": ..}` or `{"error": ..}`.
pub struct TranscriptionClient {
    http_client: reqwest::Client,
    url: String,
}

impl TranscriptionClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder().build()?;
        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw transcript of the audio file at `path`
    pub async fn transcribe(&self, path: &Path) -> Result<String> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();

        let mut part = Part::bytes(data).file_name(file_name);
        if let Some(format) = AudioFormat::from_path(path) {
            part = part.mime_str(format.mime_type())?;
        }
        let form = Form::new().part("file", part);

        tracing::debug!(url = %self.url, path = %path.display(), "uploading audio for transcription");

        let response = self.http_client.post(&self.url).multipart(form).send().await?;
        let reply: TranscriptionReply = check_status(response).await?.json().await?;

        if let Some(error) = reply.error {
            return Err(AudioError::Service(error));
        }
        Ok(reply.texto.unwrap_or_default())
    }
}
