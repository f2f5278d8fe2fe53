use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Transcription service error: {0}")]
    Service(String),

    #[error("Unsupported audio format: {0}. Use MP3, WAV, OGG or WEBM")]
    UnsupportedFormat(String),

    #[error("Transcription came back empty")]
    EmptyTranscript,

    #[error("Transcript formatting failed: {0:#}")]
    Formatting(anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AudioError>;

/// Turn a non-success response into `AudioError::Api`
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AudioError::Api {
        status: status.as_u16(),
        body,
    })
}
