use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;

use crate::error::{check_status, AudioError, Result};

pub const ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1";
pub const DEFAULT_TTS_MODEL: &str = "eleven_multilingual_v2";
pub const DEFAULT_VOICE_ID: &str = "XB0fDUnXU5powFXDhCwa";

const API_KEY_HEADER: &str = "xi-api-key";

/// Voice tuning sent with every synthesis request. Values range 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

/// ElevenLabs text-to-speech client
pub struct ElevenLabsClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
}

impl ElevenLabsClient {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, ELEVENLABS_API_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: impl Into<String>) -> Result<Self> {
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| AudioError::Service("API key is not a valid header value".to_string()))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let http_client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_TTS_MODEL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Synthesize `text`, returning the encoded audio bytes
    pub async fn try_text_to_speech(
        &self,
        voice_id: &str,
        text: &str,
        settings: &VoiceSettings,
    ) -> Result<Vec<u8>> {
        let url = format!("{}/text-to-speech/{}", self.base_url, voice_id);
        let body = SpeechRequest {
            text,
            model_id: &self.model,
            voice_settings: *settings,
        };

        let response = self.http_client.post(&url).json(&body).send().await?;
        let audio = check_status(response).await?.bytes().await?;

        tracing::debug!(voice = %voice_id, bytes = audio.len(), "synthesized speech");
        Ok(audio.to_vec())
    }

    /// Synthesize `text`; failures are logged and yield `None`.
    pub async fn text_to_speech(
        &self,
        voice_id: &str,
        text: &str,
        settings: &VoiceSettings,
    ) -> Option<Vec<u8>> {
        match self.try_text_to_speech(voice_id, text, settings).await {
            Ok(audio) => Some(audio),
            Err(e) => {
                tracing::error!("Speech synthesis failed: {}", e);
                None
            }
        }
    }

    /// Whether the configured key is accepted
    pub async fn verify_api_key(&self) -> bool {
        let url = format!("{}/user", self.base_url);
        match self.http_client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::error!("API key verification failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = SpeechRequest {
            text: "Olá",
            model_id: DEFAULT_TTS_MODEL,
            voice_settings: VoiceSettings::default(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "text": "Olá",
                "model_id": "eleven_multilingual_v2",
                "voice_settings": {
                    "stability": 0.5,
                    "similarity_boost": 0.75,
                    "style": 0.0,
                    "use_speaker_boost": true
                }
            })
        );
    }
}
