use std::path::Path;
use std::sync::Arc;

use mapamente_llm::{ChatClient, ChatRequest, Message};

use crate::error::{AudioError, Result};
use crate::format::AudioFormat;
use crate::transcription::TranscriptionClient;

const OPEN_TAG: &str = "<TRANSCRICAO>";
const CLOSE_TAG: &str = "</TRANSCRICAO>";

/// Asks the model to punctuate a raw transcript without changing its words.
/// The transcript is appended after this text.
pub const TRANSCRIPT_FORMAT_PROMPT: &str = "Você é um especialista em transcrições de áudio. \
Seu trabalho é formatar e organizar transcrições brutas em português, mantendo EXATAMENTE as \
mesmas palavras e conteúdo, mas melhorando pontuação, parágrafos e formatação, sem alterar \
nenhuma palavra ou significado do texto original. Somente retorne o texto formatado, entre as \
tags <TRANSCRICAO> e </TRANSCRICAO>, sem nenhum outro texto. O seu trabalho vai ser fazer uma \
transcrição narrativa do texto transcrito. Tente adicionar antes dos textos os nomes dos \
personagens, se houver. Retorne o texto formatado em markdown. Não retorne nada além do texto \
formatado. Um exemplo de texto formatado:
<b>João:</b> Olá, como você está?
<b>Maria:</b> Estou bem, obrigada. E você?
<b>João:</b> Estou bem, obrigado.

Texto a ser formatado:
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionResult {
    /// Formatted transcript
    pub text: String,
    /// Transcript as returned by the speech-to-text service
    pub raw_text: String,
}

/// Speech-to-text followed by a formatting pass through the chat model.
pub struct Transcriber {
    client: TranscriptionClient,
    chat: Arc<dyn ChatClient>,
    model: String,
}

impl Transcriber {
    pub fn new(client: TranscriptionClient, chat: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            chat,
            model: model.into(),
        }
    }

    pub async fn try_transcribe(&self, path: &Path) -> Result<TranscriptionResult> {
        if AudioFormat::from_path(path).is_none() {
            return Err(AudioError::UnsupportedFormat(path.display().to_string()));
        }

        let raw_text = self.client.transcribe(path).await?;
        if raw_text.trim().is_empty() {
            return Err(AudioError::EmptyTranscript);
        }
        tracing::info!(chars = raw_text.len(), "received raw transcript");

        let prompt = format!("{}{}", TRANSCRIPT_FORMAT_PROMPT, raw_text);
        let request = ChatRequest::new(&self.model, vec![Message::human(prompt)]);
        let response = self.chat.chat(request).await.map_err(AudioError::Formatting)?;

        Ok(TranscriptionResult {
            text: extract_transcript(&response.content).to_string(),
            raw_text,
        })
    }

    /// Transcribe and format `path`; any failure is logged and yields `None`.
    pub async fn transcribe_audio(&self, path: &Path) -> Option<TranscriptionResult> {
        match self.try_transcribe(path).await {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::error!("Audio transcription failed: {}", e);
                None
            }
        }
    }
}

/// Text inside the `<TRANSCRICAO>` tags, or the whole trimmed reply when
/// the model left them out.
pub fn extract_transcript(reply: &str) -> &str {
    let tagged = reply.find(OPEN_TAG).and_then(|start| {
        let start = start + OPEN_TAG.len();
        reply[start..]
            .find(CLOSE_TAG)
            .map(|len| &reply[start..start + len])
    });
    tagged.unwrap_or(reply).trim()
}
