pub mod error;
pub mod format;
pub mod transcriber;
pub mod transcription;
pub mod tts;

pub use error::{AudioError, Result};
pub use format::AudioFormat;
pub use transcriber::{extract_transcript, Transcriber, TranscriptionResult, TRANSCRIPT_FORMAT_PROMPT};
pub use transcription::{TranscriptionClient, DEFAULT_TRANSCRIPTION_URL};
pub use tts::{ElevenLabsClient, VoiceSettings, DEFAULT_TTS_MODEL, DEFAULT_VOICE_ID, ELEVENLABS_API_URL};
