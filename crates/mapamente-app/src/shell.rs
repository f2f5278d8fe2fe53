use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures::StreamExt;
use mapamente_llm::{with_default_system_prompt, ChatRequest, Message as LlmMessage, StreamEvent};
use mapamente_mindmap::{extract_text, DocumentKind};
use mapamente_persist::UserStorage;
use mapamente_types::{Chat, MessageRole, MindMapSource, User};

use crate::commands::{Command, HELP};
use crate::render;
use crate::state::AppState;

const DEFAULT_SPEECH_FILE: &str = "resposta.mp3";
const REPLY_ERROR: &str = "Desculpe, ocorreu um erro ao processar sua mensagem.";

/// Whether the loop should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Conversation turns in the shape the chat endpoint expects
pub fn conversation(chat: &Chat) -> Vec<LlmMessage> {
    chat.messages
        .iter()
        .filter(|m| !m.content.is_empty())
        .map(|m| match m.role {
            MessageRole::User => LlmMessage::human(&m.content),
            MessageRole::Assistant => LlmMessage::ai(&m.content),
        })
        .collect()
}

/// The conversation flattened into text for mind-map generation
pub fn transcript(chat: &Chat) -> String {
    chat.messages
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct Shell {
    state: AppState,
}

impl Shell {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn execute(&mut self, command: Command, out: &mut dyn Write) -> Result<Flow> {
        tracing::debug!(?command, "executing");
        match command {
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::NewChat(title) => {
                let id = self.state.store.create_chat(title.as_deref());
                writeln!(out, "created chat {}", id)?;
            }
            Command::ListChats => self.list_chats(out)?,
            Command::OpenChat(id) => {
                self.state.store.set_active_chat(&id);
                match self.state.store.active_chat() {
                    Some(chat) => writeln!(out, "now in \"{}\"", chat.title)?,
                    None => writeln!(out, "no chat {}", id)?,
                }
            }
            Command::RenameChat(title) => {
                let renamed = self
                    .active_chat_id()
                    .is_some_and(|id| self.state.store.rename_chat(&id, &title));
                if renamed {
                    writeln!(out, "renamed to \"{}\"", title)?;
                } else {
                    writeln!(out, "no active chat")?;
                }
            }
            Command::DeleteChat(id) => match id.or_else(|| self.active_chat_id()) {
                Some(id) => {
                    if self.state.store.delete_chat(&id) {
                        writeln!(out, "deleted chat {}", id)?;
                    } else {
                        writeln!(out, "no chat {}", id)?;
                    }
                }
                None => writeln!(out, "no active chat")?,
            },
            Command::History => match self.state.store.active_chat() {
                Some(chat) if chat.messages.is_empty() => writeln!(out, "(no messages)")?,
                Some(chat) => {
                    for message in &chat.messages {
                        writeln!(out, "{}", render::render_message(message))?;
                    }
                }
                None => writeln!(out, "no active chat")?,
            },
            Command::ListMaps => self.list_maps(out)?,
            Command::ShowMap(id) => self.show_map(id, out)?,
            Command::GenerateMap(title) => self.generate_from_chat(title, out).await?,
            Command::MapFromDocument { path, title } => {
                self.generate_from_document(&path, title, out).await?
            }
            Command::DeleteMap(id) => {
                let target = id.or_else(|| self.state.store.active_mind_map_id().map(str::to_string));
                let deleted = match (self.active_chat_id(), &target) {
                    (Some(chat_id), Some(map_id)) => self.state.store.delete_mind_map(&chat_id, map_id),
                    _ => false,
                };
                match target {
                    Some(map_id) if deleted => writeln!(out, "deleted mind-map {}", map_id)?,
                    _ => writeln!(out, "no such mind-map in the active chat")?,
                }
            }
            Command::Transcribe(path) => self.transcribe(&path, out).await?,
            Command::Speak(path) => self.speak(path, out).await?,
            Command::ShowUser => match &self.state.user {
                Some(user) => writeln!(out, "{} <{}>", user.name, user.email)?,
                None => writeln!(out, "no user saved")?,
            },
            Command::SetUser { name, email } => {
                let user = User::new(name, email);
                self.state
                    .users
                    .save_user(&user)
                    .context("Failed to save user")?;
                writeln!(out, "saved {} <{}>", user.name, user.email)?;
                self.state.user = Some(user);
            }
            Command::ClearUser => {
                self.state.users.clear_user().context("Failed to clear user")?;
                self.state.user = None;
                writeln!(out, "user removed")?;
            }
            Command::ClearAll => {
                self.state.store.clear_all_chats();
                writeln!(out, "all chats deleted")?;
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Say(text) => self.say(&text, out).await?,
        }
        Ok(Flow::Continue)
    }

    fn active_chat_id(&self) -> Option<String> {
        self.state.store.active_chat().map(|c| c.id.clone())
    }

    /// Active chat id, creating a chat when none is active
    fn ensure_chat(&mut self) -> String {
        match self.active_chat_id() {
            Some(id) => id,
            None => self.state.store.create_chat(None),
        }
    }

    fn list_chats(&self, out: &mut dyn Write) -> Result<()> {
        let store = &self.state.store;
        let chats = store.sorted_chats();
        if chats.is_empty() {
            writeln!(out, "(no chats)")?;
        }
        for chat in chats {
            let active = store.active_chat_id() == Some(chat.id.as_str());
            writeln!(out, "{}", render::render_chat_line(chat, active))?;
        }
        Ok(())
    }

    fn list_maps(&self, out: &mut dyn Write) -> Result<()> {
        let store = &self.state.store;
        let maps = store.chat_mind_maps();
        if maps.is_empty() {
            writeln!(out, "(no mind-maps)")?;
        }
        for mind_map in maps {
            let active = store.active_mind_map_id() == Some(mind_map.id.as_str());
            writeln!(out, "{}", render::render_map_line(mind_map, active))?;
        }
        Ok(())
    }

    fn show_map(&mut self, id: Option<String>, out: &mut dyn Write) -> Result<()> {
        if let Some(id) = id {
            if !self.state.store.set_active_mind_map(&id) {
                writeln!(out, "no mind-map {} in the active chat", id)?;
                return Ok(());
            }
        }
        match self.state.store.active_mind_map() {
            Some(mind_map) => write!(out, "{}", render::render_mind_map(mind_map))?,
            None => writeln!(out, "no active mind-map")?,
        }
        Ok(())
    }

    async fn say(&mut self, text: &str, out: &mut dyn Write) -> Result<()> {
        let chat_id = self.ensure_chat();
        let store = &mut self.state.store;

        store.add_message(&chat_id, text, MessageRole::User);
        let history = store.chat(&chat_id).map(conversation).unwrap_or_default();
        let reply_id = store
            .add_message(&chat_id, "", MessageRole::Assistant)
            .context("Active chat disappeared")?;

        let request = ChatRequest::new(&self.state.config.llm.model, with_default_system_prompt(history));

        let mut stream = match self.state.chat_client.chat_stream(request).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!("Chat request failed: {:#}", e);
                store.update_message_content(&chat_id, &reply_id, REPLY_ERROR);
                writeln!(out, "{}", REPLY_ERROR)?;
                return Ok(());
            }
        };

        let mut reply = String::new();
        while let Some(event) = stream.next().await {
            match event {
                Ok(StreamEvent::Message { content }) => {
                    reply.push_str(&content);
                    store.update_message_content(&chat_id, &reply_id, &reply);
                    write!(out, "{}", content)?;
                    out.flush()?;
                }
                Ok(StreamEvent::Done { .. }) => break,
                Err(e) => {
                    tracing::error!("Chat stream failed: {:#}", e);
                    if reply.is_empty() {
                        store.update_message_content(&chat_id, &reply_id, REPLY_ERROR);
                        write!(out, "{}", REPLY_ERROR)?;
                    }
                    break;
                }
            }
        }
        writeln!(out)?;
        Ok(())
    }

    async fn generate_from_chat(&mut self, title: Option<String>, out: &mut dyn Write) -> Result<()> {
        let Some(chat) = self.state.store.active_chat() else {
            writeln!(out, "no active chat")?;
            return Ok(());
        };
        if chat.messages.is_empty() {
            writeln!(out, "the chat has no messages yet")?;
            return Ok(());
        }
        let chat_id = chat.id.clone();
        let text = transcript(chat);

        writeln!(out, "generating mind-map...")?;
        let generated = self.state.generator.generate_from_text(&text, title.as_deref()).await;

        self.state.store.add_mind_map(
            &chat_id,
            &generated.title,
            Some(generated.root_node),
            MindMapSource::Chat,
            None,
        );
        self.show_map(None, out)
    }

    async fn generate_from_document(
        &mut self,
        path: &Path,
        title: Option<String>,
        out: &mut dyn Write,
    ) -> Result<()> {
        if DocumentKind::from_path(path).is_none() {
            writeln!(out, "unsupported document: use .txt, .pdf, .doc or .docx")?;
            return Ok(());
        }

        let text = match extract_text(path).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path.display(), "document extraction failed: {}", e);
                writeln!(out, "{}", e)?;
                return Ok(());
            }
        };

        let document_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let chat_id = self.ensure_chat();

        writeln!(out, "generating mind-map from {}...", document_name)?;
        let generated = self.state.generator.generate_from_text(&text, title.as_deref()).await;

        self.state.store.add_mind_map(
            &chat_id,
            &generated.title,
            Some(generated.root_node),
            MindMapSource::Document,
            Some(document_name),
        );
        self.show_map(None, out)
    }

    async fn transcribe(&mut self, path: &Path, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "transcribing {}...", path.display())?;
        match self.state.transcriber.transcribe_audio(path).await {
            Some(result) => {
                writeln!(out, "{}", result.text)?;
                self.say(&result.text, out).await
            }
            None => {
                writeln!(out, "transcription failed")?;
                Ok(())
            }
        }
    }

    async fn speak(&self, path: Option<PathBuf>, out: &mut dyn Write) -> Result<()> {
        let Some(tts) = &self.state.tts else {
            writeln!(out, "speech disabled: set ELEVENLABS_API_KEY")?;
            return Ok(());
        };
        let last_reply = self.state.store.active_chat().and_then(|chat| {
            chat.messages
                .iter()
                .rev()
                .find(|m| m.role == MessageRole::Assistant && !m.content.is_empty())
        });
        let Some(reply) = last_reply else {
            writeln!(out, "no assistant reply to speak")?;
            return Ok(());
        };

        let voice_id = &self.state.config.tts.voice_id;
        let Some(audio) = tts.text_to_speech(voice_id, &reply.content, &Default::default()).await else {
            writeln!(out, "speech synthesis failed")?;
            return Ok(());
        };

        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_SPEECH_FILE));
        tokio::fs::write(&path, &audio)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        writeln!(out, "saved {} bytes to {}", audio.len(), path.display())?;
        Ok(())
    }
}
