use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Message, MindMap};

pub const DEFAULT_CHAT_TITLE: &str = "Novo Chat";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Older records were written before chats carried mind-maps
    #[serde(default)]
    pub mind_maps: Vec<MindMap>,
}

impl Chat {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: crate::new_id(),
            title: title.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            mind_maps: Vec::new(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn message_mut(&mut self, message_id: &str) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == message_id)
    }

    pub fn mind_map(&self, mind_map_id: &str) -> Option<&MindMap> {
        self.mind_maps.iter().find(|m| m.id == mind_map_id)
    }

    pub fn mind_map_mut(&mut self, mind_map_id: &str) -> Option<&mut MindMap> {
        self.mind_maps.iter_mut().find(|m| m.id == mind_map_id)
    }

    pub fn first_mind_map_id(&self) -> Option<String> {
        self.mind_maps.first().map(|m| m.id.clone())
    }
}
