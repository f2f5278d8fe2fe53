use std::sync::Arc;

use chrono::Utc;
use mapamente_persist::ChatStorage;
use mapamente_types::{
    sample_chats, Chat, Message, MessageRole, MindMap, MindMapNode, MindMapSource, MindMapUpdate,
    DEFAULT_CHAT_TITLE,
};

use crate::builder::ChatStoreBuilder;

/// Owner of every chat, its messages and mind-maps, and the active selection.
///
/// Each successful mutation writes the whole collection back to storage
/// before returning. Operations on unknown ids change nothing and report it
/// through their return value.
///
/// Selection invariant: `active_mind_map_id`, when set, names a mind-map of
/// the chat named by `active_chat_id`.
pub struct ChatStore {
    chats: Vec<Chat>,
    active_chat_id: Option<String>,
    active_mind_map_id: Option<String>,
    storage: Arc<dyn ChatStorage>,
}

impl ChatStore {
    pub fn builder() -> ChatStoreBuilder {
        ChatStoreBuilder::new()
    }

    /// Load the saved collection, falling back to the built-in samples.
    pub fn open(storage: Arc<dyn ChatStorage>) -> Self {
        Self::open_with_seed(storage, || sample_chats(Utc::now()))
    }

    /// Load the saved collection, falling back to `seed()` when storage is
    /// empty or unreadable. Selects the first chat and its first mind-map,
    /// then runs the repair pass.
    pub fn open_with_seed(storage: Arc<dyn ChatStorage>, seed: impl FnOnce() -> Vec<Chat>) -> Self {
        let chats = match storage.load() {
            Ok(Some(chats)) => {
                tracing::info!(chats = chats.len(), "loaded saved chats");
                chats
            }
            Ok(None) => {
                tracing::info!("no saved chats, using sample data");
                seed()
            }
            Err(e) => {
                tracing::error!("Failed to load saved chats, using sample data: {}", e);
                seed()
            }
        };

        let active_chat_id = chats.first().map(|c| c.id.clone());
        let active_mind_map_id = chats.first().and_then(Chat::first_mind_map_id);

        let mut store = Self {
            chats,
            active_chat_id,
            active_mind_map_id,
            storage,
        };
        store.repair_mind_maps();
        store
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.chats) {
            tracing::error!("Failed to save chats: {}", e);
        }
    }

    fn chat_mut(&mut self, chat_id: &str) -> Option<&mut Chat> {
        self.chats.iter_mut().find(|c| c.id == chat_id)
    }

    // ========================================================================
    // REPAIR
    // ========================================================================

    /// Give every mind-map without a tree the placeholder tree.
    ///
    /// Returns how many were repaired. Always persists.
    pub fn repair_mind_maps(&mut self) -> usize {
        let mut repaired = 0;
        for chat in &mut self.chats {
            for mind_map in &mut chat.mind_maps {
                if mind_map.repair() {
                    tracing::info!(mind_map = %mind_map.id, "repaired mind-map without root node");
                    repaired += 1;
                }
            }
        }

        self.persist();
        repaired
    }

    // ========================================================================
    // SELECTION
    // ========================================================================

    /// Switch the active chat. The id is kept even if no such chat exists;
    /// the active mind-map becomes the chat's first one, or none.
    pub fn set_active_chat(&mut self, chat_id: &str) {
        self.active_chat_id = Some(chat_id.to_string());
        self.active_mind_map_id = self
            .chats
            .iter()
            .find(|c| c.id == chat_id)
            .and_then(Chat::first_mind_map_id);
    }

    /// Select a mind-map of the active chat, repairing it if its tree is
    /// missing. Returns `false` and leaves the selection alone when the
    /// active chat has no such mind-map.
    pub fn set_active_mind_map(&mut self, mind_map_id: &str) -> bool {
        let Some(chat) = self.active_chat() else {
            return false;
        };
        let Some(mind_map) = chat.mind_map(mind_map_id) else {
            tracing::debug!(mind_map = %mind_map_id, "mind-map not in active chat");
            return false;
        };

        let chat_id = chat.id.clone();
        let missing_root = mind_map.root_node.is_none().then(|| mind_map.title.clone());

        self.active_mind_map_id = Some(mind_map_id.to_string());

        if let Some(title) = missing_root {
            tracing::info!(mind_map = %mind_map_id, "repairing selected mind-map");
            self.update_mind_map(
                &chat_id,
                mind_map_id,
                MindMapUpdate::new().root_node(MindMapNode::placeholder(&title)),
            );
        }
        true
    }

    // ========================================================================
    // CHATS
    // ========================================================================

    /// Prepend a new empty chat and make it active. Returns its id.
    pub fn create_chat(&mut self, title: Option<&str>) -> String {
        let chat = Chat::new(title.unwrap_or(DEFAULT_CHAT_TITLE));
        let id = chat.id.clone();

        self.chats.insert(0, chat);
        self.active_chat_id = Some(id.clone());
        self.active_mind_map_id = None;
        self.persist();

        id
    }

    pub fn delete_chat(&mut self, chat_id: &str) -> bool {
        let Some(index) = self.chats.iter().position(|c| c.id == chat_id) else {
            return false;
        };
        self.chats.remove(index);

        if self.active_chat_id.as_deref() == Some(chat_id) {
            let next = self.chats.first();
            self.active_chat_id = next.map(|c| c.id.clone());
            self.active_mind_map_id = next.and_then(Chat::first_mind_map_id);
        }

        self.persist();
        true
    }

    pub fn rename_chat(&mut self, chat_id: &str, title: &str) -> bool {
        let Some(chat) = self.chat_mut(chat_id) else {
            return false;
        };
        chat.title = title.to_string();
        chat.touch();

        self.persist();
        true
    }

    pub fn clear_all_chats(&mut self) {
        self.chats.clear();
        self.active_chat_id = None;
        self.active_mind_map_id = None;
        self.persist();
    }

    // ========================================================================
    // MESSAGES
    // ========================================================================

    /// Append a message. Returns its id, or `None` for an unknown chat.
    pub fn add_message(&mut self, chat_id: &str, content: &str, role: MessageRole) -> Option<String> {
        let chat = self.chat_mut(chat_id)?;
        let message = Message::new(content, role);
        let id = message.id.clone();

        chat.messages.push(message);
        chat.touch();

        self.persist();
        Some(id)
    }

    /// Replace a message's content in place. Position and timestamp stay put
    /// so streamed replies never reorder the conversation.
    pub fn update_message_content(&mut self, chat_id: &str, message_id: &str, content: &str) -> bool {
        let Some(message) = self.chat_mut(chat_id).and_then(|c| c.message_mut(message_id)) else {
            return false;
        };
        message.content = content.to_string();

        self.persist();
        true
    }

    // ========================================================================
    // MIND-MAPS
    // ========================================================================

    /// Append a mind-map (placeholder tree when `root_node` is `None`) and
    /// select it, along with its chat. Returns its id.
    pub fn add_mind_map(
        &mut self,
        chat_id: &str,
        title: &str,
        root_node: Option<MindMapNode>,
        source: MindMapSource,
        document_name: Option<String>,
    ) -> Option<String> {
        let chat = self.chat_mut(chat_id)?;
        let mind_map = MindMap::new(title, root_node, source, document_name);
        let id = mind_map.id.clone();

        chat.mind_maps.push(mind_map);
        chat.touch();

        self.active_chat_id = Some(chat_id.to_string());
        self.active_mind_map_id = Some(id.clone());

        self.persist();
        Some(id)
    }

    pub fn update_mind_map(&mut self, chat_id: &str, mind_map_id: &str, update: MindMapUpdate) -> bool {
        let Some(chat) = self.chat_mut(chat_id) else {
            return false;
        };
        let Some(mind_map) = chat.mind_map_mut(mind_map_id) else {
            return false;
        };
        if update.is_empty() {
            return true;
        }
        mind_map.apply(update);
        chat.touch();

        self.persist();
        true
    }

    pub fn delete_mind_map(&mut self, chat_id: &str, mind_map_id: &str) -> bool {
        let Some(chat) = self.chat_mut(chat_id) else {
            return false;
        };
        let Some(index) = chat.mind_maps.iter().position(|m| m.id == mind_map_id) else {
            return false;
        };
        chat.mind_maps.remove(index);
        chat.touch();
        let next = chat.first_mind_map_id();

        if self.active_chat_id.as_deref() == Some(chat_id)
            && self.active_mind_map_id.as_deref() == Some(mind_map_id)
        {
            self.active_mind_map_id = next;
        }

        self.persist();
        true
    }

    // ========================================================================
    // VIEWS
    // ========================================================================

    /// Collection order (newest-created first)
    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn chat(&self, chat_id: &str) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == chat_id)
    }

    pub fn active_chat_id(&self) -> Option<&str> {
        self.active_chat_id.as_deref()
    }

    pub fn active_mind_map_id(&self) -> Option<&str> {
        self.active_mind_map_id.as_deref()
    }

    pub fn active_chat(&self) -> Option<&Chat> {
        self.active_chat_id.as_deref().and_then(|id| self.chat(id))
    }

    /// Most recently updated first
    pub fn sorted_chats(&self) -> Vec<&Chat> {
        let mut chats: Vec<&Chat> = self.chats.iter().collect();
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        chats
    }

    pub fn active_mind_map(&self) -> Option<&MindMap> {
        let id = self.active_mind_map_id.as_deref()?;
        self.active_chat()?.mind_map(id)
    }

    /// Mind-maps of the active chat
    pub fn chat_mind_maps(&self) -> &[MindMap] {
        self.active_chat().map(|c| c.mind_maps.as_slice()).unwrap_or(&[])
    }
}
