use std::sync::Arc;

use mapamente_persist::ChatStorage;
use mapamente_types::Chat;

use crate::error::{Result, StoreError};
use crate::ChatStore;

pub struct ChatStoreBuilder {
    storage: Option<Arc<dyn ChatStorage>>,
    seed: Option<Vec<Chat>>,
}

impl ChatStoreBuilder {
    pub fn new() -> Self {
        Self {
            storage: None,
            seed: None,
        }
    }

    pub fn storage(mut self, storage: Arc<dyn ChatStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Chats used when storage holds nothing usable. Defaults to the
    /// built-in samples.
    pub fn seed(mut self, chats: Vec<Chat>) -> Self {
        self.seed = Some(chats);
        self
    }

    pub fn build(self) -> Result<ChatStore> {
        let storage = self.storage.ok_or(StoreError::MissingField("storage"))?;

        Ok(match self.seed {
            Some(seed) => ChatStore::open_with_seed(storage, move || seed),
            None => ChatStore::open(storage),
        })
    }
}

impl Default for ChatStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
