use mapamente_types::{Chat, User};

use crate::error::{PersistError, Result};
use crate::kv::{KeyValueStore, CHATS_KEY, USER_KEY};

/// Persistence port for the chat collection
pub trait ChatStorage: Send + Sync {
    /// `Ok(None)` when nothing was ever saved; `Err` when the stored value is
    /// unreadable or corrupt.
    fn load(&self) -> Result<Option<Vec<Chat>>>;

    /// Replace the stored collection
    fn save(&self, chats: &[Chat]) -> Result<()>;
}

/// Persistence port for the logged-in user record
pub trait UserStorage: Send + Sync {
    fn load_user(&self) -> Result<Option<User>>;

    fn save_user(&self, user: &User) -> Result<()>;

    fn clear_user(&self) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> ChatStorage for S {
    fn load(&self) -> Result<Option<Vec<Chat>>> {
        let Some(raw) = self.get(CHATS_KEY)? else {
            return Ok(None);
        };

        let chats = serde_json::from_str(&raw).map_err(|source| PersistError::Corrupt {
            key: CHATS_KEY.to_string(),
            source,
        })?;
        Ok(Some(chats))
    }

    fn save(&self, chats: &[Chat]) -> Result<()> {
        let raw = serde_json::to_string(chats)?;
        self.set(CHATS_KEY, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> UserStorage for S {
    fn load_user(&self) -> Result<Option<User>> {
        let Some(raw) = self.get(USER_KEY)? else {
            return Ok(None);
        };

        let user = serde_json::from_str(&raw).map_err(|source| PersistError::Corrupt {
            key: USER_KEY.to_string(),
            source,
        })?;
        Ok(Some(user))
    }

    fn save_user(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.set(USER_KEY, &raw)
    }

    fn clear_user(&self) -> Result<()> {
        self.remove(USER_KEY)
    }
}

/// Restore the saved user, dropping a corrupt record.
pub fn restore_user(storage: &dyn UserStorage) -> Option<User> {
    match storage.load_user() {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to restore saved user: {}", e);
            if let Err(e) = storage.clear_user() {
                tracing::warn!("Failed to clear corrupt user record: {}", e);
            }
            None
        }
    }
}
