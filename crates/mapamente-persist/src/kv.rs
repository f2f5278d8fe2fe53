use crate::error::Result;

/// Key holding the serialized chat collection
pub const CHATS_KEY: &str = "chats";

/// Key holding the serialized logged-in user
pub const USER_KEY: &str = "user";

/// Durable string key-value storage
///
/// Implementations persist each `set` before returning.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}
