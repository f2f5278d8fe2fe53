pub mod error;
pub mod kv;
pub mod memory;
pub mod file;
pub mod storage;

pub use error::{PersistError, Result};
pub use kv::{KeyValueStore, CHATS_KEY, USER_KEY};
pub use memory::InMemoryStorage;
pub use file::JsonFileStorage;
pub use storage::{restore_user, ChatStorage, UserStorage};
