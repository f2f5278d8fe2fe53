//! Data model shared by the Mapamente crates.
//!
//! The serialized form of these types is the persisted chat collection:
//! camelCase field names, RFC 3339 dates, lowercase enum values.

mod chat;
mod message;
mod mindmap;
mod samples;
mod user;

pub use chat::{Chat, DEFAULT_CHAT_TITLE};
pub use message::{Message, MessageRole};
pub use mindmap::{
    MindMap, MindMapNode, MindMapSource, MindMapUpdate, DEFAULT_MIND_MAP_TITLE,
    FALLBACK_MIND_MAP_TITLE,
};
pub use samples::sample_chats;
pub use user::User;

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
