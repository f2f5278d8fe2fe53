use serde::{Deserialize, Serialize};

/// The persisted logged-in user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: crate::new_id(),
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }
}
