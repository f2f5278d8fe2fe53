use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Root text of the placeholder tree when the mind-map has no title
pub const DEFAULT_MIND_MAP_TITLE: &str = "Mapa Mental";

/// Title given to the generation fallback when the caller supplied none
pub const FALLBACK_MIND_MAP_TITLE: &str = "Mapa mental";

/// A node of a mind-map tree.
///
/// `children` stays optional: a node without the field is a leaf, and both
/// the missing and the empty form survive a serialization round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapNode {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MindMapNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl MindMapNode {
    pub fn leaf(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            children: None,
            color: None,
        }
    }

    pub fn branch(
        id: impl Into<String>,
        text: impl Into<String>,
        children: Vec<MindMapNode>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            children: Some(children),
            color: None,
        }
    }

    /// Two topics with two sub-topics each, rooted at `title`.
    ///
    /// Used for new mind-maps without a tree and for repairing records whose
    /// root went missing.
    pub fn placeholder(title: &str) -> Self {
        let root_text = if title.is_empty() {
            DEFAULT_MIND_MAP_TITLE
        } else {
            title
        };

        Self::branch(
            "root1",
            root_text,
            vec![
                Self::branch(
                    "c1",
                    "Tópico 1",
                    vec![
                        Self::leaf("c1-1", "Subtópico 1.1"),
                        Self::leaf("c1-2", "Subtópico 1.2"),
                    ],
                ),
                Self::branch(
                    "c2",
                    "Tópico 2",
                    vec![
                        Self::leaf("c2-1", "Subtópico 2.1"),
                        Self::leaf("c2-2", "Subtópico 2.2"),
                    ],
                ),
            ],
        )
    }

    /// Tree shown when generation fails
    pub fn generation_fallback() -> Self {
        Self::branch(
            "root1",
            "Tema principal",
            vec![Self::branch(
                "error1",
                "Erro ao gerar mapa mental",
                vec![Self::leaf("error1-1", "Tente novamente mais tarde")],
            )],
        )
    }

    pub fn is_leaf(&self) -> bool {
        self.children.as_ref().map_or(true, |c| c.is_empty())
    }

    pub fn children(&self) -> &[MindMapNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(MindMapNode::node_count).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(MindMapNode::depth).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MindMapSource {
    #[default]
    Chat,
    Document,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMap {
    pub id: String,
    pub title: String,
    /// Absent only on records persisted before the tree was mandatory;
    /// the store repairs those on load. Any stored value that is not a
    /// node (`null`, `false`, `""`, `0`, a malformed object) reads as absent.
    #[serde(
        default,
        deserialize_with = "lenient_root",
        skip_serializing_if = "Option::is_none"
    )]
    pub root_node: Option<MindMapNode>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub source: MindMapSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
}

fn lenient_root<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<MindMapNode>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl MindMap {
    pub fn new(
        title: impl Into<String>,
        root_node: Option<MindMapNode>,
        source: MindMapSource,
        document_name: Option<String>,
    ) -> Self {
        let title = title.into();
        let root_node = root_node.unwrap_or_else(|| MindMapNode::placeholder(&title));
        let now = Utc::now();

        Self {
            id: crate::new_id(),
            title,
            root_node: Some(root_node),
            created_at: now,
            updated_at: now,
            source,
            document_name,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Substitute the placeholder tree if the root is missing.
    ///
    /// Returns `true` when the record changed.
    pub fn repair(&mut self) -> bool {
        if self.root_node.is_some() {
            return false;
        }
        self.root_node = Some(MindMapNode::placeholder(&self.title));
        self.touch();
        true
    }

    /// Apply the provided fields of `update`. `id` and `createdAt` never change.
    pub fn apply(&mut self, update: MindMapUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(root_node) = update.root_node {
            self.root_node = Some(root_node);
        }
        if let Some(source) = update.source {
            self.source = source;
        }
        if let Some(document_name) = update.document_name {
            self.document_name = Some(document_name);
        }
        self.touch();
    }
}

/// Partial update of a mind-map; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MindMapUpdate {
    pub title: Option<String>,
    pub root_node: Option<MindMapNode>,
    pub source: Option<MindMapSource>,
    pub document_name: Option<String>,
}

impl MindMapUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn root_node(mut self, root_node: MindMapNode) -> Self {
        self.root_node = Some(root_node);
        self
    }

    pub fn source(mut self, source: MindMapSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.root_node.is_none()
            && self.source.is_none()
            && self.document_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_placeholder_shape() {
        let root = MindMapNode::placeholder("Biologia");
        assert_eq!(root.id, "root1");
        assert_eq!(root.text, "Biologia");
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].text, "Tópico 1");
        assert_eq!(root.children()[1].children()[1].id, "c2-2");
        assert_eq!(root.node_count(), 7);
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn test_placeholder_empty_title_only() {
        assert_eq!(MindMapNode::placeholder("").text, DEFAULT_MIND_MAP_TITLE);
        assert_eq!(MindMapNode::placeholder("   ").text, "   ");
    }

    #[test]
    fn test_generation_fallback_shape() {
        let expected: MindMapNode = serde_json::from_value(json!({
            "id": "root1",
            "text": "Tema principal",
            "children": [{
                "id": "error1",
                "text": "Erro ao gerar mapa mental",
                "children": [{"id": "error1-1", "text": "Tente novamente mais tarde"}]
            }]
        }))
        .unwrap();
        assert_eq!(MindMapNode::generation_fallback(), expected);
    }

    #[test]
    fn test_missing_and_empty_children_preserved() {
        let raw = json!({
            "id": "r",
            "text": "Raiz",
            "children": [
                {"id": "a", "text": "A"},
                {"id": "b", "text": "B", "children": []}
            ]
        });
        let node: MindMapNode = serde_json::from_value(raw.clone()).unwrap();
        assert!(node.children()[0].children.is_none());
        assert_eq!(node.children()[1].children, Some(vec![]));
        assert!(node.children()[1].is_leaf());
        assert_eq!(serde_json::to_value(&node).unwrap(), raw);
    }

    #[test]
    fn test_mind_map_without_root_deserializes() {
        let map: MindMap = serde_json::from_value(json!({
            "id": "m1",
            "title": "Antigo",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "source": "chat"
        }))
        .unwrap();
        assert!(map.root_node.is_none());
    }

    #[test]
    fn test_mind_map_with_falsy_root_deserializes_as_missing() {
        for stored in [json!(null), json!(false), json!(""), json!(0)] {
            let map: MindMap = serde_json::from_value(json!({
                "id": "m1",
                "title": "Antigo",
                "rootNode": stored,
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z",
                "source": "chat"
            }))
            .unwrap();
            assert!(map.root_node.is_none(), "rootNode {} kept", stored);
        }
    }

    #[test]
    fn test_mind_map_with_root_object_keeps_it() {
        let map: MindMap = serde_json::from_value(json!({
            "id": "m1",
            "title": "Antigo",
            "rootNode": {"id": "r", "text": "Raiz"},
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "source": "chat"
        }))
        .unwrap();
        assert_eq!(map.root_node, Some(MindMapNode::leaf("r", "Raiz")));
    }

    #[test]
    fn test_repair_only_once() {
        let mut map = MindMap::new("Física", None, MindMapSource::Chat, None);
        assert!(!map.repair());

        map.root_node = None;
        assert!(map.repair());
        assert_eq!(map.root_node, Some(MindMapNode::placeholder("Física")));
        assert!(!map.repair());
    }

    #[test]
    fn test_apply_partial_update() {
        let mut map = MindMap::new("Química", None, MindMapSource::Chat, None);
        let created_at = map.created_at;
        map.apply(
            MindMapUpdate::new()
                .source(MindMapSource::Document)
                .document_name("apostila.txt"),
        );
        assert_eq!(map.title, "Química");
        assert_eq!(map.source, MindMapSource::Document);
        assert_eq!(map.document_name.as_deref(), Some("apostila.txt"));
        assert_eq!(map.created_at, created_at);
        assert!(map.updated_at >= created_at);
    }
}
