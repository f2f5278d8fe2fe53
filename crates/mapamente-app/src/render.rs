//! Plain-text rendering for the shell.

use std::fmt::Write;

use mapamente_types::{Chat, Message, MessageRole, MindMap, MindMapNode, MindMapSource};

/// Indented outline of a tree, two spaces per level
pub fn render_tree(root: &MindMapNode) -> String {
    let mut out = String::new();
    write_node(&mut out, root, 0);
    out
}

fn write_node(out: &mut String, node: &MindMapNode, depth: usize) {
    let bullet = if depth == 0 { "●" } else { "-" };
    let _ = write!(out, "{}{} {}", "  ".repeat(depth), bullet, node.text);
    if let Some(color) = &node.color {
        let _ = write!(out, " [{}]", color);
    }
    out.push('\n');
    for child in node.children() {
        write_node(out, child, depth + 1);
    }
}

pub fn render_mind_map(mind_map: &MindMap) -> String {
    let mut out = format!("{} ({})\n", mind_map.title, source_label(mind_map));
    match &mind_map.root_node {
        Some(root) => out.push_str(&render_tree(root)),
        None => out.push_str("  (empty)\n"),
    }
    out
}

fn source_label(mind_map: &MindMap) -> String {
    match (&mind_map.source, &mind_map.document_name) {
        (MindMapSource::Document, Some(name)) => format!("document: {}", name),
        (MindMapSource::Document, None) => "document".to_string(),
        (MindMapSource::Chat, _) => "chat".to_string(),
    }
}

pub fn render_chat_line(chat: &Chat, active: bool) -> String {
    format!(
        "{} {}  {}  ({} messages, {} mind-maps, updated {})",
        if active { "*" } else { " " },
        chat.id,
        chat.title,
        chat.messages.len(),
        chat.mind_maps.len(),
        chat.updated_at.format("%Y-%m-%d %H:%M"),
    )
}

pub fn render_map_line(mind_map: &MindMap, active: bool) -> String {
    let nodes = mind_map.root_node.as_ref().map_or(0, MindMapNode::node_count);
    format!(
        "{} {}  {}  ({} nodes, {})",
        if active { "*" } else { " " },
        mind_map.id,
        mind_map.title,
        nodes,
        source_label(mind_map),
    )
}

pub fn render_message(message: &Message) -> String {
    let who = match message.role {
        MessageRole::User => "você",
        MessageRole::Assistant => "assistente",
    };
    format!(
        "[{}] {}: {}",
        message.timestamp.format("%H:%M"),
        who,
        message.content
    )
}
