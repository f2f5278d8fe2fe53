use crate::types::{Message, Role};

pub const DEFAULT_ASSISTANT_PROMPT: &str =
    "Você é um assistente útil e sempre responde em português. Use uma linguagem clara e direta.";

/// Prepend the default assistant instructions unless the conversation
/// already carries a system message.
pub fn with_default_system_prompt(messages: Vec<Message>) -> Vec<Message> {
    if messages.iter().any(|m| m.role() == Role::System) {
        return messages;
    }

    let mut out = Vec::with_capacity(messages.len() + 1);
    out.push(Message::system(DEFAULT_ASSISTANT_PROMPT));
    out.extend(messages);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_when_missing() {
        let messages = with_default_system_prompt(vec![Message::human("Oi")]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::system(DEFAULT_ASSISTANT_PROMPT));
    }

    #[test]
    fn test_keeps_existing_system() {
        let input = vec![Message::human("Oi"), Message::system("custom")];
        let messages = with_default_system_prompt(input.clone());
        assert_eq!(messages, input);
    }
}
