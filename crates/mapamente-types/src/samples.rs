use chrono::{DateTime, Duration, Utc};

use crate::{Chat, Message, MessageRole, MindMap, MindMapNode, MindMapSource};

fn message(id: &str, role: MessageRole, content: &str, at: DateTime<Utc>) -> Message {
    Message {
        id: id.to_string(),
        content: content.to_string(),
        role,
        timestamp: at,
    }
}

/// Built-in example chats, used when nothing usable is persisted.
///
/// Timestamps are relative to `now` so the samples always look recent.
pub fn sample_chats(now: DateTime<Utc>) -> Vec<Chat> {
    let ago = |millis: i64| now - Duration::milliseconds(millis);

    let ai_map = MindMap {
        id: "1001".to_string(),
        title: "Conceitos básicos de IA".to_string(),
        root_node: Some(MindMapNode::branch(
            "r1",
            "Inteligência Artificial",
            vec![
                MindMapNode::branch(
                    "c1",
                    "Machine Learning",
                    vec![
                        MindMapNode::leaf("c1-1", "Aprendizado Supervisionado"),
                        MindMapNode::leaf("c1-2", "Aprendizado Não-Supervisionado"),
                    ],
                ),
                MindMapNode::branch(
                    "c2",
                    "Deep Learning",
                    vec![MindMapNode::leaf("c2-1", "Redes Neurais")],
                ),
                MindMapNode::branch(
                    "c3",
                    "NLP",
                    vec![MindMapNode::leaf("c3-1", "Processamento de Linguagem Natural")],
                ),
            ],
        )),
        created_at: ago(3_520_000),
        updated_at: ago(3_520_000),
        source: MindMapSource::Chat,
        document_name: None,
    };

    vec![
        Chat {
            id: "1".to_string(),
            title: "Introdução à Inteligência Artificial".to_string(),
            messages: vec![
                message(
                    "101",
                    MessageRole::User,
                    "Preciso de um mapa mental sobre conceitos básicos de IA",
                    ago(3_600_000),
                ),
                message(
                    "102",
                    MessageRole::Assistant,
                    "Claro! Vou criar um mapa mental sobre os conceitos básicos de Inteligência Artificial. Quais tópicos específicos você gostaria de incluir?",
                    ago(3_580_000),
                ),
                message(
                    "103",
                    MessageRole::User,
                    "Machine Learning, Deep Learning, NLP e aplicações práticas",
                    ago(3_540_000),
                ),
                message(
                    "104",
                    MessageRole::Assistant,
                    "Ótimo! Criei um mapa mental abrangendo Machine Learning, Deep Learning, NLP e aplicações práticas da IA. Você pode visualizá-lo e fazer download agora.",
                    ago(3_520_000),
                ),
            ],
            created_at: ago(3_600_000),
            updated_at: ago(3_520_000),
            mind_maps: vec![ai_map],
        },
        Chat {
            id: "2".to_string(),
            title: "Desenvolvimento Sustentável".to_string(),
            messages: vec![
                message(
                    "201",
                    MessageRole::User,
                    "Quero um mapa mental sobre ODS - Objetivos de Desenvolvimento Sustentável",
                    ago(86_400_000),
                ),
                message(
                    "202",
                    MessageRole::Assistant,
                    "Com certeza! Os Objetivos de Desenvolvimento Sustentável (ODS) são 17 metas globais estabelecidas pela ONU. Gostaria que o mapa mental abordasse todos eles ou algum específico?",
                    ago(86_380_000),
                ),
            ],
            created_at: ago(86_400_000),
            updated_at: ago(86_380_000),
            mind_maps: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape() {
        let chats = sample_chats(Utc::now());
        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].messages.len(), 4);
        assert_eq!(chats[0].mind_maps.len(), 1);
        assert!(chats[1].mind_maps.is_empty());
        assert!(chats.iter().all(|c| c.mind_maps.iter().all(|m| m.root_node.is_some())));
    }

    #[test]
    fn test_sample_messages_in_order() {
        let chats = sample_chats(Utc::now());
        for chat in &chats {
            assert!(chat.messages.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        }
    }
}
