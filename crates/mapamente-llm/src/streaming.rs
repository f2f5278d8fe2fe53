use std::collections::VecDeque;
use std::pin::Pin;
use anyhow::Result;
use futures::{Stream, StreamExt};
use reqwest::Response;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    Message {
        content: String,
    },

    Done {
        #[serde(skip_serializing_if = "Option::is_none")]
        finish_reason: Option<String>,
    },
}

/// One line of an Ollama streaming reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatStreamChunk {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub message: Option<ChunkMessage>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl ChatStreamChunk {
    pub fn content(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.content.as_str())
    }

    fn to_stream_events(&self) -> Vec<StreamEvent> {
        let mut events = Vec::new();

        if let Some(content) = self.content() {
            if !content.is_empty() {
                events.push(StreamEvent::Message {
                    content: content.to_string(),
                });
            }
        }

        if self.done {
            events.push(StreamEvent::Done {
                finish_reason: self.done_reason.clone(),
            });
        }

        events
    }
}

/// Parse a single NDJSON line into stream events. Blank lines yield nothing.
pub fn parse_chunk_line(line: &str) -> Result<Vec<StreamEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let chunk: ChatStreamChunk = serde_json::from_str(line)
        .map_err(|e| anyhow::anyhow!("Failed to parse chat chunk: {}", e))?;
    Ok(chunk.to_stream_events())
}

pub fn parse_ndjson_stream(
    response: Response,
) -> Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>> {
    let stream = response.bytes_stream();

    Box::pin(async_stream::stream! {
        let mut byte_chunks = Box::pin(stream);
        let mut buffer = VecDeque::with_capacity(8192);
        let mut finished = false;

        while !finished {
            let Some(chunk_result) = byte_chunks.next().await else {
                break;
            };

            match chunk_result {
                Ok(bytes) => {
                    buffer.extend(bytes);

                    while let Some(newline_pos) = buffer.iter().position(|&b| b == b'\n') {
                        let line_bytes: Vec<u8> = buffer.drain(..=newline_pos).collect();

                        let Ok(line) = std::str::from_utf8(&line_bytes) else {
                            yield Err(anyhow::anyhow!("Stream chunk is not valid UTF-8"));
                            continue;
                        };

                        match parse_chunk_line(line) {
                            Ok(events) => {
                                for event in events {
                                    finished |= matches!(event, StreamEvent::Done { .. });
                                    yield Ok(event);
                                }
                            }
                            Err(e) => yield Err(e),
                        }

                        if finished {
                            break;
                        }
                    }
                }
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {}", e));
                    finished = true;
                }
            }
        }

        // trailing line without newline
        if !finished && !buffer.is_empty() {
            let rest: Vec<u8> = buffer.drain(..).collect();
            if let Ok(line) = std::str::from_utf8(&rest) {
                match parse_chunk_line(line) {
                    Ok(events) => {
                        for event in events {
                            yield Ok(event);
                        }
                    }
                    Err(e) => yield Err(e),
                }
            }
        }
    })
}
