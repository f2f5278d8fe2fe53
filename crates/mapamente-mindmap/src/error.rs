use thiserror::Error;

/// Why a generation attempt produced no usable tree
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Completion failed: {0:#}")]
    Completion(anyhow::Error),

    #[error("Reply has no [JSON-MAPA-MENTAL] block")]
    MissingMarkers,

    #[error("Malformed mind-map JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}
