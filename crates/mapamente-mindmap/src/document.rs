//! Text extraction from uploaded documents.

use std::fmt;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Unsupported document type: {0}")]
    Unsupported(String),

    #[error("Text extraction from {0} documents is not available")]
    ExtractionUnavailable(DocumentKind),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

/// Document formats accepted for mind-map generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Doc,
    Docx,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [Self::PlainText, Self::Pdf, Self::Doc, Self::Docx];

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Pdf => "application/pdf",
            Self::Doc => "application/msword",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.mime_type() == mime)
    }

    /// Guess from the file extension, case-insensitively
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PlainText => "plain text",
            Self::Pdf => "PDF",
            Self::Doc => "DOC",
            Self::Docx => "DOCX",
        };
        f.write_str(name)
    }
}

pub fn is_supported(mime: &str) -> bool {
    DocumentKind::from_mime(mime).is_some()
}

/// Read the text of a document, inferring its kind from the extension.
pub async fn extract_text(path: &Path) -> Result<String, DocumentError> {
    let kind = DocumentKind::from_path(path)
        .ok_or_else(|| DocumentError::Unsupported(path.display().to_string()))?;
    extract_text_as(path, kind).await
}

pub async fn extract_text_as(path: &Path, kind: DocumentKind) -> Result<String, DocumentError> {
    match kind {
        DocumentKind::PlainText => {
            let text = tokio::fs::read_to_string(path).await?;
            tracing::debug!(path = %path.display(), chars = text.len(), "read plain-text document");
            Ok(text)
        }
        other => Err(DocumentError::ExtractionUnavailable(other)),
    }
}
