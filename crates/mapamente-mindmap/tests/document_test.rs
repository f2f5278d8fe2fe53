use std::path::Path;

use mapamente_mindmap::{extract_text, DocumentError, DocumentKind};

#[tokio::test]
async fn test_extract_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resumo.txt");
    std::fs::write(&path, "Ciclo da água\nevaporação, condensação").unwrap();

    let text = extract_text(&path).await.unwrap();
    assert_eq!(text, "Ciclo da água\nevaporação, condensação");
}

#[tokio::test]
async fn test_pdf_extraction_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("artigo.pdf");
    std::fs::write(&path, b"%PDF-1.4").unwrap();

    assert!(matches!(
        extract_text(&path).await,
        Err(DocumentError::ExtractionUnavailable(DocumentKind::Pdf))
    ));
}

#[tokio::test]
async fn test_unknown_extension_unsupported() {
    assert!(matches!(
        extract_text(Path::new("foto.png")).await,
        Err(DocumentError::Unsupported(_))
    ));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        extract_text(&dir.path().join("sumiu.txt")).await,
        Err(DocumentError::Io(_))
    ));
}
