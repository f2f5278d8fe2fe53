use async_trait::async_trait;

use crate::error::GenerationError;

/// Receives generation failures that were replaced by the fallback tree.
///
/// Reporting must not fail; implementations swallow their own errors.
#[async_trait]
pub trait DiagnosticsSink: Send + Sync {
    async fn generation_failed(&self, text: &str, error: &GenerationError);
}

/// Drops every report
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

#[async_trait]
impl DiagnosticsSink for NoopDiagnostics {
    async fn generation_failed(&self, _text: &str, _error: &GenerationError) {}
}
