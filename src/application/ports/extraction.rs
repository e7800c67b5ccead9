//! Plan extraction port interface

use async_trait::async_trait;

use crate::domain::pipeline::ExtractionError;
use crate::domain::plan::PlanRecord;

/// Port for the remote plan extraction service.
///
/// Implementations validate each candidate in the response
/// independently and drop invalid ones; a partially malformed response
/// is not a failure (skip-and-continue). `MalformedResponse` is
/// reserved for a response that cannot be decoded at all.
#[async_trait]
pub trait ExtractionClient: Send + Sync {
    /// Extract structured plans from recognized text.
    ///
    /// # Arguments
    /// * `text` - The recognized text
    /// * `token` - Auth token; the caller guarantees presence
    /// * `timezone` - IANA timezone the service localizes timestamps to
    async fn extract(
        &self,
        text: &str,
        token: &str,
        timezone: &str,
    ) -> Result<Vec<PlanRecord>, ExtractionError>;
}

/// Blanket implementation for boxed extraction clients
#[async_trait]
impl ExtractionClient for Box<dyn ExtractionClient> {
    async fn extract(
        &self,
        text: &str,
        token: &str,
        timezone: &str,
    ) -> Result<Vec<PlanRecord>, ExtractionError> {
        self.as_ref().extract(text, token, timezone).await
    }
}
