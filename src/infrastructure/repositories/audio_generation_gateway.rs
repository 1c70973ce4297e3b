use crate::domain::audio::{GenerationRequestItem, GenerationResultItem};
use async_trait::async_trait;

/// Client for the external service that turns quiz text into audio clips.
///
/// Implementations are responsible for:
/// - Sending the whole batch in one exchange
/// - Returning whatever results the service produced, in any order
///
/// Returning fewer results than requested is not an error. Transport
/// failures, non-success responses and undecodable bodies are.
#[async_trait]
pub trait AudioGenerationGateway: Send + Sync {
    async fn generate(
        &self,
        items: &[GenerationRequestItem],
    ) -> Result<Vec<GenerationResultItem>, String>;
}
