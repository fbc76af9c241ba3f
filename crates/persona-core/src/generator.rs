//! Generation client contract.

use crate::error::GenerationError;
use crate::form::FormData;
use crate::persona::GeneratedPersona;

/// Produces a persona from the accumulated questionnaire answers.
///
/// One call is one outbound request: no caching, no retry. Implementations
/// must never return a partially filled persona; any shape mismatch in the
/// service payload is a [`GenerationError`].
#[async_trait::async_trait]
pub trait PersonaGenerator: Send + Sync {
    /// Name of the backing model, for logs.
    fn model(&self) -> &str;

    async fn generate(&self, data: &FormData) -> Result<GeneratedPersona, GenerationError>;
}
