//! Generation service integration.
//!
//! - `prompt`: renders the fixed system instruction and user prompt
//! - `schema`: the structured-output schema the service must satisfy
//! - `gemini_persona_generator`: the [`persona_core::PersonaGenerator`] backed by Gemini

pub mod gemini_persona_generator;
pub mod prompt;
pub mod schema;

pub use gemini_persona_generator::GeminiPersonaGenerator;
pub use prompt::{PromptBuilder, RenderedPrompt};
pub use schema::persona_response_schema;
