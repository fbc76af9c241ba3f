//! Domain layer for Persona Architect.
//!
//! A four-step questionnaire collects marketing-research answers
//! ([`form::FormData`]); the [`wizard::WizardController`] sends them to a
//! [`generator::PersonaGenerator`] and the resulting
//! [`persona::GeneratedPersona`] is shown and exported by the
//! [`wizard::ResultPresenter`].

pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod generator;
pub mod persona;
pub mod secret;
pub mod step;
pub mod wizard;

// Re-export common types
pub use error::{GenerationError, PersonaError};
pub use form::{ContentChannel, FormData, FormField, FormPatch};
pub use generator::PersonaGenerator;
pub use persona::GeneratedPersona;
pub use step::Step;
