//! Persona domain module.
//!
//! - `model`: the generated persona (`GeneratedPersona`, `Demographics`)
//! - `view`: the read-only renderable layout of a persona (`PersonaView`)

mod model;
mod view;

#[cfg(test)]
pub(crate) use model::fixtures;
pub use model::{Demographics, GeneratedPersona};
pub use view::{PersonaHeader, PersonaView, SectionBody, ViewSection};
