//! Application layer for Persona Architect.
//!
//! This crate wires the domain wizard to concrete collaborators and owns the
//! switch between the questionnaire and the result view.

pub mod persona_session;
pub mod session_factory;

pub use persona_session::{PersonaSession, SessionView, RESULT_ALREADY_SHOWN};
pub use session_factory::{SessionFactory, SessionOptions, SessionSettings};
