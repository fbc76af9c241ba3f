//! Wizard domain module.
//!
//! # Module Structure
//!
//! - `controller`: the four-step questionnaire state machine (`WizardController`)
//! - `presenter`: read-only display and export of a generated persona (`ResultPresenter`)
//!
//! # Usage
//!
//! ```ignore
//! use persona_core::wizard::{WizardController, WizardPhase, GenerateOutcome};
//! use persona_core::wizard::{ResultPresenter, DownloadOutcome};
//! ```

mod controller;
mod in_flight;
mod presenter;


// Re-export public API
pub use in_flight::BusyFlag;
pub use controller::{GenerateOutcome, VALIDATION_MESSAGE, WizardController, WizardPhase};
pub use presenter::{DownloadOutcome, EXPORT_FAILURE_ALERT, ResetHook, ResultPresenter};
