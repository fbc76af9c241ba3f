//! Questionnaire domain module.
//!
//! - `model`: the accumulated answers (`FormData`) and partial updates (`FormPatch`)
//! - `field`: text field identifiers with labels and placeholders
//! - `options`: fixed option lists (content channels, company size, knowledge level)

mod field;
mod model;
mod options;

pub use field::FormField;
pub use model::{FormData, FormPatch};
pub use options::{
    CHANNELS_LABEL, COMPANY_SIZE_OPTIONS, ContentChannel, KNOWLEDGE_LEVEL_OPTIONS, SelectOption,
};
