pub mod generate;
pub mod options;
pub mod schema;
pub mod wizard;
