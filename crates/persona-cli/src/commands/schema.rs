use anyhow::{Context, Result};
use persona_interaction::persona_response_schema;

pub fn run() -> Result<()> {
    let schema = serde_json::to_string_pretty(&persona_response_schema())
        .context("Failed to serialize response schema")?;
    println!("{schema}");
    Ok(())
}
