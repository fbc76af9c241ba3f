//! Non-interactive generation from an answers file.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use persona_application::{SessionFactory, SessionOptions};
use persona_core::wizard::{DownloadOutcome, GenerateOutcome};
use persona_core::{FormData, FormPatch};

use crate::render;

/// Reads questionnaire answers; `.toml` files are TOML, anything else JSON.
pub(crate) async fn load_answers(path: &Path) -> Result<FormData> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read answers file {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let data = if is_toml {
        toml::from_str(&content).with_context(|| format!("Invalid TOML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?
    };
    Ok(data)
}

pub async fn run(
    options: SessionOptions,
    answers: &Path,
    export_pdf: bool,
    json: bool,
) -> Result<()> {
    let data = load_answers(answers).await?;
    let factory = SessionFactory::new(options);
    let (mut session, settings) = factory.create_session().await?;

    let wizard = session
        .wizard_mut()
        .ok_or_else(|| anyhow!("Session unexpectedly started on the result view"))?;
    wizard.update_field(FormPatch::from(data));

    eprintln!(
        "{}",
        format!("Gerando persona com {}...", settings.model).yellow()
    );
    match session.generate().await? {
        GenerateOutcome::Generated => {}
        GenerateOutcome::Rejected | GenerateOutcome::Failed => {
            let message = session.controller().error().unwrap_or_default().to_string();
            bail!(message);
        }
    }

    let presenter = session
        .presenter()
        .ok_or_else(|| anyhow!("No persona to show after generation"))?;
    if json {
        println!("{}", serde_json::to_string_pretty(presenter.persona())?);
    } else {
        render::persona_view(presenter.view());
    }

    if !export_pdf {
        return Ok(());
    }
    match session.download().await {
        Some(DownloadOutcome::Saved(path)) => {
            eprintln!("{}", format!("PDF salvo em {}", path.display()).green());
        }
        Some(DownloadOutcome::Printed(_)) => {
            eprintln!(
                "{}",
                format!(
                    "Diretório de saída {} indisponível; PDF não gerado.",
                    settings.output_dir.display()
                )
                .yellow()
            );
        }
        Some(DownloadOutcome::Failed { alert, detail }) => bail!("{alert} ({detail})"),
        None => {}
    }
    Ok(())
}
