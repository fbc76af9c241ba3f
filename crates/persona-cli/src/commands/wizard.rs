//! Interactive terminal wizard.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use persona_application::{PersonaSession, SessionFactory, SessionOptions};
use persona_core::form::{CHANNELS_LABEL, SelectOption};
use persona_core::wizard::{DownloadOutcome, GenerateOutcome};
use persona_core::{ContentChannel, FormField};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::render;

type WizardEditor = Editor<WizardHelper, DefaultHistory>;

/// rustyline helper: shows the field placeholder as a hint and completes
/// select-list values.
#[derive(Default)]
struct WizardHelper {
    placeholder: Option<&'static str>,
    options: Vec<&'static str>,
}

impl WizardHelper {
    fn prepare(&mut self, placeholder: Option<&'static str>, options: &[SelectOption]) {
        self.placeholder = placeholder;
        self.options = options.iter().map(|option| option.value).collect();
    }
}

impl Helper for WizardHelper {}

impl Completer for WizardHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let candidates = self
            .options
            .iter()
            .filter(|value| value.starts_with(line))
            .map(|value| Pair {
                display: value.to_string(),
                replacement: value.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for WizardHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Borrowed(line)
    }
}

impl Hinter for WizardHelper {
    type Hint = String;

    fn hint(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if line.is_empty() {
            self.placeholder.map(|p| format!("ex: {p}"))
        } else {
            None
        }
    }
}

impl Validator for WizardHelper {}

enum Flow {
    Continue,
    Quit,
}

/// Reads one line; `None` on Ctrl-C / Ctrl-D.
fn read(rl: &mut WizardEditor, prompt: &str, initial: &str) -> Result<Option<String>> {
    match rl.readline_with_initial(prompt, (initial, "")) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// A 1-based option number picks that option's value; anything else is kept
/// as free text.
pub(crate) fn resolve_select(input: &str, options: &[SelectOption]) -> String {
    let trimmed = input.trim();
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .map(|option| option.value.to_string())
        .unwrap_or_else(|| input.to_string())
}

/// Parses `"1 3,5"` into channels by their 1-based position in the list.
pub(crate) fn parse_channel_toggles(input: &str) -> std::result::Result<Vec<ContentChannel>, String> {
    let channels = ContentChannel::all();
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| channels.get(i).copied())
                .ok_or_else(|| format!("Opção inválida: {token}"))
        })
        .collect()
}

fn ask_field(rl: &mut WizardEditor, field: FormField, current: &str) -> Result<Option<String>> {
    let options = field.options().unwrap_or(&[]);
    for (i, option) in options.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).cyan(), option.label);
    }
    if let Some(helper) = rl.helper_mut() {
        helper.prepare(Some(field.placeholder()), options);
    }

    let marker = if field.is_required() { " *" } else { "" };
    let prompt = format!("{}{}: ", field.label(), marker);
    let answer = read(rl, &prompt, current)?;
    Ok(answer.map(|line| resolve_select(&line, options)))
}

/// Returns `false` when the user quits.
fn ask_channels(rl: &mut WizardEditor, session: &mut PersonaSession) -> Result<bool> {
    if let Some(helper) = rl.helper_mut() {
        helper.prepare(None, &[]);
    }

    loop {
        let Some(controller) = session.wizard_mut() else {
            return Ok(true);
        };
        println!("{}", CHANNELS_LABEL.bold());
        for (i, channel) in ContentChannel::all().into_iter().enumerate() {
            let mark = if controller.form_data().has_channel(channel) {
                "[x]".green()
            } else {
                "[ ]".bright_black()
            };
            println!("  {:>2}. {} {}", i + 1, mark, channel.label());
        }

        let Some(line) = read(rl, "Números para marcar/desmarcar (Enter continua): ", "")? else {
            return Ok(false);
        };
        if line.trim().is_empty() {
            return Ok(true);
        }
        match parse_channel_toggles(&line) {
            Ok(channels) => {
                for channel in channels {
                    controller.toggle_channel(channel);
                }
            }
            Err(message) => render::error(&message),
        }
    }
}

async fn generate(session: &mut PersonaSession) {
    println!(
        "{}",
        format!("Gerando persona com {}...", session.controller().model()).yellow()
    );

    match session.generate().await {
        Ok(GenerateOutcome::Generated) => {}
        // The controller error is shown with the step.
        Ok(GenerateOutcome::Rejected | GenerateOutcome::Failed) => {}
        Err(err) => render::error(&err.to_string()),
    }
}

async fn wizard_step(rl: &mut WizardEditor, session: &mut PersonaSession) -> Result<Flow> {
    let Some(controller) = session.wizard_mut() else {
        return Ok(Flow::Continue);
    };
    let step = controller.current_step();
    render::step_header(step);
    if let Some(error) = controller.error() {
        render::error(error);
    }

    for field in step.fields() {
        let current = controller.form_data().get(*field).to_string();
        let Some(value) = ask_field(rl, *field, &current)? else {
            return Ok(Flow::Quit);
        };
        controller.set_field(*field, value);
    }

    if step.has_channels() && !ask_channels(rl, session)? {
        return Ok(Flow::Quit);
    }

    if let Some(helper) = rl.helper_mut() {
        helper.prepare(None, &[]);
    }
    let menu = match step {
        s if s.is_last() => "[Enter/g] gerar persona  [v] voltar  [q] sair",
        s if s.is_first() => "[Enter] próxima  [q] sair",
        _ => "[Enter] próxima  [v] voltar  [q] sair",
    };
    println!("{}", menu.bright_black());
    let Some(choice) = read(rl, "> ", "")? else {
        return Ok(Flow::Quit);
    };

    let Some(controller) = session.wizard_mut() else {
        return Ok(Flow::Continue);
    };
    match choice.trim() {
        "q" => return Ok(Flow::Quit),
        "v" => controller.back(),
        "" | "g" if step.is_last() => generate(session).await,
        "" => controller.next(),
        other => render::error(&format!("Opção inválida: {other}")),
    }
    Ok(Flow::Continue)
}

async fn result_screen(rl: &mut WizardEditor, session: &mut PersonaSession) -> Result<Flow> {
    if let Some(presenter) = session.presenter() {
        render::persona_view(presenter.view());
    }

    loop {
        println!(
            "{}",
            "[d] baixar PDF  [n] nova persona  [q] sair".bright_black()
        );
        let Some(choice) = read(rl, "> ", "")? else {
            return Ok(Flow::Quit);
        };

        match choice.trim() {
            "d" => match session.download().await {
                Some(DownloadOutcome::Saved(path)) => {
                    println!("{}", format!("PDF salvo em {}", path.display()).green());
                }
                Some(DownloadOutcome::Printed(text)) => {
                    println!("{text}");
                    println!(
                        "{}",
                        "Exportação em PDF indisponível; a persona foi impressa acima.".yellow()
                    );
                }
                Some(DownloadOutcome::Failed { alert, detail }) => {
                    render::error(alert);
                    println!("{}", detail.bright_black());
                }
                None => {}
            },
            "n" => {
                session.start_over();
                return Ok(Flow::Continue);
            }
            "q" => return Ok(Flow::Quit),
            other => render::error(&format!("Opção inválida: {other}")),
        }
    }
}

pub async fn run(options: SessionOptions) -> Result<()> {
    let factory = SessionFactory::new(options);
    let (mut session, settings) = factory.create_session().await?;

    let mut rl: WizardEditor = Editor::new()?;
    rl.set_helper(Some(WizardHelper::default()));

    println!("{}", "=== Persona Architect ===".bright_magenta().bold());
    println!(
        "{}",
        "Responda às perguntas; Enter mantém o valor atual, Ctrl-D sai.".bright_black()
    );
    if !settings.has_credential {
        println!(
            "{}",
            "Nenhuma chave de API encontrada (GEMINI_API_KEY ou API_KEY); a geração vai falhar."
                .yellow()
        );
    }

    loop {
        let flow = if session.is_showing_result() {
            result_screen(&mut rl, &mut session).await?
        } else {
            wizard_step(&mut rl, &mut session).await?
        };
        if let Flow::Quit = flow {
            println!("{}", "Até logo!".bright_green());
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_core::error::Result as PersonaResult;
    use persona_core::export::{DocumentExporter, ExportOptions};
    use persona_core::form::COMPANY_SIZE_OPTIONS;
    use persona_core::persona::PersonaView;
    use persona_core::{FormData, FormField, GeneratedPersona, GenerationError, PersonaGenerator};
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Slow client that always fails once it answers.
    #[derive(Default)]
    struct SlowFailingGenerator {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl PersonaGenerator for SlowFailingGenerator {
        fn model(&self) -> &str {
            "slow"
        }

        async fn generate(&self, _data: &FormData) -> Result<GeneratedPersona, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            Err(GenerationError::request("timeout"))
        }
    }

    struct NoExporter;

    #[async_trait::async_trait]
    impl DocumentExporter for NoExporter {
        fn is_available(&self) -> bool {
            false
        }

        async fn export(
            &self,
            _view: &PersonaView,
            file_name: &str,
            _options: &ExportOptions,
        ) -> PersonaResult<PathBuf> {
            Ok(PathBuf::from(file_name))
        }
    }

    #[tokio::test]
    async fn test_generate_runs_to_completion_and_keeps_error() {
        let generator = Arc::new(SlowFailingGenerator::default());
        let mut session = PersonaSession::new(generator.clone(), Arc::new(NoExporter));
        let wizard = session.wizard_mut().unwrap();
        wizard.set_field(FormField::Role, "CTO");
        wizard.set_field(FormField::ProductDescription, "CRM");

        generate(&mut session).await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        let error = session.controller().error().unwrap();
        assert!(error.contains("timeout"), "{error}");
        assert!(!session.controller().is_generating());
        assert!(!session.is_showing_result());
    }

    #[test]
    fn test_select_number_picks_stored_value() {
        assert_eq!(
            resolve_select("3", COMPANY_SIZE_OPTIONS),
            "51-200 (Média) - Múltiplos decisores"
        );
    }

    #[test]
    fn test_select_out_of_range_or_text_is_free_text() {
        assert_eq!(resolve_select("0", COMPANY_SIZE_OPTIONS), "0");
        assert_eq!(resolve_select("9", COMPANY_SIZE_OPTIONS), "9");
        assert_eq!(resolve_select("Startup", COMPANY_SIZE_OPTIONS), "Startup");
        assert_eq!(resolve_select("2", &[]), "2");
    }

    #[test]
    fn test_channel_toggles_by_position() {
        assert_eq!(
            parse_channel_toggles("1, 4 5").unwrap(),
            vec![
                ContentChannel::LinkedIn,
                ContentChannel::YouTube,
                ContentChannel::Podcasts
            ]
        );
        assert!(parse_channel_toggles("").unwrap().is_empty());
    }

    #[test]
    fn test_channel_toggle_rejects_unknown_positions() {
        assert!(parse_channel_toggles("11").is_err());
        assert!(parse_channel_toggles("0").is_err());
        assert!(parse_channel_toggles("linkedin").is_err());
    }
}
