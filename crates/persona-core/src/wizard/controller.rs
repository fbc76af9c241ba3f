use std::sync::Arc;
use std::time::Instant;

use super::in_flight::{BusyFlag, InFlight};
use crate::form::{ContentChannel, FormData, FormField, FormPatch};
use crate::generator::PersonaGenerator;
use crate::persona::GeneratedPersona;
use crate::step::Step;

/// Shown when a required field is blank at generation time.
pub const VALIDATION_MESSAGE: &str =
    "Por favor, preencha os campos obrigatórios (Cargo e Descrição do Produto) antes de gerar.";

const GENERATION_FAILURE_PREFIX: &str =
    "Ocorreu um erro ao gerar a persona. Verifique sua conexão e tente novamente. Detalhes: ";

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    /// Filling in one of the four questionnaire steps
    Step(Step),
    /// A persona has been generated; the questionnaire is no longer shown
    Result,
}

/// What a call to [`WizardController::generate`] ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// A persona is now available
    Generated,
    /// A required field was blank; no request was made
    Rejected,
    /// The generation client failed; the error message is set
    Failed,
}

/// Owns the questionnaire state and drives the four-step flow.
///
/// The controller is the only writer of [`FormData`]. `next`/`back` move
/// exactly one step and are no-ops at the bounds. A successful
/// [`generate`](Self::generate) stores the persona, which switches the phase
/// to [`WizardPhase::Result`] until [`reset`](Self::reset).
pub struct WizardController {
    generator: Arc<dyn PersonaGenerator>,
    current_step_index: usize,
    form_data: FormData,
    generated_persona: Option<GeneratedPersona>,
    is_generating: BusyFlag,
    error: Option<String>,
}

impl WizardController {
    pub fn new(generator: Arc<dyn PersonaGenerator>) -> Self {
        Self {
            generator,
            current_step_index: 0,
            form_data: FormData::default(),
            generated_persona: None,
            is_generating: BusyFlag::default(),
            error: None,
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn current_step(&self) -> Step {
        // The index is kept within bounds by next/back/reset.
        Step::at(self.current_step_index).unwrap_or(Step::Demographics)
    }

    pub fn phase(&self) -> WizardPhase {
        if self.generated_persona.is_some() {
            WizardPhase::Result
        } else {
            WizardPhase::Step(self.current_step())
        }
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    pub fn generated_persona(&self) -> Option<&GeneratedPersona> {
        self.generated_persona.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating.is_set()
    }

    /// Handle that reads `is_generating` while [`generate`](Self::generate)
    /// holds the controller.
    pub fn generating_flag(&self) -> BusyFlag {
        self.is_generating.clone()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    // ============================================================================
    // Form updates
    // ============================================================================

    /// Merges the given fields into the form. No validation happens here.
    pub fn update_field(&mut self, patch: FormPatch) {
        self.form_data.merge(patch);
    }

    /// Sets a single text field.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form_data.set(field, value);
    }

    /// Adds the channel if absent, removes it if present.
    pub fn toggle_channel(&mut self, channel: ContentChannel) {
        self.form_data.toggle_channel(channel);
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    /// Moves one step forward; no-op on the last step.
    pub fn next(&mut self) {
        if self.current_step_index < Step::COUNT - 1 {
            self.current_step_index += 1;
        }
    }

    /// Moves one step back; no-op on the first step.
    pub fn back(&mut self) {
        if self.current_step_index > 0 {
            self.current_step_index -= 1;
        }
    }

    // ============================================================================
    // Generation
    // ============================================================================

    /// Validates the required fields and calls the generation client.
    ///
    /// `is_generating` is true for exactly the duration of the client call and
    /// is cleared even if this future is dropped mid-flight. Exclusive access
    /// (`&mut self`) rules out overlapping calls on one controller.
    pub async fn generate(&mut self) -> GenerateOutcome {
        let missing = self.form_data.missing_required();
        if !missing.is_empty() {
            tracing::debug!(?missing, "Generation rejected, required fields are blank");
            self.error = Some(VALIDATION_MESSAGE.to_string());
            return GenerateOutcome::Rejected;
        }

        self.error = None;
        let started = Instant::now();
        let result = {
            let _in_flight = InFlight::start(&self.is_generating);
            self.generator.generate(&self.form_data).await
        };

        match result {
            Ok(persona) => {
                tracing::info!(
                    model = self.generator.model(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    persona = %persona.name,
                    "Persona generated"
                );
                self.generated_persona = Some(persona);
                GenerateOutcome::Generated
            }
            Err(err) => {
                tracing::warn!(model = self.generator.model(), error = %err, "Persona generation failed");
                self.error = Some(format!("{GENERATION_FAILURE_PREFIX}{}", err.detail()));
                GenerateOutcome::Failed
            }
        }
    }

    /// Drops the result and starts over from an empty first step.
    pub fn reset(&mut self) {
        self.generated_persona = None;
        self.current_step_index = 0;
        self.form_data = FormData::default();
    }
}
