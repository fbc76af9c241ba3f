//! Top-level view switcher.
//!
//! A `PersonaSession` shows either the questionnaire ([`WizardController`]) or,
//! after a successful generation, the result ([`ResultPresenter`]). Starting
//! over runs the presenter's reset hook on the controller.

use std::sync::Arc;

use persona_core::error::{PersonaError, Result};
use persona_core::export::DocumentExporter;
use persona_core::generator::PersonaGenerator;
use persona_core::wizard::{DownloadOutcome, GenerateOutcome, ResultPresenter, WizardController};

/// Returned when generation is requested while a result is displayed.
pub const RESULT_ALREADY_SHOWN: &str =
    "Uma persona já está sendo exibida. Crie uma nova antes de gerar outra.";

/// Which of the two screens is active.
pub enum SessionView<'a> {
    Wizard(&'a WizardController),
    Result(&'a ResultPresenter),
}

pub struct PersonaSession {
    controller: WizardController,
    presenter: Option<ResultPresenter>,
    exporter: Arc<dyn DocumentExporter>,
}

impl PersonaSession {
    pub fn new(generator: Arc<dyn PersonaGenerator>, exporter: Arc<dyn DocumentExporter>) -> Self {
        Self {
            controller: WizardController::new(generator),
            presenter: None,
            exporter,
        }
    }

    pub fn view(&self) -> SessionView<'_> {
        match &self.presenter {
            Some(presenter) => SessionView::Result(presenter),
            None => SessionView::Wizard(&self.controller),
        }
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    /// The questionnaire, editable only while no result is displayed.
    pub fn wizard_mut(&mut self) -> Option<&mut WizardController> {
        if self.presenter.is_some() {
            None
        } else {
            Some(&mut self.controller)
        }
    }

    pub fn presenter(&self) -> Option<&ResultPresenter> {
        self.presenter.as_ref()
    }

    pub fn is_showing_result(&self) -> bool {
        self.presenter.is_some()
    }

    /// Runs the controller's generation and switches to the result view on
    /// success.
    ///
    /// # Errors
    ///
    /// `PersonaError::Validation` with [`RESULT_ALREADY_SHOWN`] while a result
    /// is displayed; no request is made.
    pub async fn generate(&mut self) -> Result<GenerateOutcome> {
        if self.presenter.is_some() {
            return Err(PersonaError::Validation(RESULT_ALREADY_SHOWN.to_string()));
        }

        let outcome = self.controller.generate().await;
        if outcome == GenerateOutcome::Generated {
            if let Some(persona) = self.controller.generated_persona() {
                self.presenter = Some(ResultPresenter::new(persona.clone(), self.exporter.clone()));
            }
        }
        Ok(outcome)
    }

    /// Exports the displayed persona. `None` when no result is displayed.
    pub async fn download(&mut self) -> Option<DownloadOutcome> {
        match self.presenter.as_mut() {
            Some(presenter) => Some(presenter.download().await),
            None => None,
        }
    }

    /// Leaves the result view and resets the questionnaire.
    pub fn start_over(&mut self) {
        if let Some(presenter) = self.presenter.take() {
            presenter.reset(&mut self.controller);
            tracing::debug!("Session reset to the first step");
        }
    }
}
