use std::path::PathBuf;
use std::sync::Arc;

use super::controller::WizardController;
use super::in_flight::{BusyFlag, InFlight};
use crate::export::{DocumentExporter, ExportOptions, export_file_name};
use crate::persona::{GeneratedPersona, PersonaView};

/// Shown when the document export fails.
pub const EXPORT_FAILURE_ALERT: &str = "Houve um erro ao gerar o arquivo. Tente novamente ou use a opção de imprimir (a persona é exibida no terminal).";

/// Called when the user asks for a new persona.
pub type ResetHook = Box<dyn FnOnce(&mut WizardController) + Send>;

/// What a call to [`ResultPresenter::download`] ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The document was written to this path
    Saved(PathBuf),
    /// The exporter is unavailable; this is the full view to print instead
    Printed(String),
    /// The export failed; `alert` must be surfaced to the user
    Failed { alert: &'static str, detail: String },
}

/// Read-only display of a generated persona with document export.
pub struct ResultPresenter {
    persona: GeneratedPersona,
    view: PersonaView,
    exporter: Arc<dyn DocumentExporter>,
    options: ExportOptions,
    is_downloading: BusyFlag,
    on_reset: ResetHook,
}

impl ResultPresenter {
    /// Creates a presenter whose reset hands control back to
    /// [`WizardController::reset`].
    pub fn new(persona: GeneratedPersona, exporter: Arc<dyn DocumentExporter>) -> Self {
        Self::with_reset_hook(persona, exporter, Box::new(WizardController::reset))
    }

    pub fn with_reset_hook(
        persona: GeneratedPersona,
        exporter: Arc<dyn DocumentExporter>,
        on_reset: ResetHook,
    ) -> Self {
        let view = PersonaView::new(&persona);
        Self {
            persona,
            view,
            exporter,
            options: ExportOptions::STANDARD,
            is_downloading: BusyFlag::default(),
            on_reset,
        }
    }

    pub fn persona(&self) -> &GeneratedPersona {
        &self.persona
    }

    pub fn view(&self) -> &PersonaView {
        &self.view
    }

    pub fn is_downloading(&self) -> bool {
        self.is_downloading.is_set()
    }

    /// Handle that reads `is_downloading` while [`download`](Self::download) runs.
    pub fn downloading_flag(&self) -> BusyFlag {
        self.is_downloading.clone()
    }

    /// Name the exported document will get.
    pub fn file_name(&self) -> String {
        export_file_name(&self.persona.name)
    }

    /// Exports the displayed view as a portable document.
    ///
    /// Falls back to returning the printable view when the exporter is
    /// unavailable. `is_downloading` is set only while the export runs.
    pub async fn download(&mut self) -> DownloadOutcome {
        if !self.exporter.is_available() {
            tracing::warn!("Document exporter unavailable, falling back to print");
            return DownloadOutcome::Printed(self.view.to_plain_text());
        }

        let file_name = self.file_name();
        let result = {
            let _in_flight = InFlight::start(&self.is_downloading);
            self.exporter
                .export(&self.view, &file_name, &self.options)
                .await
        };

        match result {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Persona document exported");
                DownloadOutcome::Saved(path)
            }
            Err(err) => {
                tracing::error!(error = %err, "Persona document export failed");
                DownloadOutcome::Failed {
                    alert: EXPORT_FAILURE_ALERT,
                    detail: err.to_string(),
                }
            }
        }
    }

    /// Discards this result and runs the reset hook on the controller.
    pub fn reset(self, controller: &mut WizardController) {
        (self.on_reset)(controller);
    }
}
