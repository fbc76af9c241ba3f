//! Wires concrete collaborators into a [`PersonaSession`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use persona_core::config::AppConfig;
use persona_core::secret::SecretService;
use persona_infrastructure::{
    AppPaths, ConfigService, HttpAvatarSource, PdfExporter, SecretServiceImpl,
};
use persona_interaction::GeminiPersonaGenerator;

use crate::persona_session::PersonaSession;

const AVATAR_TIMEOUT: Duration = Duration::from_secs(10);

/// Command-line overrides.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Directory holding `config.toml` and `secret.json`
    pub config_dir: Option<PathBuf>,
    /// Explicit `config.toml` path; wins over `config_dir`
    pub config_file: Option<PathBuf>,
    /// Export directory; wins over `[export] output_dir`
    pub output_dir: Option<PathBuf>,
}

/// The effective settings after merging config, secrets and overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub model: String,
    pub temperature: f32,
    pub base_url: String,
    pub output_dir: PathBuf,
    pub has_credential: bool,
}

/// Factory for [`PersonaSession`] instances.
pub struct SessionFactory {
    config_service: ConfigService,
    secret_service: Arc<dyn SecretService>,
    output_dir: Option<PathBuf>,
}

impl SessionFactory {
    /// Creates a factory reading configuration and secrets from the locations
    /// named in `options`.
    pub fn new(options: SessionOptions) -> Self {
        let paths = AppPaths::new(options.config_dir.as_deref());
        let secret_service = Arc::new(SecretServiceImpl::new(options.config_dir.as_deref()));
        Self::with_secret_service(options, paths, secret_service)
    }

    /// # Arguments
    ///
    /// * `options` - Command-line overrides
    /// * `paths` - Where `config.toml` lives when no explicit file is given
    /// * `secret_service` - Credential source
    pub fn with_secret_service(
        options: SessionOptions,
        paths: AppPaths,
        secret_service: Arc<dyn SecretService>,
    ) -> Self {
        let config_service = match options.config_file {
            Some(file) => ConfigService::with_path(file),
            None => ConfigService::with_paths(paths),
        };
        Self {
            config_service,
            secret_service,
            output_dir: options.output_dir,
        }
    }

    pub fn config(&self) -> Result<AppConfig> {
        self.config_service
            .get_config()
            .context("Failed to load configuration")
    }

    /// Builds the generator from configuration and secrets.
    ///
    /// A missing API key is not an error: the generator is still created
    /// and fails on its first call.
    pub async fn generator(&self) -> Result<(GeminiPersonaGenerator, SessionSettings)> {
        let config = self.config()?;
        let secrets = self
            .secret_service
            .load_secrets()
            .await
            .context("Failed to load secrets")?;

        let model = secrets
            .gemini_model_override()
            .unwrap_or(&config.generation.model)
            .to_string();
        let api_key = secrets.gemini_api_key().map(str::to_string);

        let generator = GeminiPersonaGenerator::new(api_key)
            .with_model(model.clone())
            .with_base_url(config.generation.base_url.clone())
            .with_temperature(config.generation.temperature);

        let settings = SessionSettings {
            model,
            temperature: config.generation.temperature,
            base_url: config.generation.base_url,
            output_dir: self
                .output_dir
                .clone()
                .unwrap_or(config.export.output_dir),
            has_credential: generator.has_credential(),
        };
        Ok((generator, settings))
    }

    pub fn exporter(&self, output_dir: PathBuf) -> Result<PdfExporter> {
        let avatars = HttpAvatarSource::new(AVATAR_TIMEOUT)?;
        Ok(PdfExporter::new(output_dir, Arc::new(avatars)))
    }

    /// Creates a ready-to-use session.
    pub async fn create_session(&self) -> Result<(PersonaSession, SessionSettings)> {
        let (generator, settings) = self.generator().await?;
        let exporter = self.exporter(settings.output_dir.clone())?;

        tracing::info!(
            model = %settings.model,
            output_dir = %settings.output_dir.display(),
            has_credential = settings.has_credential,
            "Session ready"
        );

        let session = PersonaSession::new(Arc::new(generator), Arc::new(exporter));
        Ok((session, settings))
    }
}
