//! Secret service implementation.
//!
//! Resolves the Gemini credential from the environment first, then from
//! `secret.json`. A missing credential is not an error here.

use std::path::PathBuf;
use std::sync::Arc;

use persona_core::config::{GeminiConfig, SecretConfig};
use persona_core::error::{PersonaError, Result};
use persona_core::secret::SecretService;
use tokio::sync::OnceCell;

use crate::paths::AppPaths;

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Service for resolving secret configuration.
///
/// The result is cached after the first successful load.
///
/// # Example
///
/// ```ignore
/// use persona_infrastructure::SecretServiceImpl;
/// use persona_core::secret::SecretService;
///
/// let service = SecretServiceImpl::new(None);
/// let secrets = service.load_secrets().await?;
/// ```
#[derive(Clone)]
pub struct SecretServiceImpl {
    paths: AppPaths,
    env: EnvLookup,
    secrets: Arc<OnceCell<SecretConfig>>,
}

impl SecretServiceImpl {
    /// # Arguments
    ///
    /// * `base_path` - Directory holding `secret.json`; defaults to the config dir
    pub fn new(base_path: Option<&std::path::Path>) -> Self {
        Self::with_env(base_path, |name| std::env::var(name).ok())
    }

    /// Same as [`SecretServiceImpl::new`] with a custom environment lookup.
    pub fn with_env<F>(base_path: Option<&std::path::Path>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            paths: AppPaths::new(base_path),
            env: Arc::new(env),
            secrets: Arc::new(OnceCell::new()),
        }
    }

    fn env_api_key(&self) -> Option<(&'static str, String)> {
        API_KEY_ENV_VARS.iter().find_map(|name| {
            (self.env)(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(|value| (*name, value))
        })
    }

    async fn read_secret_file(&self) -> Result<SecretConfig> {
        let path: PathBuf = self
            .paths
            .secret_file()
            .map_err(|e| PersonaError::config(e.to_string()))?;

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No secret file");
                Ok(SecretConfig::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn resolve(&self) -> Result<SecretConfig> {
        let from_file = self.read_secret_file().await?;

        let Some((source, api_key)) = self.env_api_key() else {
            if from_file.gemini_api_key().is_some() {
                tracing::debug!("Using API key from secret.json");
            } else {
                tracing::warn!("No Gemini API key configured; generation will fail until one is set");
            }
            return Ok(from_file);
        };

        tracing::debug!(source, "Using API key from environment");
        let model_name = from_file.gemini_model_override().map(str::to_string);
        Ok(SecretConfig {
            gemini: Some(GeminiConfig {
                api_key,
                model_name,
            }),
        })
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.secrets
            .get_or_try_init(|| self.resolve())
            .await
            .cloned()
    }
}
