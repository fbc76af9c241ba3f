//! Unified path management for Persona Architect configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/persona-architect/   # dirs::config_dir() on Linux
//! ├── config.toml                # Application configuration (optional)
//! └── secret.json                # API keys (optional)
//! ```

use std::path::{Path, PathBuf};

use persona_core::config::{GeminiConfig, SecretConfig};

const APP_DIR_NAME: &str = "persona-architect";
const CONFIG_FILE_NAME: &str = "config.toml";
const SECRET_FILE_NAME: &str = "secret.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolver rooted at the platform config directory, or at an explicit
/// base directory (tests, `--config`).
#[derive(Debug, Clone, Default)]
pub struct AppPaths {
    base: Option<PathBuf>,
}

impl AppPaths {
    /// # Arguments
    ///
    /// * `base_path` - Directory to use instead of `<config_dir>/persona-architect`
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            base: base_path.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/persona-architect/`
    /// - `Err(PathError::ConfigDirNotFound)`: no platform config directory
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600).
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(SECRET_FILE_NAME))
    }

    /// Ensures the secret file exists, creating a template if it doesn't.
    ///
    /// The template has an empty Gemini key, so it still resolves to "no
    /// credential" until the user fills it in. On Unix the file is created
    /// with mode 600.
    pub fn ensure_secret_file(&self) -> Result<PathBuf, std::io::Error> {
        let secret_path = self
            .secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: Some(persona_core::config::DEFAULT_GEMINI_MODEL.to_string()),
            }),
        };
        let template_json = serde_json::to_string_pretty(&template).map_err(std::io::Error::other)?;
        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&secret_path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(secret_path)
    }
}
