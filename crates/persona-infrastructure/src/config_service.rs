//! Configuration service implementation.
//!
//! Loads `config.toml` from the config directory (or an explicit path) and
//! caches the result.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use persona_core::config::AppConfig;
use persona_core::error::{PersonaError, Result};

use crate::paths::AppPaths;

/// Configuration service that loads and caches [`AppConfig`].
///
/// A missing file yields the defaults; a file that exists but does not parse
/// is a `PersonaError::Config`.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    paths: AppPaths,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Uses `<config_dir>/persona-architect/config.toml`.
    pub fn new() -> Self {
        Self::with_paths(AppPaths::default())
    }

    pub fn with_paths(paths: AppPaths) -> Self {
        Self {
            path: None,
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Reads the given file instead of the default location.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            paths: AppPaths::default(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|p| p.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        {
            let mut write_lock = self.config.write().unwrap_or_else(|p| p.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|p| p.into_inner());
        *write_lock = None;
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => self
                .paths
                .config_file()
                .map_err(|e| PersonaError::config(e.to_string())),
        }
    }

    fn load_config(&self) -> Result<AppConfig> {
        let path = self.config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            PersonaError::config(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), model = %config.generation.model, "Loaded config");
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_core::config::DEFAULT_GEMINI_MODEL;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_paths(AppPaths::new(Some(temp_dir.path())));

        let config = service.get_config().unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.generation.model, DEFAULT_GEMINI_MODEL);
        assert!((config.generation.temperature - 0.6).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        std::fs::write(&path, "[export]\noutput_dir = \"/tmp/personas\"\n").unwrap();

        let config = ConfigService::with_path(&path).get_config().unwrap();

        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/personas"));
        assert_eq!(config.generation.model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[generation\nmodel = 3").unwrap();

        let err = ConfigService::with_path(&path).get_config().unwrap_err();
        assert!(err.is_config(), "{err:?}");
    }

    #[test]
    fn test_cache_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[generation]\nmodel = \"gemini-a\"\n").unwrap();
        let service = ConfigService::with_path(&path);
        assert_eq!(service.get_config().unwrap().generation.model, "gemini-a");

        std::fs::write(&path, "[generation]\nmodel = \"gemini-b\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().generation.model, "gemini-a");

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().generation.model, "gemini-b");
    }
}
