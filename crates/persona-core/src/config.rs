//! Configuration models.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_TEMPERATURE: f32 = 0.6;

/// Contents of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct SecretConfig {
    /// Gemini API configuration
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

impl SecretConfig {
    /// The Gemini key, if one is configured and non-blank.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|gemini| gemini.api_key.trim())
            .filter(|key| !key.is_empty())
    }

    pub fn gemini_model_override(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .and_then(|gemini| gemini.model_name.as_deref())
            .filter(|model| !model.trim().is_empty())
    }
}

/// Gemini API configuration
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationSettings,
    pub export: ExportSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub base_url: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory where exported documents are written
    pub output_dir: std::path::PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: std::path::PathBuf::from("."),
        }
    }
}
