//! Error types for Persona Architect.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single persona generation call.
///
/// Generation is all-or-nothing: every variant means no persona was produced.
/// The `Display` text is the human-readable detail that the wizard embeds in
/// its failure message.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationError {
    /// No API key was configured. Raised before any network attempt.
    #[error("Chave de API ausente. Verifique a configuração do ambiente (GEMINI_API_KEY ou API_KEY).")]
    MissingCredential,

    /// The request never produced an HTTP response (DNS, connect, timeout...).
    #[error("{0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Service { status: u16, message: String },

    /// The service answered successfully but without any text payload.
    #[error("Resposta vazia da IA.")]
    EmptyResponse,

    /// The payload did not decode into a complete persona.
    #[error("Resposta da IA em formato inválido: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// Creates a Request error
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request(message.into())
    }

    /// Creates a MalformedResponse error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// The detail string shown to the user.
    pub fn detail(&self) -> String {
        self.to_string()
    }

    /// Check if retrying the same call can reasonably succeed.
    ///
    /// A missing credential needs external configuration; everything else
    /// may be transient.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::MissingCredential)
    }
}

/// A shared error type for the whole application.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PersonaError {
    /// A required form field is empty
    #[error("Validation error: {0}")]
    Validation(String),

    /// An option label that is not part of a fixed option list
    #[error("Unknown {kind} option: '{value}'")]
    UnknownOption { kind: &'static str, value: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document export error
    #[error("Export error: {0}")]
    Export(String),

    /// Persona generation error
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersonaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }

    /// Creates an UnknownOption error
    pub fn unknown_option(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownOption {
            kind,
            value: value.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is an export error
    pub fn is_export(&self) -> bool {
        matches!(self, Self::Export(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PersonaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PersonaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PersonaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error
impl From<anyhow::Error> for PersonaError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, PersonaError>`.
pub type Result<T> = std::result::Result<T, PersonaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_detail_is_display_text() {
        let err = GenerationError::request("timeout");
        assert_eq!(err.detail(), "timeout");
    }

    #[test]
    fn test_service_error_includes_status() {
        let err = GenerationError::Service {
            status: 503,
            message: "UNAVAILABLE: overloaded".to_string(),
        };
        assert!(err.detail().contains("503"));
        assert!(err.detail().contains("overloaded"));
    }

    #[test]
    fn test_missing_credential_is_not_retryable() {
        assert!(!GenerationError::MissingCredential.is_retryable());
        assert!(GenerationError::EmptyResponse.is_retryable());
    }

    #[test]
    fn test_toml_error_conversion() {
        let err: PersonaError = toml::from_str::<toml::Value>("= broken")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
    }
}
