//! Secret management service trait.
//!
//! Defines the interface for resolving the generation service credential.

use crate::config::SecretConfig;
use crate::error::Result;

/// Service for loading secret configuration.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Secrets are never logged or exposed in error messages
/// - Secret files are read from the user's config directory only
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    ///
    /// A missing credential is not an error here: the returned config simply
    /// has no key, and generation fails fast later.
    async fn load_secrets(&self) -> Result<SecretConfig>;
}
