use std::path::PathBuf;
use std::sync::Arc;

use persona_application::{SessionFactory, SessionOptions};
use persona_core::config::{DEFAULT_GEMINI_MODEL, DEFAULT_TEMPERATURE};
use persona_core::{GenerationError, PersonaGenerator};
use persona_infrastructure::{AppPaths, SecretServiceImpl};
use tempfile::TempDir;

fn factory(dir: &TempDir, options: SessionOptions, env_key: Option<&'static str>) -> SessionFactory {
    let secrets = SecretServiceImpl::with_env(Some(dir.path()), move |name| {
        (name == "GEMINI_API_KEY").then_some(env_key).flatten().map(str::to_string)
    });
    SessionFactory::with_secret_service(options, AppPaths::new(Some(dir.path())), Arc::new(secrets))
}

#[tokio::test]
async fn test_defaults_without_any_configuration() {
    let temp_dir = TempDir::new().unwrap();
    let factory = factory(&temp_dir, SessionOptions::default(), None);

    let (_, settings) = factory.create_session().await.unwrap();

    assert_eq!(settings.model, DEFAULT_GEMINI_MODEL);
    assert_eq!(settings.temperature, DEFAULT_TEMPERATURE);
    assert_eq!(settings.output_dir, PathBuf::from("."));
    assert!(!settings.has_credential);
}

#[tokio::test]
async fn test_missing_key_fails_on_first_generate() {
    let temp_dir = TempDir::new().unwrap();
    let factory = factory(&temp_dir, SessionOptions::default(), None);

    let (generator, _) = factory.generator().await.unwrap();
    let err = generator
        .generate(&persona_core::FormData::new())
        .await
        .unwrap_err();
    assert_eq!(err, GenerationError::MissingCredential);
}

#[tokio::test]
async fn test_config_secret_and_overrides_are_merged() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("config.toml"),
        "[generation]\nmodel = \"gemini-from-config\"\ntemperature = 0.2\n\n[export]\noutput_dir = \"/srv/personas\"\n",
    )
    .unwrap();
    std::fs::write(
        temp_dir.path().join("secret.json"),
        r#"{"gemini":{"api_key":"file-key","model_name":"gemini-from-secret"}}"#,
    )
    .unwrap();

    let options = SessionOptions {
        output_dir: Some(PathBuf::from("/tmp/override")),
        ..SessionOptions::default()
    };
    let (generator, settings) = factory(&temp_dir, options, None).generator().await.unwrap();

    assert_eq!(settings.model, "gemini-from-secret");
    assert_eq!(generator.model(), "gemini-from-secret");
    assert!((settings.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(settings.output_dir, PathBuf::from("/tmp/override"));
    assert!(settings.has_credential);
}

#[tokio::test]
async fn test_explicit_config_file_wins() {
    let temp_dir = TempDir::new().unwrap();
    let custom = temp_dir.path().join("elsewhere.toml");
    std::fs::write(&custom, "[export]\noutput_dir = \"/data\"\n").unwrap();

    let options = SessionOptions {
        config_file: Some(custom),
        ..SessionOptions::default()
    };
    let (_, settings) = factory(&temp_dir, options, Some("env-key"))
        .generator()
        .await
        .unwrap();

    assert_eq!(settings.output_dir, PathBuf::from("/data"));
    assert!(settings.has_credential);
}

#[tokio::test]
async fn test_malformed_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("config.toml"), "not = [valid").unwrap();

    let err = factory(&temp_dir, SessionOptions::default(), None)
        .create_session()
        .await
        .err()
        .unwrap();
    assert!(format!("{err:#}").contains("Failed to load configuration"));
}
