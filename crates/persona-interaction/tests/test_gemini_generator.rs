//! Runs the generator against a local fake of the Gemini endpoint.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use persona_core::{FormData, FormField, GenerationError, PersonaGenerator};
use persona_interaction::GeminiPersonaGenerator;
use serde_json::{Value, json};
use tokio::sync::Mutex;

#[derive(Clone)]
struct FakeGemini {
    status: StatusCode,
    body: Value,
    hits: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<(String, String, Value)>>>,
}

impl FakeGemini {
    fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            hits: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }
}

async fn generate_content(
    State(fake): State<FakeGemini>,
    Path(call): Path<String>,
    Query(query): Query<std::collections::HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    let key = query.get("key").cloned().unwrap_or_default();
    *fake.last_request.lock().await = Some((call, key, body));
    (fake.status, Json(fake.body.clone()))
}

/// Starts the fake and returns its base URL.
async fn spawn(fake: FakeGemini) -> String {
    let app = Router::new()
        .route("/v1beta/models/{call}", post(generate_content))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1beta/models")
}

fn persona_json() -> Value {
    json!({
        "name": "Carlos Mendes",
        "jobTitle": "Diretor de TI",
        "profileSummary": "Pragmático, avesso a riscos e focado em estabilidade.",
        "demographics": {
            "ageRange": "40-50",
            "location": "Belo Horizonte, MG",
            "education": "Engenharia de Computação",
            "industry": "Varejo"
        },
        "goals": ["Reduzir custos de infraestrutura", "Liderar a migração para nuvem", "Ganhar visibilidade no board"],
        "painPoints": ["Sistemas legados", "Equipe sobrecarregada", "Fornecedores lentos"],
        "quote": "Não posso parar a loja para trocar de sistema.",
        "solutionMapping": "Migração gradual sem downtime.",
        "preferredChannels": ["LinkedIn", "Eventos"],
        "commonObjections": ["E se a integração falhar?"]
    })
}

fn candidates_with_text(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn answers() -> FormData {
    let mut data = FormData::new();
    data.set(FormField::Role, "Diretor de TI");
    data.set(FormField::ProductDescription, "Plataforma de e-commerce");
    data
}

#[tokio::test]
async fn test_successful_generation_decodes_persona() {
    let fake = FakeGemini::new(
        StatusCode::OK,
        candidates_with_text(&persona_json().to_string()),
    );
    let base_url = spawn(fake.clone()).await;
    let generator = GeminiPersonaGenerator::new(Some("test-key".to_string()))
        .with_base_url(base_url)
        .with_model("gemini-2.5-flash");

    let persona = generator.generate(&answers()).await.unwrap();

    assert_eq!(persona.name, "Carlos Mendes");
    assert_eq!(persona.demographics.location, "Belo Horizonte, MG");
    assert_eq!(persona.goals.len(), 3);
    assert_eq!(fake.hits.load(Ordering::SeqCst), 1);

    let (call, key, body) = fake.last_request.lock().await.clone().unwrap();
    assert_eq!(call, "gemini-2.5-flash:generateContent");
    assert_eq!(key, "test-key");
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Diretor de TI"));
    assert!(prompt.contains("Plataforma de e-commerce"));
}

#[tokio::test]
async fn test_service_error_carries_status_and_message() {
    let fake = FakeGemini::new(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "error": { "code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE" } }),
    );
    let base_url = spawn(fake).await;
    let generator =
        GeminiPersonaGenerator::new(Some("test-key".to_string())).with_base_url(base_url);

    let err = generator.generate(&answers()).await.unwrap_err();

    assert_eq!(
        err,
        GenerationError::Service {
            status: 503,
            message: "UNAVAILABLE: The model is overloaded.".to_string()
        }
    );
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_no_candidates_is_empty_response() {
    let fake = FakeGemini::new(StatusCode::OK, json!({ "candidates": [] }));
    let base_url = spawn(fake).await;
    let generator =
        GeminiPersonaGenerator::new(Some("test-key".to_string())).with_base_url(base_url);

    let err = generator.generate(&answers()).await.unwrap_err();
    assert_eq!(err, GenerationError::EmptyResponse);
}

#[tokio::test]
async fn test_incomplete_persona_is_malformed() {
    let mut partial = persona_json();
    partial.as_object_mut().unwrap().remove("quote");
    let fake = FakeGemini::new(StatusCode::OK, candidates_with_text(&partial.to_string()));
    let base_url = spawn(fake).await;
    let generator =
        GeminiPersonaGenerator::new(Some("test-key".to_string())).with_base_url(base_url);

    let err = generator.generate(&answers()).await.unwrap_err();
    match err {
        GenerationError::MalformedResponse(detail) => assert!(detail.contains("quote"), "{detail}"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_key_fails_without_request() {
    let fake = FakeGemini::new(StatusCode::OK, candidates_with_text("{}"));
    let base_url = spawn(fake.clone()).await;
    let generator = GeminiPersonaGenerator::new(None).with_base_url(base_url);

    let err = generator.generate(&answers()).await.unwrap_err();

    assert_eq!(err, GenerationError::MissingCredential);
    assert_eq!(fake.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unreachable_service_is_request_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let generator = GeminiPersonaGenerator::new(Some("secret-key".to_string()))
        .with_base_url(format!("http://{addr}/v1beta/models"));

    let err = generator.generate(&answers()).await.unwrap_err();
    match &err {
        GenerationError::Request(detail) => assert!(!detail.contains("secret-key"), "{detail}"),
        other => panic!("unexpected error {other:?}"),
    }
}
