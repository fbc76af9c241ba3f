//! GeminiPersonaGenerator - Direct REST API implementation for Gemini.
//!
//! Sends one `generateContent` request per persona with a response schema,
//! and decodes the returned JSON strictly into a `GeneratedPersona`.

use async_trait::async_trait;
use persona_core::config::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_TEMPERATURE};
use persona_core::{FormData, GeneratedPersona, GenerationError, PersonaGenerator};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::prompt::{PromptBuilder, RenderedPrompt};
use crate::schema::persona_response_schema;

/// Persona generator that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiPersonaGenerator {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    temperature: f32,
}

impl GeminiPersonaGenerator {
    /// Creates a generator with the default model.
    ///
    /// A missing or blank key is accepted here; [`PersonaGenerator::generate`]
    /// then fails fast with [`GenerationError::MissingCredential`].
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the API base URL (everything before `/{model}:generateContent`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_request(&self, prompt: RenderedPrompt) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: prompt.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.user_prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: persona_response_schema(),
                temperature: self.temperature,
            },
        }
    }

    async fn send_request(
        &self,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<String, GenerationError> {
        let url = format!(
            "{}/{model}:generateContent",
            self.base_url,
            model = self.model
        );

        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(body)
            .send()
            .await
            // without_url keeps the key out of the message
            .map_err(|err| {
                GenerationError::request(format!("Gemini API request failed: {}", err.without_url()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            GenerationError::malformed(format!(
                "Failed to parse Gemini response: {}",
                err.without_url()
            ))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl PersonaGenerator for GeminiPersonaGenerator {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, data: &FormData) -> Result<GeneratedPersona, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let prompt = PromptBuilder::new()
            .and_then(|builder| builder.render(data))
            .map_err(|err| GenerationError::request(format!("Failed to build prompt: {err}")))?;

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.user_prompt.chars().count(),
            "Sending persona generation request"
        );

        let request = self.build_request(prompt);
        let text = self.send_request(api_key, &request).await?;
        GeneratedPersona::from_json(&text)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Concatenates the text parts of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Result<String, GenerationError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text)
}

fn map_http_error(status: StatusCode, body: String) -> GenerationError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    GenerationError::Service {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_concatenates_first_candidate_parts() {
        let parsed = response(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}},
                {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        );
        assert_eq!(extract_text_response(parsed).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_extract_without_candidates_is_empty_response() {
        assert_eq!(
            extract_text_response(response(r#"{}"#)),
            Err(GenerationError::EmptyResponse)
        );
        assert_eq!(
            extract_text_response(response(r#"{"candidates":[{"content":{"parts":[]}}]}"#)),
            Err(GenerationError::EmptyResponse)
        );
    }

    #[test]
    fn test_http_error_uses_google_error_envelope() {
        let err = map_http_error(
            StatusCode::FORBIDDEN,
            r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#
                .to_string(),
        );
        assert_eq!(
            err,
            GenerationError::Service {
                status: 403,
                message: "PERMISSION_DENIED: API key not valid".to_string()
            }
        );
    }

    #[test]
    fn test_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert!(err.detail().contains("upstream down"));
        assert!(err.detail().contains("502"));
    }

    #[test]
    fn test_request_body_shape() {
        let generator = GeminiPersonaGenerator::new(Some("k".to_string())).with_temperature(0.6);
        let prompt = PromptBuilder::new()
            .unwrap()
            .render(&FormData::new())
            .unwrap();
        let body = serde_json::to_value(generator.build_request(prompt)).unwrap();

        assert!(body["systemInstruction"]["parts"][0]["text"].is_string());
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        assert!(!GeminiPersonaGenerator::new(Some("  ".to_string())).has_credential());
        assert!(GeminiPersonaGenerator::new(Some("abc".to_string())).has_credential());
    }
}
