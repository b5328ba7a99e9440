use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    scan::{ports::LlmClient, value_objects::LlmRequest},
};

/// Adapter for the Gemini `generateContent` endpoint. Holds only the
/// model name; the credential travels with every call and is never
/// stored here.
#[derive(Debug, Clone)]
pub struct GeminiLlmClient {
    model_name: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: String,
}

impl GeminiLlmClient {
    pub fn new(model_name: String) -> Self {
        Self {
            model_name,
            client: Client::new(),
        }
    }
}

/// Map an unsuccessful HTTP response onto the error taxonomy. The body
/// is inspected for the API's structured error reasons, which are more
/// reliable than the status code alone.
fn map_error_response(status: StatusCode, body: &str) -> CoreError {
    if body.contains("API_KEY_INVALID") {
        return CoreError::InvalidCredential;
    }
    if body.contains("RESOURCE_EXHAUSTED") {
        return CoreError::RateLimited;
    }

    match status {
        StatusCode::BAD_REQUEST => CoreError::InvalidCredential,
        StatusCode::TOO_MANY_REQUESTS => CoreError::RateLimited,
        s if s.is_server_error() => CoreError::ServiceUnavailable,
        s => CoreError::ExternalService(format!("unexpected status {s}")),
    }
}

impl LlmClient for GeminiLlmClient {
    async fn generate(&self, api_key: String, request: LlmRequest) -> Result<String, CoreError> {
        let mut parts = vec![Part::Text {
            text: request.prompt,
        }];
        for image in request.images {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type,
                    data: general_purpose::STANDARD.encode(&image.data),
                },
            });
        }

        let body = GeminiRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model_name, api_key
        );

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            error!("Gemini API request failed: {}", e);
            CoreError::ExternalService(format!("LLM API error: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error: {} - {}", status, error_text);
            return Err(map_error_response(status, &error_text));
        }

        let envelope: GeminiResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            CoreError::InvalidResponseFormat
        })?;

        // Only candidates[0].content.parts[0].text is trusted; any other
        // envelope shape is an error.
        envelope
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or(CoreError::InvalidResponseFormat)
    }
}
