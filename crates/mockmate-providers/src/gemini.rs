//! Google Generative Language (Gemini) backend.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mockmate_core::traits::{CompletionRequest, CompletionResponse, TextModel};

use crate::error::ModelError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Gemini `generateContent` backend.
pub struct GeminiModel {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiModel {
    pub fn new(api_key: &str, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl TextModel for GeminiModel {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
        let start = Instant::now();

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction: request.system_prompt.as_ref().map(|s| GeminiContent {
                parts: vec![GeminiPart { text: s.clone() }],
            }),
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    ModelError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(ModelError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::AuthenticationFailed(body).into());
        }
        if status == 404 {
            return Err(ModelError::ModelNotFound(request.model.clone()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let api_response: GeminiResponse =
            response.json().await.map_err(|e| ModelError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let content = api_response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: api_response
                .model_version
                .unwrap_or_else(|| request.model.clone()),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gemini-1.5-pro".into(),
            prompt: "Score this answer".into(),
            system_prompt: Some("Return ONLY JSON".into()),
            max_tokens: 1024,
            temperature: 0.0,
        }
    }

    #[tokio::test]
    async fn successful_completion() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"scores\": {\"relevance\": 8}}"}], "role": "model"},
                "finishReason": "STOP"
            }],
            "modelVersion": "gemini-1.5-pro-002"
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let model = GeminiModel::new("test-key", Some(server.uri()));
        let response = model.complete(&request()).await.unwrap();
        assert!(response.content.contains("relevance"));
        assert_eq!(response.model, "gemini-1.5-pro-002");
    }

    #[tokio::test]
    async fn multi_part_candidate_is_concatenated() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}
            }]
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let model = GeminiModel::new("key", Some(server.uri()));
        let response = model.complete(&request()).await.unwrap();
        assert_eq!(response.content, "{\"a\": 1}");
    }

    #[tokio::test]
    async fn auth_failure_maps_to_typed_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let model = GeminiModel::new("bad-key", Some(server.uri()));
        let err = model.complete(&request()).await.unwrap_err();
        assert!(err.to_string().contains("authentication failed"));
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let model = GeminiModel::new("key", Some(server.uri()));
        let err = model.complete(&request()).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn unknown_model_maps_to_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let model = GeminiModel::new("key", Some(server.uri()));
        let err = model.complete(&request()).await.unwrap_err();
        assert!(err.to_string().contains("model not found"));
    }
}
