//! Gemini generative-language provider (`models/{model}:generateContent`).
//!
//! Exposes the single `complete(&CompletionRequest) -> String` interface the
//! rest of the `LlmProvider` abstraction expects. All Gemini wire types are
//! private to this module — callers never see them. JSON extraction from the
//! reply text belongs at the agent layer; this provider is stateless.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::llm::{CompletionRequest, ProviderError};

// ── Public provider ───────────────────────────────────────────────────────────

/// Adapter for the hosted generative-language endpoint.
///
/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    api_base_url: String,
    model: String,
    temperature: f32,
    api_key: Option<String>,
}

impl GeminiProvider {
    /// Build a provider from config values and an optional API key.
    ///
    /// When present, the key is sent as `x-goog-api-key` on every request.
    pub fn new(
        api_base_url: String,
        model: String,
        temperature: f32,
        timeout_seconds: u64,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_base_url, model, temperature, api_key })
    }

    /// One `generateContent` round-trip.
    ///
    /// When `request.web_search` is set, the call carries a `google_search`
    /// tool declaration so the model can ground its reply. Every part of the
    /// winning candidate is concatenated, so the reply is consumed in full
    /// before this returns.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base_url.trim_end_matches('/'),
            self.model
        );

        let payload = GenerateContentRequest {
            system_instruction: request.system.as_ref().map(|s| SystemInstruction {
                parts: vec![RequestPart { text: s.clone() }],
            }),
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![RequestPart { text: request.user.clone() }],
            }],
            tools: request
                .web_search
                .then(|| vec![Tool { google_search: GoogleSearch {} }]),
            generation_config: GenerationConfig { temperature: self.temperature },
        };

        debug!(
            model = %self.model,
            web_search = request.web_search,
            content_len = request.user.len(),
            "sending LLM request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full LLM request payload");
        }

        let mut req = self.client.post(&url).json(&payload);
        if let Some(key) = &self.api_key {
            req = req.header("x-goog-api-key", key);
        }

        let response = req.send().await.map_err(|e| {
            error!(url = %url, error = %e, "LLM HTTP request failed (transport)");
            ProviderError::Request(e.to_string())
        })?;

        let response = check_status(response).await?;

        let parsed = response.json::<GenerateContentResponse>().await.map_err(|e| {
            error!(error = %e, "failed to deserialize LLM response");
            ProviderError::Request(format!("failed to parse response body: {e}"))
        })?;

        debug!(candidates = parsed.candidates.len(), "received LLM response");

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProviderError::Request("empty or missing candidates in response".into()))?;

        Ok(text)
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

// Error envelope used by the generative-language API.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Consume the response and return it if successful, or a structured error.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = if let Ok(env) = serde_json::from_str::<ErrorEnvelope>(&body) {
        let code = env
            .error
            .status
            .map(|s| format!(" [{s}]"))
            .unwrap_or_default();
        format!("HTTP {status}{code}: {}", env.error.message)
    } else {
        format!("HTTP {status}: {body}")
    };

    error!(%status, %message, "LLM request returned HTTP error");
    Err(ProviderError::Request(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialises_with_tool_and_system() {
        let payload = GenerateContentRequest {
            system_instruction: Some(SystemInstruction {
                parts: vec![RequestPart { text: "be terse".into() }],
            }),
            contents: vec![Content {
                role: "user".into(),
                parts: vec![RequestPart { text: "hello".into() }],
            }],
            tools: Some(vec![Tool { google_search: GoogleSearch {} }]),
            generation_config: GenerationConfig { temperature: 0.2 },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be terse");
        assert_eq!(json["contents"][0]["role"], "user");
        assert!(json["tools"][0]["google_search"].is_object());
        assert!(json["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn request_omits_optional_fields() {
        let payload = GenerateContentRequest {
            system_instruction: None,
            contents: vec![],
            tools: None,
            generation_config: GenerationConfig { temperature: 0.0 },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("systemInstruction").is_none());
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn response_parts_deserialise() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "part one "}, {"text": "part two"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let joined: String = parsed.candidates[0]
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        assert_eq!(joined, "part one part two");
    }

    #[test]
    fn empty_response_deserialises() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
