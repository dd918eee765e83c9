//! Gemini implementation of the model invoker port

use super::types::{
    Content, ErrorWrapper, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineDataPayload, Part,
};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use duet_application::ports::model_invoker::{
    GatewayError, Generation, InvocationRequest, ModelInvoker,
};
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Invoker that talks to the Gemini HTTP API.
pub struct GeminiInvoker {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiInvoker {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build from the `[gemini]` section, reading the key from the environment.
    pub fn from_config(config: &FileGeminiConfig) -> Result<Self, GatewayError> {
        let api_key = config.resolve_api_key();
        match &api_key {
            Some(_) => info!(base_url = %config.base_url, "Gemini invoker initialized"),
            None => warn!(env = %config.api_key_env, "No Gemini API key found"),
        }
        Self::new(
            api_key,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn build_body(request: &InvocationRequest<'_>) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(2);
        if let Some(image) = request.image {
            parts.push(Part::InlineData {
                inline_data: InlineDataPayload {
                    mime_type: image.mime_type.clone(),
                    data: image.base64_data.clone(),
                },
            });
        }
        parts.push(Part::Text {
            text: request.prompt.to_string(),
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::Text {
                    text: request.role_header.to_string(),
                }],
            }),
            generation_config: request
                .disable_extended_reasoning
                .then(GenerationConfig::reasoning_disabled),
        }
    }
}

#[async_trait]
impl ModelInvoker for GeminiInvoker {
    async fn invoke(&self, request: InvocationRequest<'_>) -> Result<Generation, GatewayError> {
        let Some(api_key) = &self.api_key else {
            return Err(GatewayError::InvalidCredentials(
                "no API key configured".to_string(),
            ));
        };

        let body = Self::build_body(&request);
        debug!(
            model = request.model,
            prompt_bytes = request.prompt.len(),
            has_image = request.image.is_some(),
            "Sending generateContent request"
        );

        let started = Instant::now();
        let response = self
            .client
            .post(self.endpoint(request.model))
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("Failed to parse Gemini response: {e}")))?;
        let text = extract_text(parsed)?;
        let elapsed = started.elapsed();

        debug!(
            model = request.model,
            elapsed_ms = elapsed.as_millis() as u64,
            bytes = text.len(),
            "Gemini response received"
        );
        Ok(Generation::new(text, elapsed))
    }

    fn credentials_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

fn map_transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_connect() {
        GatewayError::ConnectionError(err.to_string())
    } else {
        GatewayError::RequestFailed(format!("Gemini API request failed: {err}"))
    }
}

/// Map a non-success response onto a structured error kind.
fn map_http_error(status: StatusCode, body: &str) -> GatewayError {
    let parsed = serde_json::from_str::<ErrorWrapper>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|w| w.error.message.clone())
        .unwrap_or_else(|| body.to_string());
    let key_rejected = parsed.as_ref().is_some_and(|w| {
        w.error
            .details
            .iter()
            .any(|d| d.reason.as_deref() == Some("API_KEY_INVALID"))
    }) || message.contains("API key not valid");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::InvalidCredentials(message)
        }
        StatusCode::BAD_REQUEST if key_rejected => GatewayError::InvalidCredentials(message),
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => {
            let status_text = parsed
                .and_then(|w| w.error.status)
                .unwrap_or_else(|| status.as_u16().to_string());
            GatewayError::RequestFailed(format!("{status_text}: {message}"))
        }
    }
}

/// Concatenate the answer parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, GatewayError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(GatewayError::Blocked(reason));
    }

    let candidate = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .ok_or_else(|| GatewayError::RequestFailed("Gemini API returned no candidates".into()))?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|part| !part.thought)
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_default();
        let blocked = matches!(
            reason.as_str(),
            "SAFETY" | "RECITATION" | "PROHIBITED_CONTENT"
        );
        return Err(if blocked {
            GatewayError::Blocked(reason)
        } else {
            GatewayError::RequestFailed("Gemini API returned no text".into())
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use duet_application::ports::model_invoker::InlineImage;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_invalid_key_on_400_is_credential_error() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT","details":[{"@type":"type.googleapis.com/google.rpc.ErrorInfo","reason":"API_KEY_INVALID"}]}}"#;
        let err = map_http_error(StatusCode::BAD_REQUEST, body);
        assert!(err.is_credential_error());
    }

    #[test]
    fn test_unauthorized_and_forbidden_are_credential_errors() {
        assert!(map_http_error(StatusCode::UNAUTHORIZED, "nope").is_credential_error());
        assert!(map_http_error(StatusCode::FORBIDDEN, "{}").is_credential_error());
    }

    #[test]
    fn test_other_400_is_not_credential_error() {
        let body = r#"{"error":{"code":400,"message":"Invalid JSON payload","status":"INVALID_ARGUMENT"}}"#;
        let err = map_http_error(StatusCode::BAD_REQUEST, body);
        assert_eq!(
            err,
            GatewayError::RequestFailed("INVALID_ARGUMENT: Invalid JSON payload".to_string())
        );
    }

    #[test]
    fn test_not_found_maps_to_model_not_available() {
        let err = map_http_error(StatusCode::NOT_FOUND, "no such model");
        assert!(matches!(err, GatewayError::ModelNotAvailable(_)));
    }

    #[test]
    fn test_extract_text_skips_thought_parts() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"thinking...","thought":true},{"text":"Hello "},{"text":"world"}]},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(extract_text(response).unwrap(), "Hello world");
    }

    #[test]
    fn test_extract_text_blocked_prompt() {
        let response = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert_eq!(
            extract_text(response),
            Err(GatewayError::Blocked("SAFETY".to_string()))
        );
    }

    #[test]
    fn test_extract_text_without_candidates_fails() {
        let response = parse(r#"{"candidates":[]}"#);
        assert!(matches!(
            extract_text(response),
            Err(GatewayError::RequestFailed(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let image = InlineImage {
            mime_type: "image/jpeg".to_string(),
            base64_data: "/9j/".to_string(),
        };
        let request = InvocationRequest {
            prompt: "Say hi",
            model: "gemini-2.5-flash",
            role_header: "You are Muse, a highly creative AI.",
            disable_extended_reasoning: true,
            image: Some(&image),
        };
        let body = serde_json::to_value(GeminiInvoker::build_body(&request)).unwrap();

        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are Muse, a highly creative AI."
        );
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(body["contents"][0]["parts"][1]["text"], "Say hi");
        assert_eq!(
            body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            0
        );
    }

    #[test]
    fn test_request_body_without_reasoning_override() {
        let request = InvocationRequest {
            prompt: "Say hi",
            model: "gemini-2.5-pro",
            role_header: "header",
            disable_extended_reasoning: false,
            image: None,
        };
        let body = serde_json::to_value(GeminiInvoker::build_body(&request)).unwrap();
        assert!(body.get("generationConfig").is_none());
        assert_eq!(body["contents"][0]["parts"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let invoker =
            GeminiInvoker::new(None, "http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        assert!(!invoker.credentials_configured());
        let err = invoker
            .invoke(InvocationRequest {
                prompt: "p",
                model: "gemini-2.5-flash",
                role_header: "h",
                disable_extended_reasoning: false,
                image: None,
            })
            .await
            .unwrap_err();
        assert!(err.is_credential_error());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let invoker = GeminiInvoker::new(
            Some("k".into()),
            "https://example.test/",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            invoker.endpoint("gemini-2.5-pro"),
            "https://example.test/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }
}
