//! OpenAI explanation provider
//!
//! Sends the audit metrics to the Responses API (`POST {endpoint}/responses`)
//! and returns the model's text.

use crate::audit::AuditMetrics;
use crate::config::ExplanationConfig;
use crate::providers::ExplanationGenerator;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const SYSTEM_PROMPT: &str = "You are an SEO and performance expert. \
Explain issues clearly for beginners and give practical steps.";

const USER_INSTRUCTIONS: &str = "Here are website metrics. 1) Explain what is good/bad. \
2) Give a prioritized todo list. 3) Suggest better <title> and meta description if needed.";

/// Errors from the explanation provider
#[derive(Debug, Error)]
pub enum ExplanationError {
    #[error("OpenAI API key is not configured")]
    MissingApiKey,

    #[error("OpenAI quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("OpenAI request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("OpenAI response could not be decoded: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("OpenAI response contained no text")]
    EmptyResponse,
}

impl ExplanationError {
    /// True for rate-limit or quota rejections
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage>,
}

#[derive(Debug, Serialize)]
struct InputMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Builds the system and user messages for a set of metrics
pub fn build_prompt(metrics: &AuditMetrics<'_>) -> Result<(String, String), serde_json::Error> {
    let metrics_json = serde_json::to_string(metrics)?;
    Ok((
        SYSTEM_PROMPT.to_string(),
        format!("{}\n\n{}", USER_INSTRUCTIONS, metrics_json),
    ))
}

/// [`ExplanationGenerator`] for OpenAI-compatible Responses APIs
pub struct OpenAiExplainer {
    http: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiExplainer {
    /// Builds the client; a missing key is reported here rather than per request
    pub fn new(config: &ExplanationConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        if config.api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; explanations will use fallback text");
        }

        Ok(Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn headers(&self, api_key: &str) -> Result<HeaderMap, ExplanationError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| ExplanationError::MissingApiKey)?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl ExplanationGenerator for OpenAiExplainer {
    async fn explain(&self, metrics: &AuditMetrics<'_>) -> Result<String, ExplanationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ExplanationError::MissingApiKey)?;

        let (system, user) = build_prompt(metrics)?;
        let request = ResponsesRequest {
            model: &self.model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: system,
                },
                InputMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        tracing::debug!(model = %self.model, "OpenAI responses request");

        let response = self
            .http
            .post(format!("{}/responses", self.base_url))
            .headers(self.headers(api_key)?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        parse_output_text(&body)
    }
}

/// Maps a non-success response to an error, singling out quota rejections
fn classify_error(status: StatusCode, body: &str) -> ExplanationError {
    let api_error = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);

    let is_quota_code = api_error
        .as_ref()
        .and_then(|e| e.code.as_deref())
        .map(|code| code == "insufficient_quota")
        .unwrap_or(false);

    if status == StatusCode::TOO_MANY_REQUESTS || is_quota_code {
        let message = api_error
            .and_then(|e| e.message)
            .unwrap_or_else(|| "the language model provider rejected the request".to_string());
        return ExplanationError::QuotaExceeded { message };
    }

    ExplanationError::Status {
        status,
        body: body.to_string(),
    }
}

/// Extracts the completion text from a Responses API body
fn parse_output_text(body: &str) -> Result<String, ExplanationError> {
    let reply: ResponsesReply = serde_json::from_str(body)?;

    let text = match reply.output_text {
        Some(text) => text,
        None => reply
            .output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join(""),
    };

    if text.trim().is_empty() {
        return Err(ExplanationError::EmptyResponse);
    }

    Ok(text)
}
