//! Google Gemini API client for text generation and model listing.
//!
//! This module provides the text stage of the pipeline through Google's
//! generative language API. It implements single-turn content generation
//! and the list-models discovery call used by the resolver.
//!
//! # Example
//! ```no_run
//! use voicegenie::backends::google::Google;
//! use voicegenie::completion::{GenerationRequest, TextGenerationProvider};
//! use voicegenie::credential::Credential;
//!
//! #[tokio::main]
//! async fn main() {
//!     let key = Credential::new("Gemini", "your-api-key").unwrap();
//!     let client = Google::new(key, None);
//!     let req = GenerationRequest::new("Hello!", "gemini-1.5-flash");
//!     let resp = client.generate_text(&req).await.unwrap();
//!     println!("{}", resp.text);
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    completion::{GenerationRequest, GenerationResponse, TextGenerationProvider},
    credential::Credential,
    error::PipelineError,
    models::{ModelEntry, ModelsProvider},
};

/// Default base URL for the generative language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for Google's Gemini API.
///
/// Holds the per-request configuration needed to call the generate-content
/// and list-models endpoints. Credentials are passed in at construction and
/// discarded with the client; there is no process-wide state.
#[derive(Debug, Clone)]
pub struct Google {
    /// API key for authentication
    api_key: Credential,
    /// Base URL, overridable for tests
    base_url: String,
    /// Request timeout in seconds; transport default when unset
    timeout_seconds: Option<u64>,
    /// HTTP client for making API requests
    client: Client,
}

/// Request body for content generation
#[derive(Serialize)]
struct GoogleGenerateRequest<'a> {
    /// Single-turn conversation content
    contents: Vec<GoogleContent<'a>>,
    /// Optional generation parameters, omitted entirely when empty to avoid
    /// validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GoogleGenerationConfig>,
}

/// One message in the conversation
#[derive(Serialize)]
struct GoogleContent<'a> {
    /// Content parts of the message
    parts: Vec<GooglePart<'a>>,
}

/// Text content within a message
#[derive(Serialize)]
struct GooglePart<'a> {
    /// The actual text content
    text: &'a str,
}

/// Configuration parameters for text generation
#[derive(Serialize)]
struct GoogleGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Response from the generate-content API
#[derive(Deserialize)]
struct GoogleGenerateResponse {
    /// Generated completion candidates
    candidates: Vec<GoogleCandidate>,
}

/// Individual completion candidate
#[derive(Deserialize)]
struct GoogleCandidate {
    /// Content of the candidate response
    content: GoogleResponseContent,
}

/// Content block within a response
#[derive(Deserialize)]
struct GoogleResponseContent {
    /// Parts making up the content
    parts: Vec<GoogleResponsePart>,
}

/// Individual part of response content
#[derive(Deserialize)]
struct GoogleResponsePart {
    /// Text content of this part
    text: String,
}

/// Response from the list-models API
#[derive(Deserialize)]
struct GoogleModelListResponse {
    #[serde(default)]
    models: Vec<GoogleModelDescriptor>,
}

/// One model descriptor from the list-models API
#[derive(Deserialize)]
struct GoogleModelDescriptor {
    /// Resource name, e.g. "models/gemini-1.5-flash"
    name: String,
    /// Methods this model supports, e.g. ["generateContent", "countTokens"]
    #[serde(default, rename = "supportedGenerationMethods")]
    supported_generation_methods: Vec<String>,
}

impl Google {
    /// Creates a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Google API key for authentication
    /// * `timeout_seconds` - Request timeout; transport default when `None`
    pub fn new(api_key: Credential, timeout_seconds: Option<u64>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, timeout_seconds)
    }

    /// Creates a client against a non-default base URL (used by tests).
    pub fn with_base_url(
        api_key: Credential,
        base_url: impl Into<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Self {
            api_key,
            base_url: base_url.into(),
            timeout_seconds,
            client: builder.build().unwrap_or_default(),
        }
    }
}

#[async_trait]
impl TextGenerationProvider for Google {
    /// Sends a single-turn generation request to the Gemini API.
    ///
    /// Exactly one attempt is made. A non-success status becomes a
    /// `ProviderError` carrying the numeric status and the verbatim body;
    /// a success status with an unexpected body shape becomes `JsonError`
    /// (body not JSON at all) or `ResponseFormatError` (JSON missing the
    /// candidate text).
    async fn generate_text(
        &self,
        req: &GenerationRequest,
    ) -> Result<GenerationResponse, PipelineError> {
        let generation_config = if req.max_output_tokens.is_none() && req.temperature.is_none() {
            None
        } else {
            Some(GoogleGenerationConfig {
                max_output_tokens: req.max_output_tokens,
                temperature: req.temperature,
            })
        };

        let req_body = GoogleGenerateRequest {
            contents: vec![GoogleContent {
                parts: vec![GooglePart { text: &req.prompt }],
            }],
            generation_config,
        };

        let url = format!(
            "{base}/models/{model}:generateContent?key={key}",
            base = self.base_url,
            model = req.model,
            key = self.api_key.expose()
        );

        let mut request = self.client.post(&url).json(&req_body);
        if let Some(timeout) = self.timeout_seconds {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        let resp = request.send().await?;
        let status = resp.status();
        log::debug!("Gemini generateContent ({}) HTTP status: {}", req.model, status);

        let body = resp.text().await?;
        if !status.is_success() {
            return Err(PipelineError::ProviderError {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        // Strict two-step decode: malformed JSON and well-formed JSON with
        // missing fields are distinct failure kinds.
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| PipelineError::JsonError(e.to_string()))?;
        let parsed: GoogleGenerateResponse =
            serde_json::from_value(value).map_err(|e| PipelineError::ResponseFormatError {
                message: e.to_string(),
                raw_response: body.clone(),
            })?;

        let first_candidate =
            parsed
                .candidates
                .into_iter()
                .next()
                .ok_or_else(|| PipelineError::ResponseFormatError {
                    message: "no candidates returned".to_string(),
                    raw_response: body.clone(),
                })?;

        let text = first_candidate
            .content
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
            .ok_or_else(|| PipelineError::ResponseFormatError {
                message: "candidate has no content parts".to_string(),
                raw_response: body,
            })?;

        Ok(GenerationResponse { text })
    }
}

#[async_trait]
impl ModelsProvider for Google {
    /// Retrieves the models enabled for this credential.
    ///
    /// Resource names are stripped of their "models/" prefix so entries can
    /// be fed straight back into generation requests.
    async fn list_models(&self) -> Result<Vec<ModelEntry>, PipelineError> {
        let url = format!(
            "{base}/models?key={key}",
            base = self.base_url,
            key = self.api_key.expose()
        );

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        log::debug!("Gemini listModels HTTP status: {}", status);

        let body = resp.text().await?;
        if !status.is_success() {
            return Err(PipelineError::ProviderError {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| PipelineError::JsonError(e.to_string()))?;
        let parsed: GoogleModelListResponse = serde_json::from_value(value)
            .map_err(|e| PipelineError::ResponseFormatError {
                message: e.to_string(),
                raw_response: body,
            })?;

        let entries = parsed
            .models
            .into_iter()
            .map(|descriptor| {
                let id = descriptor
                    .name
                    .strip_prefix("models/")
                    .unwrap_or(&descriptor.name)
                    .to_string();
                let raw = serde_json::json!({
                    "name": descriptor.name,
                    "supportedGenerationMethods": descriptor.supported_generation_methods.clone(),
                });
                ModelEntry {
                    id,
                    supported_generation_methods: descriptor.supported_generation_methods,
                    raw,
                }
            })
            .collect();

        Ok(entries)
    }
}
