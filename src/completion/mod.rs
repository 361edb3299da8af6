use async_trait::async_trait;

use crate::error::PipelineError;

/// A single-turn text generation request for a resolved model.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The user prompt to send
    pub prompt: String,
    /// Resolved model identifier (e.g. "gemini-1.5-flash")
    pub model: String,
    /// Optional maximum number of tokens to generate
    pub max_output_tokens: Option<u32>,
    /// Optional temperature parameter to control randomness (0.0-1.0)
    pub temperature: Option<f32>,
}

/// The generated text returned by the provider.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Text of the first candidate's first content part
    pub text: String,
}

impl GenerationRequest {
    /// Creates a request with just a prompt and model, no tuning parameters.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            max_output_tokens: None,
            temperature: None,
        }
    }

    /// Creates a builder for constructing a generation request.
    pub fn builder(prompt: impl Into<String>, model: impl Into<String>) -> GenerationRequestBuilder {
        GenerationRequestBuilder {
            prompt: prompt.into(),
            model: model.into(),
            max_output_tokens: None,
            temperature: None,
        }
    }
}

/// Builder for constructing generation requests with optional parameters.
#[derive(Debug, Clone)]
pub struct GenerationRequestBuilder {
    prompt: String,
    model: String,
    max_output_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl GenerationRequestBuilder {
    /// Sets the maximum number of tokens to generate.
    pub fn max_output_tokens(mut self, val: u32) -> Self {
        self.max_output_tokens = Some(val);
        self
    }

    /// Sets the temperature parameter for controlling randomness.
    pub fn temperature(mut self, val: f32) -> Self {
        self.temperature = Some(val);
        self
    }

    /// Builds the generation request with the configured parameters.
    pub fn build(self) -> GenerationRequest {
        GenerationRequest {
            prompt: self.prompt,
            model: self.model,
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
        }
    }
}

/// Trait for providers that support single-turn text generation.
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    /// Sends one generation request. Exactly one attempt: no retry, no
    /// fallback model. Fallback on a 404-class failure is a separate,
    /// caller-invoked path.
    ///
    /// # Arguments
    ///
    /// * `req` - The generation request parameters
    ///
    /// # Returns
    ///
    /// The generated text or an error
    async fn generate_text(&self, req: &GenerationRequest) -> Result<GenerationResponse, PipelineError>;
}
