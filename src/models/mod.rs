use async_trait::async_trait;

use crate::error::PipelineError;

/// The generation method a model must support to be usable for the text
/// stage of the pipeline.
pub const GENERATE_CONTENT_METHOD: &str = "generateContent";

/// One model descriptor returned by a provider's list-models endpoint.
#[derive(Debug, Clone)]
pub struct ModelEntry {
    /// Bare model identifier with any resource prefix stripped
    /// (e.g. "gemini-1.5-flash", not "models/gemini-1.5-flash")
    pub id: String,
    /// Generation methods this model supports
    pub supported_generation_methods: Vec<String>,
    /// The raw descriptor as returned by the provider
    pub raw: serde_json::Value,
}

impl ModelEntry {
    /// Whether this model can serve content-generation requests.
    pub fn supports_generation(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == GENERATE_CONTENT_METHOD)
    }
}

/// Trait for providers that can list the models enabled for a credential.
#[async_trait]
pub trait ModelsProvider {
    /// Asynchronously retrieves the list of available model descriptors from
    /// the provider.
    ///
    /// # Returns
    ///
    /// List of model descriptors or error
    async fn list_models(&self) -> Result<Vec<ModelEntry>, PipelineError> {
        Err(PipelineError::ProviderError {
            status: None,
            message: "List Models not supported".to_string(),
        })
    }
}
