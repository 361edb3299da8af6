//! Builder for configuring and instantiating the generation pipeline.
//!
//! All configuration is per-call: a builder is filled in from the current
//! form inputs, `build()` validates them, and the resulting pipeline is
//! dropped when the request finishes. There is no process-wide mutable
//! configuration.

use crate::{
    backends::{elevenlabs, google, elevenlabs::ElevenLabs, google::Google},
    credential::Credential,
    error::PipelineError,
    pipeline::GenerationPipeline,
    tts::VoiceSettings,
};

/// Fluent builder for [`GenerationPipeline`].
///
/// Both API keys are mandatory; everything else has a fixed default
/// matching the provider conventions (voice "Rachel", multilingual
/// synthesis model, 0.5/0.5 voice settings, transport-default timeout).
#[derive(Default)]
pub struct PipelineBuilder {
    /// API key for the text-generation provider
    text_api_key: Option<String>,
    /// API key for the speech-synthesis provider
    speech_api_key: Option<String>,
    /// Voice ID addressed in the synthesis URL path
    voice: Option<String>,
    /// Voice-quality parameters
    voice_settings: Option<VoiceSettings>,
    /// Request timeout in seconds for both providers
    timeout_seconds: Option<u64>,
    /// Override for the text provider base URL (tests)
    text_base_url: Option<String>,
    /// Override for the speech provider base URL (tests)
    speech_base_url: Option<String>,
}

impl PipelineBuilder {
    /// Creates a new empty builder instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Gemini API key.
    pub fn text_api_key(mut self, key: impl Into<String>) -> Self {
        self.text_api_key = Some(key.into());
        self
    }

    /// Sets the ElevenLabs API key.
    pub fn speech_api_key(mut self, key: impl Into<String>) -> Self {
        self.speech_api_key = Some(key.into());
        self
    }

    /// Overrides the synthesis voice.
    pub fn voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice = Some(voice_id.into());
        self
    }

    /// Overrides the voice-quality parameters.
    pub fn voice_settings(mut self, settings: VoiceSettings) -> Self {
        self.voice_settings = Some(settings);
        self
    }

    /// Sets the request timeout for both providers.
    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Points the text provider at a different base URL.
    pub fn text_base_url(mut self, url: impl Into<String>) -> Self {
        self.text_base_url = Some(url.into());
        self
    }

    /// Points the speech provider at a different base URL.
    pub fn speech_base_url(mut self, url: impl Into<String>) -> Self {
        self.speech_base_url = Some(url.into());
        self
    }

    /// Validates the configuration and builds the pipeline.
    ///
    /// Fails with `CredentialMissing` before any remote call when either
    /// API key is absent, empty, or whitespace-only.
    pub fn build(self) -> Result<GenerationPipeline, PipelineError> {
        let text_key = Credential::new("Gemini", self.text_api_key.unwrap_or_default())?;
        let speech_key = Credential::new("ElevenLabs", self.speech_api_key.unwrap_or_default())?;

        let google = Google::with_base_url(
            text_key,
            self.text_base_url
                .unwrap_or_else(|| google::DEFAULT_BASE_URL.to_string()),
            self.timeout_seconds,
        );

        let mut labs = ElevenLabs::with_base_url(
            speech_key,
            self.speech_base_url
                .unwrap_or_else(|| elevenlabs::DEFAULT_BASE_URL.to_string()),
            self.timeout_seconds,
        );
        if let Some(voice) = self.voice {
            labs = labs.voice(voice);
        }
        if let Some(settings) = self.voice_settings {
            labs = labs.voice_settings(settings);
        }

        Ok(GenerationPipeline {
            google,
            elevenlabs: labs,
        })
    }
}
