//! ElevenLabs speech synthesis client.
//!
//! Converts generated text into playable MPEG audio through the ElevenLabs
//! text-to-speech API. Requests carry a browser-like `User-Agent`: calls
//! without one are known to trip the provider's anti-automation blocking
//! when made from data-center network ranges. That mitigation is
//! best-effort; a block still surfaces as a `ProviderError` whose body
//! mentions unusual activity (see `PipelineError::is_anti_abuse_block`).

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::{
    credential::Credential,
    error::PipelineError,
    tts::{TextToSpeechProvider, VoiceSettings},
};

/// Default base URL for the ElevenLabs API.
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Fixed voice used for synthesis ("Rachel").
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

/// Fixed synthesis model.
pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// Browser-like client identity presented to the synthesis provider.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// ElevenLabs text-to-speech backend.
#[derive(Debug)]
pub struct ElevenLabs {
    /// API key for ElevenLabs authentication
    api_key: Credential,
    /// Synthesis model identifier
    model_id: String,
    /// Voice ID addressed in the URL path
    voice_id: String,
    /// Voice-quality parameters sent with every request
    voice_settings: VoiceSettings,
    /// Base URL for API requests
    base_url: String,
    /// Optional timeout duration in seconds
    timeout_seconds: Option<u64>,
    /// HTTP client for making requests
    client: Client,
}

impl ElevenLabs {
    /// Creates a new ElevenLabs client with the default voice, model and
    /// voice settings.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for ElevenLabs authentication
    /// * `timeout_seconds` - Optional timeout duration in seconds
    pub fn new(api_key: Credential, timeout_seconds: Option<u64>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, timeout_seconds)
    }

    /// Creates a client against a non-default base URL (used by tests).
    pub fn with_base_url(
        api_key: Credential,
        base_url: impl Into<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        Self {
            api_key,
            model_id: DEFAULT_MODEL_ID.to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            voice_settings: VoiceSettings::default(),
            base_url: base_url.into(),
            timeout_seconds,
            client: Client::new(),
        }
    }

    /// Overrides the voice addressed in the URL path.
    pub fn voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }

    /// Overrides the voice-quality parameters.
    pub fn voice_settings(mut self, settings: VoiceSettings) -> Self {
        self.voice_settings = settings;
        self
    }
}

#[async_trait]
impl TextToSpeechProvider for ElevenLabs {
    /// Converts text to speech using the ElevenLabs API.
    ///
    /// The full text is sent verbatim in one request. On success the raw
    /// audio bytes are returned unmodified; on a non-success status the
    /// verbatim response body becomes the diagnostic.
    async fn speech(&self, text: &str) -> Result<Vec<u8>, PipelineError> {
        let url = format!(
            "{base}/text-to-speech/{voice}",
            base = self.base_url,
            voice = self.voice_id
        );

        let body = serde_json::json!({
            "text": text,
            "model_id": self.model_id,
            "voice_settings": self.voice_settings,
        });

        let mut req = self
            .client
            .post(&url)
            .header("Accept", "audio/mpeg")
            .header("Content-Type", "application/json")
            .header("xi-api-key", self.api_key.expose())
            .header("User-Agent", BROWSER_USER_AGENT)
            .json(&body);

        if let Some(t) = self.timeout_seconds {
            req = req.timeout(Duration::from_secs(t));
        }

        let resp = req.send().await?;
        let status = resp.status();
        log::debug!("ElevenLabs text-to-speech HTTP status: {}", status);

        if !status.is_success() {
            let diagnostic = resp.text().await?;
            return Err(PipelineError::ProviderError {
                status: Some(status.as_u16()),
                message: diagnostic,
            });
        }

        let audio_data = resp.bytes().await?;
        Ok(audio_data.to_vec())
    }
}
