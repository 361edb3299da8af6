use async_trait::async_trait;
use serde::Serialize;

use crate::error::PipelineError;

/// Voice-quality parameters sent with every synthesis request.
///
/// Both values live in [0, 1]; 0.5 is the provider's recommended middle
/// ground and the pipeline's fixed default.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoiceSettings {
    /// How consistent the voice stays across renditions
    pub stability: f32,
    /// How strongly the output is pushed toward the reference voice
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
        }
    }
}

/// Trait implemented by speech synthesis backends.
///
/// Implementors convert text into playable audio bytes. The full text is
/// sent as-is: no chunking, no length limit enforcement.
#[async_trait]
pub trait TextToSpeechProvider: Send + Sync {
    /// Convert the given text into speech audio.
    ///
    /// # Arguments
    ///
    /// * `text` - A string containing the text to convert to speech
    ///
    /// # Returns
    ///
    /// * `Result<Vec<u8>, PipelineError>` - On success, the audio data as raw
    ///   bytes (MPEG container), unmodified. On failure, a PipelineError
    ///   carrying the provider's verbatim diagnostic.
    async fn speech(&self, text: &str) -> Result<Vec<u8>, PipelineError>;
}
