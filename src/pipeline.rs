//! The two-stage generation pipeline.
//!
//! One user action maps to one [`GenerationPipeline`] run:
//!
//! ```text
//! Idle -> ResolvingModel -> GeneratingText -> SynthesizingAudio -> Done
//! ```
//!
//! The two remote calls are strictly sequential (synthesis consumes the
//! generated text) and every failure transition is terminal for the
//! request. A new user action builds a fresh pipeline; nothing is shared
//! across requests.

use std::fmt;

use crate::{
    backends::{elevenlabs::ElevenLabs, google::Google},
    completion::{GenerationRequest, TextGenerationProvider},
    error::PipelineError,
    resolver::{ModelResolver, FALLBACK_MODEL},
    tts::TextToSpeechProvider,
};

/// States of one pipeline run, in order. Transitions are logged at debug
/// level; failures leave the run in whatever stage they occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    ResolvingModel,
    GeneratingText,
    SynthesizingAudio,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::ResolvingModel => "resolving-model",
            PipelineStage::GeneratingText => "generating-text",
            PipelineStage::SynthesizingAudio => "synthesizing-audio",
            PipelineStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Successful outcome of a full pipeline run.
#[derive(Debug)]
pub struct PipelineRun {
    /// The resolved text-generation model
    pub model: String,
    /// The generated text, exactly as returned by the text stage
    pub text: String,
    /// Raw MPEG audio bytes from the synthesis stage
    pub audio: Vec<u8>,
}

/// Orchestrates model resolution, text generation and speech synthesis
/// for one request.
///
/// Built per user action via [`crate::builder::PipelineBuilder`], which
/// validates both credentials before any remote call can happen. The
/// presentation layer gets exactly three entry points —
/// [`resolve_model`](Self::resolve_model),
/// [`generate_text`](Self::generate_text) and
/// [`synthesize_speech`](Self::synthesize_speech) — plus
/// [`run`](Self::run) chaining them.
#[derive(Debug)]
pub struct GenerationPipeline {
    pub(crate) google: Google,
    pub(crate) elevenlabs: ElevenLabs,
}

impl GenerationPipeline {
    /// Determines which text-generation model is usable for the configured
    /// credential. See [`crate::resolver`] for the discovery/probing order.
    pub async fn resolve_model(&self) -> Result<String, PipelineError> {
        ModelResolver::new(self.google.clone()).resolve().await
    }

    /// Requests a text completion from the given model. Single attempt; a
    /// model-not-found failure is returned to the caller untouched.
    pub async fn generate_text(
        &self,
        prompt: &str,
        model: &str,
    ) -> Result<String, PipelineError> {
        let req = GenerationRequest::new(prompt, model);
        let resp = self.google.generate_text(&req).await?;
        Ok(resp.text)
    }

    /// Requests a text completion, explicitly falling back to
    /// [`FALLBACK_MODEL`] when the primary model fails with a 404-class
    /// error. This is the only fallback path; nothing retries on its own.
    pub async fn generate_text_with_fallback(
        &self,
        prompt: &str,
        model: &str,
    ) -> Result<String, PipelineError> {
        match self.generate_text(prompt, model).await {
            Ok(text) => Ok(text),
            Err(err) if err.is_model_not_found() && model != FALLBACK_MODEL => {
                log::debug!(
                    "model {} not found, falling back to {}",
                    model,
                    FALLBACK_MODEL
                );
                self.generate_text(prompt, FALLBACK_MODEL).await
            }
            Err(err) => Err(err),
        }
    }

    /// Synthesizes speech for the given text, returning raw audio bytes.
    pub async fn synthesize_speech(&self, text: &str) -> Result<Vec<u8>, PipelineError> {
        self.elevenlabs.speech(text).await
    }

    /// Runs the full state machine for one prompt.
    ///
    /// Strictly sequential: synthesis never starts until text generation
    /// has returned. Any failure is terminal for this run and surfaced
    /// verbatim; the pipeline itself stays usable for the next action.
    pub async fn run(&self, prompt: &str) -> Result<PipelineRun, PipelineError> {
        log::debug!("pipeline stage: {}", PipelineStage::ResolvingModel);
        let model = self.resolve_model().await?;

        log::debug!("pipeline stage: {}", PipelineStage::GeneratingText);
        let text = self.generate_text_with_fallback(prompt, &model).await?;

        log::debug!("pipeline stage: {}", PipelineStage::SynthesizingAudio);
        let audio = self.synthesize_speech(&text).await?;

        log::debug!("pipeline stage: {}", PipelineStage::Done);
        Ok(PipelineRun { model, text, audio })
    }
}
