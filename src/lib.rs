//! voicegenie is the core of a two-stage voice generation demo: a prompt is
//! sent to Google's Gemini API for text generation and the resulting text
//! is synthesized into speech through the ElevenLabs API.
//!
//! # Overview
//! The crate exposes three operations to its (external) presentation layer:
//!
//! - Model resolution: find a usable Gemini model for a credential, via
//!   the list-models endpoint or by probing a fixed candidate list
//! - Text generation: a single-turn completion against the resolved model
//! - Speech synthesis: turn the generated text into MPEG audio bytes
//!
//! # Architecture
//! Everything is scoped to one user-triggered request: credentials come in
//! through [`builder::PipelineBuilder`], the two remote calls run strictly
//! in sequence, and every failure is terminal for that request with the
//! provider's verbatim diagnostic attached.

// Re-export for convenience
pub use async_trait::async_trait;

/// Backend implementations for the Gemini and ElevenLabs APIs
pub mod backends;

/// Builder pattern for configuring and instantiating the pipeline
pub mod builder;

/// Single-turn text generation requests and provider trait
pub mod completion;

/// Opaque per-request API credentials
pub mod credential;

/// Error types and handling
pub mod error;

/// Listing models support
pub mod models;

/// Model resolution via discovery and candidate probing
pub mod resolver;

/// The two-stage generation pipeline and its per-request state machine
pub mod pipeline;

/// Text-to-speech support
pub mod tts;

pub use builder::PipelineBuilder;
pub use error::PipelineError;
pub use pipeline::{GenerationPipeline, PipelineRun};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
/// This is a no-op if the feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
