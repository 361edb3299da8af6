//! Backend implementations for the two remote providers the pipeline
//! talks to: Google Gemini for text generation and ElevenLabs for speech
//! synthesis.

pub mod elevenlabs;
pub mod google;
