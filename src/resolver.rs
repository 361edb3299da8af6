//! Model resolution for the text-generation stage.
//!
//! Callers should not need to know which Gemini models are enabled for a
//! given credential. The resolver finds a usable model in two passes:
//! discovery through the list-models endpoint first, then best-effort
//! probing of a fixed priority list of candidates. Candidates are tried
//! strictly one at a time, first success wins, and individual probe
//! failures are collected into a [`ResolutionReport`] rather than
//! surfaced, so exhaustion behavior stays assertable without side-channel
//! logging.

use crate::{
    completion::{GenerationRequest, TextGenerationProvider},
    error::PipelineError,
    models::ModelsProvider,
};

/// Candidate model identifiers in priority order, fastest/cheapest first.
pub const MODEL_CANDIDATES: &[&str] = &[
    "gemini-1.5-flash",
    "gemini-1.5-flash-latest",
    "gemini-1.5-pro",
    "gemini-pro",
];

/// Fixed fallback model for the caller-invoked 404 path.
pub const FALLBACK_MODEL: &str = "gemini-pro";

/// Minimal prompt used to probe whether a candidate model accepts requests.
pub const PROBE_PROMPT: &str = "Hi";

/// How the resolved model was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// Selected from the provider's list-models response
    Discovery,
    /// Selected by trial invocation of the candidate list
    Probing,
}

/// Outcome of one candidate probe.
#[derive(Debug)]
pub struct CandidateAttempt {
    /// The model identifier that was probed
    pub model: String,
    /// The probe failure, or `None` if the candidate was accepted
    pub error: Option<PipelineError>,
}

/// Structured aggregate of one resolution pass.
#[derive(Debug)]
pub struct ResolutionReport {
    /// Why discovery was unavailable or yielded nothing, when it did
    pub discovery_error: Option<PipelineError>,
    /// Per-candidate probe outcomes, in attempt order
    pub attempts: Vec<CandidateAttempt>,
    /// The selected model and the strategy that produced it
    pub resolved: Option<(String, ResolutionStrategy)>,
}

impl ResolutionReport {
    /// The selected model identifier, if resolution succeeded.
    pub fn model(&self) -> Option<&str> {
        self.resolved.as_ref().map(|(model, _)| model.as_str())
    }
}

/// Resolves a usable text-generation model identifier for one credential.
///
/// Generic over the provider so the resolution logic can be exercised
/// without a live endpoint; in production the provider is
/// [`crate::backends::google::Google`].
pub struct ModelResolver<P> {
    provider: P,
    candidates: Vec<String>,
}

impl<P> ModelResolver<P>
where
    P: ModelsProvider + TextGenerationProvider,
{
    /// Creates a resolver over the default candidate list.
    pub fn new(provider: P) -> Self {
        Self::with_candidates(
            provider,
            MODEL_CANDIDATES.iter().map(|m| m.to_string()).collect(),
        )
    }

    /// Creates a resolver over a custom candidate list.
    pub fn with_candidates(provider: P, candidates: Vec<String>) -> Self {
        Self {
            provider,
            candidates,
        }
    }

    /// Produces a usable model identifier, or `ModelNotFound` when both
    /// discovery and probing come up empty.
    pub async fn resolve(&self) -> Result<String, PipelineError> {
        let report = self.resolve_with_report().await;
        match report.resolved {
            Some((model, _)) => Ok(model),
            None => Err(PipelineError::ModelNotFound(format!(
                "no available models for this credential ({} candidates tried)",
                report.attempts.len()
            ))),
        }
    }

    /// Runs one best-effort resolution pass and returns the full report.
    ///
    /// Discovery failures are recorded, never fatal. Probing stops at the
    /// first candidate that accepts the probe prompt; every earlier failure
    /// is kept in the report.
    pub async fn resolve_with_report(&self) -> ResolutionReport {
        let mut report = ResolutionReport {
            discovery_error: None,
            attempts: Vec::new(),
            resolved: None,
        };

        // Strategy A: discovery through the list-models endpoint.
        match self.provider.list_models().await {
            Ok(entries) => {
                if let Some(entry) = entries.iter().find(|e| e.supports_generation()) {
                    log::debug!("model resolved via discovery: {}", entry.id);
                    report.resolved = Some((entry.id.clone(), ResolutionStrategy::Discovery));
                    return report;
                }
                log::debug!(
                    "discovery returned {} models, none supporting generation",
                    entries.len()
                );
            }
            Err(err) => {
                log::debug!("model discovery unavailable: {}", err);
                report.discovery_error = Some(err);
            }
        }

        // Strategy B: probe the fixed candidate list in priority order.
        for candidate in &self.candidates {
            let probe = GenerationRequest::new(PROBE_PROMPT, candidate.clone());
            match self.provider.generate_text(&probe).await {
                Ok(_) => {
                    log::debug!("model resolved via probing: {}", candidate);
                    report.attempts.push(CandidateAttempt {
                        model: candidate.clone(),
                        error: None,
                    });
                    report.resolved = Some((candidate.clone(), ResolutionStrategy::Probing));
                    return report;
                }
                Err(err) => {
                    log::debug!("candidate {} rejected probe: {}", candidate, err);
                    report.attempts.push(CandidateAttempt {
                        model: candidate.clone(),
                        error: Some(err),
                    });
                }
            }
        }

        report
    }
}
