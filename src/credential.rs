use std::fmt;

use crate::error::PipelineError;

/// An opaque API secret for one remote provider.
///
/// Surrounding whitespace is stripped on construction (pasted keys routinely
/// carry accidental spaces). The value lives only for the duration of one
/// request cycle and is never persisted. `Debug` output is redacted so the
/// secret cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Creates a credential from raw user input.
    ///
    /// # Arguments
    ///
    /// * `label` - Which provider this credential is for, used in the error
    ///   message when the input is blank
    /// * `raw` - The secret as entered by the user
    ///
    /// # Returns
    ///
    /// The trimmed credential, or `CredentialMissing` if the input is empty
    /// or whitespace-only.
    pub fn new(label: &str, raw: impl AsRef<str>) -> Result<Self, PipelineError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PipelineError::CredentialMissing(format!(
                "{} API key is empty",
                label
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the secret for use in a request header or query parameter.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let cred = Credential::new("Gemini", "  abc123  \n").unwrap();
        assert_eq!(cred.expose(), "abc123");
    }

    #[test]
    fn empty_input_is_credential_missing() {
        let err = Credential::new("ElevenLabs", "   ").unwrap_err();
        assert!(matches!(err, PipelineError::CredentialMissing(_)));
        assert!(err.to_string().contains("ElevenLabs"));
    }

    #[test]
    fn debug_output_is_redacted() {
        let cred = Credential::new("Gemini", "super-secret").unwrap();
        let rendered = format!("{:?}", cred);
        assert!(!rendered.contains("super-secret"));
    }
}
