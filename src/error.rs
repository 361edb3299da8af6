use std::fmt;

/// Error types that can occur while resolving a model or running the
/// generation pipeline.
#[derive(Debug)]
pub enum PipelineError {
    /// A required credential was empty at request time. Raised before any
    /// remote call is made.
    CredentialMissing(String),
    /// Neither discovery nor probing yielded a usable text-generation model.
    ModelNotFound(String),
    /// Network-level failure reaching a remote endpoint (DNS, connection,
    /// transport timeout).
    HttpError(String),
    /// Remote endpoint reachable but returned a non-success status. The
    /// message is the verbatim response body; the status code is kept so
    /// callers can distinguish error classes (404 model-not-found etc).
    ProviderError {
        status: Option<u16>,
        message: String,
    },
    /// Success status but the response body was not valid JSON.
    JsonError(String),
    /// Success status and well-formed JSON, but the expected fields were
    /// missing. Carries the raw body so nothing is lost for diagnostics.
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// Invalid request parameters caught before sending.
    InvalidRequest(String),
}

impl PipelineError {
    /// Whether this error is a "model not found" class of provider failure,
    /// the only class for which the caller-invoked fallback model path
    /// applies.
    pub fn is_model_not_found(&self) -> bool {
        match self {
            PipelineError::ProviderError { status, message } => {
                *status == Some(404) || message.contains("NOT_FOUND")
            }
            _ => false,
        }
    }

    /// Whether this error looks like the speech provider's anti-automation
    /// block. There is no structured signal for this; the only way to tell
    /// it apart from other provider errors is the diagnostic text.
    pub fn is_anti_abuse_block(&self) -> bool {
        match self {
            PipelineError::ProviderError { message, .. } => {
                message.contains("unusual activity")
                    || message.contains("detected_unusual_activity")
            }
            _ => false,
        }
    }

    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            PipelineError::ProviderError { status, .. } => *status,
            _ => None,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::CredentialMissing(e) => write!(f, "Missing Credential: {}", e),
            PipelineError::ModelNotFound(e) => write!(f, "No Model Available: {}", e),
            PipelineError::HttpError(e) => write!(f, "HTTP Error: {}", e),
            PipelineError::ProviderError { status, message } => match status {
                Some(code) => write!(f, "Provider Error ({}): {}", code, message),
                None => write!(f, "Provider Error: {}", message),
            },
            PipelineError::JsonError(e) => write!(f, "JSON Parse Error: {}", e),
            PipelineError::ResponseFormatError {
                message,
                raw_response,
            } => {
                write!(f, "Response Format Error: {} (raw: {})", message, raw_response)
            }
            PipelineError::InvalidRequest(e) => write!(f, "Invalid Request: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

/// Converts reqwest transport errors into PipelineErrors
impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        PipelineError::HttpError(err.to_string())
    }
}
