use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoError {
    #[error("no API key provided; set GEMINI_API_KEY or pass --api-key")]
    MissingCredential,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("provider error ({code}): {message}")]
    Provider { code: u16, message: String },
    #[error("unexpected error: {0}")]
    Unknown(String),
}

/// Optional one-line hint rendered under the error message.
/// Kept separate from the enum so display stays a pure lookup.
pub fn hint(err: &MemoError) -> Option<&'static str> {
    match err {
        MemoError::MissingCredential => {
            Some("Get a free key at https://aistudio.google.com/.")
        }
        MemoError::Provider { code: 400, message } if message.contains("google_search") => {
            Some("The google_search tool needs a model with grounding support; try gemini-1.5-pro.")
        }
        MemoError::Provider { code: 400, .. } => {
            Some("Check that your API key supports the requested model.")
        }
        MemoError::Provider { code: 401 | 403, .. } => {
            Some("The key was rejected; re-check the API key value.")
        }
        MemoError::Provider { code: 429, .. } => {
            Some("Free-tier keys rate-limit grounded requests; wait a moment and regenerate.")
        }
        _ => None,
    }
}
