use async_trait::async_trait;

use crate::config::Config;
use crate::errors::MemoError;
use crate::wire::GenerationRequest;

pub mod gemini;

/// Seam between the wizard and the hosted model. Implemented by the Gemini
/// adapter in production and by stubs in tests.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, req: &GenerationRequest, debug: bool) -> Result<String, MemoError>;
}

pub type DynGenerator = Box<dyn Generator + Send + Sync>;

/// Builds the provider for this session. An absent key is reported here,
/// before any request exists to send.
pub fn make_generator(api_key: String, cfg: &Config) -> Result<DynGenerator, MemoError> {
    if api_key.trim().is_empty() {
        return Err(MemoError::MissingCredential);
    }
    Ok(Box::new(gemini::GeminiProvider::new(
        api_key,
        cfg.api_base.clone(),
        cfg.timeout_secs,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected_before_any_call() {
        let cfg = Config::default();
        assert!(matches!(
            make_generator("   ".into(), &cfg),
            Err(MemoError::MissingCredential)
        ));
        assert!(make_generator("k".into(), &cfg).is_ok());
    }
}
