use chrono::Utc;

use crate::catalog::{self, StepKey};
use crate::config::Config;
use crate::errors::MemoError;
use crate::prompt;
use crate::provider::Generator;
use crate::session::Session;
use crate::wire::{GenerationRequest, GenerationResponse};

/// Marker the model inserts next to claims it already flagged for checking.
pub const VERIFY_MARKER: &str = "[VERIFY]";

/// Appended to grounded responses that carry no verification marker.
pub const GROUNDED_DISCLAIMER: &str =
    "\n\n*(Note: Please verify specific numbers against primary sources)*";

/// Runs one generation step: build the prompt, call the provider, store the
/// text. A failed call returns the error and leaves the store untouched for
/// that key. The returned pair is what transcripts persist.
pub async fn run_step(
    prov: &dyn Generator,
    cfg: &Config,
    session: &mut Session,
    key: StepKey,
    debug: bool,
) -> Result<(GenerationRequest, GenerationResponse), MemoError> {
    let spec = catalog::spec_of(key);
    let req = GenerationRequest {
        session: session.id,
        timestamp: Utc::now(),
        step: key,
        model: cfg.model.clone(),
        system: prompt::SYSTEM_INSTRUCTION.to_string(),
        prompt: prompt::build(key, &session.inputs, &session.results),
        grounded: spec.use_search,
        temperature: cfg.temperature,
    };

    let mut text = prov.generate(&req, debug).await?;

    let mut disclaimer_appended = false;
    if req.grounded && !text.contains(VERIFY_MARKER) {
        text.push_str(GROUNDED_DISCLAIMER);
        disclaimer_appended = true;
    }

    session.record(key, text.clone());
    Ok((req, GenerationResponse { text, disclaimer_appended }))
}
