use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::StepKey;

/// One generation exchange as the wizard sees it, independent of the
/// provider's HTTP shape. Serializable so transcripts can be persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub session: Uuid,
    pub timestamp: DateTime<Utc>,
    pub step: StepKey,
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub grounded: bool,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub text: String,
    pub disclaimer_appended: bool,
}
