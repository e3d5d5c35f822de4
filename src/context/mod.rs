use serde::{Deserialize, Serialize};

use crate::errors::MemoError;

/// Free-text memo parameters supplied once per session and read by every
/// prompt build. No validation beyond what serde needs to parse them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserContext {
    pub topic: String,
    pub policymaker_type: String,
    pub audience: String,
    pub purpose: String,
    pub writer_role: String,
    pub institutional_context: String,
}

impl UserContext {
    /// The worked example offered as interactive defaults.
    pub fn sample() -> Self {
        Self {
            topic: "Affordable housing reform in Chicago".into(),
            policymaker_type: "City Budget Director".into(),
            audience: "City Budget Director's Office".into(),
            purpose: "Persuade adoption of pilot program".into(),
            writer_role: "Independent Analyst".into(),
            institutional_context: "Urban Policy Institute".into(),
        }
    }
}

/// Parses a JSON-encoded array of field sets. The only validation is that
/// the text parses; anything else is the user's business.
pub fn parse_input_sets(raw: &str) -> Result<Vec<UserContext>, MemoError> {
    serde_json::from_str(raw).map_err(|e| MemoError::InvalidInput(format!("input sets: {e}")))
}
