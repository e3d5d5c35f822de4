use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Generator;
use crate::errors::MemoError;
use crate::wire::GenerationRequest;

/// Adapter for the Gemini `generateContent` endpoint.
pub struct GeminiProvider {
    api_key: String,
    api_base: String,
    timeout: Duration,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    // Omitted entirely for ungrounded calls; the API treats an explicit
    // empty list differently from no list on some model versions.
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ReplyContent,
}

#[derive(Deserialize)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, api_base: String, timeout_secs: u64) -> Self {
        Self { api_key, api_base, timeout: Duration::from_secs(timeout_secs) }
    }
}

#[async_trait]
impl Generator for GeminiProvider {
    async fn generate(&self, req: &GenerationRequest, debug: bool) -> Result<String, MemoError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            req.model
        );

        let tools = req.grounded.then(|| vec![Tool { google_search: GoogleSearch {} }]);
        let body = GenerateBody {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: &req.system }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: &req.prompt }],
            }],
            tools,
            generation_config: GenerationConfig { temperature: req.temperature },
        };

        if debug {
            eprintln!("debug[gemini]: POST {} (grounded: {})", url, req.grounded);
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| MemoError::Unknown(e.to_string()))?;

        let resp = client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| MemoError::Unknown(format!("request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| MemoError::Unknown(format!("read body failed: {e}")))?;

        if debug {
            eprintln!("debug[gemini]: status {}", status);
        }

        if !status.is_success() {
            // The provider puts the authoritative code/message in the body;
            // fall back to the HTTP status when the body isn't its error shape.
            return Err(match serde_json::from_str::<ApiError>(&text) {
                Ok(api) => MemoError::Provider {
                    code: if api.error.code != 0 { api.error.code } else { status.as_u16() },
                    message: api.error.message,
                },
                Err(_) => MemoError::Provider { code: status.as_u16(), message: text },
            });
        }

        let reply: GenerateReply = serde_json::from_str(&text)
            .map_err(|e| MemoError::Unknown(format!("response parse error: {e}")))?;

        let content: String = reply
            .candidates
            .first()
            .map(|c| c.content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(MemoError::Unknown("provider returned no text".into()));
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_body_carries_the_search_tool_ungrounded_omits_it() {
        let grounded = GenerateBody {
            system_instruction: Content { role: None, parts: vec![Part { text: "sys" }] },
            contents: vec![Content { role: Some("user"), parts: vec![Part { text: "p" }] }],
            tools: Some(vec![Tool { google_search: GoogleSearch {} }]),
            generation_config: GenerationConfig { temperature: 0.3 },
        };
        let json = serde_json::to_value(&grounded).unwrap();
        assert_eq!(json["tools"][0]["google_search"], serde_json::json!({}));
        let temp = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.3).abs() < 1e-6);

        let ungrounded = GenerateBody { tools: None, ..grounded };
        let json = serde_json::to_value(&ungrounded).unwrap();
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn error_bodies_map_to_provider_errors() {
        let raw = r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        let api: ApiError = serde_json::from_str(raw).unwrap();
        assert_eq!(api.error.code, 429);
        assert_eq!(api.error.message, "quota exceeded");
    }

    #[test]
    fn reply_text_is_joined_across_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}}]}"#;
        let reply: GenerateReply = serde_json::from_str(raw).unwrap();
        let content: String = reply.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(content, "ab");
    }
}
