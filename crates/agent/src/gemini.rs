//! Gemini `generateContent` client.
//!
//! Auth is an API key passed as the `key` query parameter. The system
//! instruction travels in `systemInstruction`; conversation turns map to
//! `contents` with assistant turns relabeled `model`. Gemini has no
//! first-class system role inside `contents`, so system turns are folded
//! into user parts with a `System:` prefix.

use std::time::Duration;

use async_trait::async_trait;
use scout_core::config::LlmConfig;
use scout_core::{Role, Turn};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::oracle::{Oracle, OracleError};

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

impl GeminiClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, OracleError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| OracleError::Transport("llm.api_key is not configured".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl Oracle for GeminiClient {
    async fn complete(&self, instruction: &str, turns: &[Turn]) -> Result<String, OracleError> {
        let body = build_body(instruction, turns);
        debug!(
            event_name = "oracle.request",
            model = %self.model,
            turn_count = turns.len(),
            "sending completion request"
        );

        let response = self
            .http
            .post(self.generate_url())
            .query(&[("key", self.api_key.expose_secret())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(OracleError::Api {
                status: status.as_u16(),
                message: extract_api_message(&raw),
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        extract_completion_text(payload)
    }
}

fn build_body(instruction: &str, turns: &[Turn]) -> Value {
    let contents: Vec<Value> = turns
        .iter()
        .map(|turn| match turn.role {
            Role::User => json!({"role": "user", "parts": [{"text": turn.text}]}),
            Role::Assistant => json!({"role": "model", "parts": [{"text": turn.text}]}),
            Role::System => {
                json!({"role": "user", "parts": [{"text": format!("System: {}", turn.text)}]})
            }
        })
        .collect();

    json!({
        "contents": contents,
        "systemInstruction": {"parts": [{"text": instruction}]},
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

fn extract_completion_text(payload: GenerateContentResponse) -> Result<String, OracleError> {
    let text = payload
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content.parts.into_iter().filter_map(|part| part.text).collect::<Vec<_>>().join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(OracleError::EmptyCompletion);
    }
    Ok(text)
}

/// Pulls `error.message` out of a Gemini error body, falling back to the
/// raw text when the body is not the documented JSON shape.
fn extract_api_message(raw: &str) -> String {
    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|value| {
            value.get("error")?.get("message")?.as_str().map(str::to_string)
        })
        .unwrap_or_else(|| raw.trim().to_string())
}

#[cfg(test)]
mod tests {
    use scout_core::Turn;

    use super::{
        build_body, extract_api_message, extract_completion_text, GenerateContentResponse,
    };
    use crate::oracle::OracleError;

    #[test]
    fn body_maps_roles_and_carries_system_instruction() {
        let turns = [
            Turn::system("screening assistant"),
            Turn::user("hi"),
            Turn::assistant("hello, what is your name?"),
        ];
        let body = build_body("greet the candidate", &turns);

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "greet the candidate");
        let contents = body["contents"].as_array().expect("contents array");
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "System: screening assistant");
        assert_eq!(contents[1]["role"], "user");
        assert_eq!(contents[2]["role"], "model");
    }

    #[test]
    fn completion_text_joins_candidate_parts() {
        let payload: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Welcome "},{"text":"aboard!"}]}}]}"#,
        )
        .expect("payload parses");

        assert_eq!(extract_completion_text(payload).expect("text"), "Welcome aboard!");
    }

    #[test]
    fn empty_candidates_surface_as_empty_completion() {
        let payload: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[]}"#).expect("payload parses");
        assert!(matches!(extract_completion_text(payload), Err(OracleError::EmptyCompletion)));
    }

    #[test]
    fn api_message_prefers_structured_error_body() {
        let raw = r#"{"error":{"code":429,"message":"quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(extract_api_message(raw), "quota exceeded");
        assert_eq!(extract_api_message("  upstream timeout  "), "upstream timeout");
    }
}
