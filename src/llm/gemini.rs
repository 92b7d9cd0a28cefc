//! Gemini `generateContent` client.

use std::time::Duration;

use reqwest::Client;

use crate::constants::USER_AGENT;
use crate::error::{Result, TrailError};
use crate::models::{Content, GenerateContentRequest, GenerateContentResponse, Part};

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(api_base: &str, model: &str, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                api_base.trim_end_matches('/'),
                model
            ),
            api_key,
        })
    }

    pub async fn complete(&self, prompt: &str) -> Result<String> {
        tracing::info!("Sending prompt to Gemini ({} chars)", prompt.len());

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("Gemini returned status {}", response.status());
            return Err(TrailError::Status {
                service: "language model",
                status: response.status(),
            });
        }

        let reply: GenerateContentResponse = response.json().await?;
        reply_text(reply)
    }
}

fn reply_text(reply: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = reply.candidates.into_iter().next() else {
        return Err(match reply.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => TrailError::Blocked(reason),
            None => TrailError::EmptyCompletion,
        });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        tracing::warn!(
            "Gemini candidate had no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        );
        return Err(TrailError::EmptyCompletion);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn joins_text_parts_of_the_first_candidate() {
        let reply = parse(serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Hello " }, { "text": "trails" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }));
        assert_eq!(reply_text(reply).unwrap(), "Hello trails");
    }

    #[test]
    fn block_reason_surfaces_when_there_are_no_candidates() {
        let reply = parse(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }));
        match reply_text(reply) {
            Err(TrailError::Blocked(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn no_candidates_without_a_block_reason_is_empty() {
        let reply = parse(serde_json::json!({ "candidates": [] }));
        assert!(matches!(reply_text(reply), Err(TrailError::EmptyCompletion)));

        let reply = parse(serde_json::json!({ "promptFeedback": {} }));
        assert!(matches!(reply_text(reply), Err(TrailError::EmptyCompletion)));
    }

    #[test]
    fn candidate_without_text_is_empty() {
        let reply = parse(serde_json::json!({
            "candidates": [{ "finishReason": "MAX_TOKENS" }]
        }));
        assert!(matches!(reply_text(reply), Err(TrailError::EmptyCompletion)));
    }
}
