/// LLM Client — the single point of entry for all chat-completion calls.
///
/// Speaks the OpenAI-compatible `chat/completions` wire format. The endpoint,
/// key and model are chosen per request, so one pooled client serves every
/// caller. Exactly one POST per call: no retries.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Sampling temperature sent with every completion request.
pub const TEMPERATURE: f32 = 0.75;
/// Output cap sent with every completion request.
pub const MAX_TOKENS: u32 = 900;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),
}

/// Where and as whom a completion request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionTarget {
    /// Full URL of the chat-completions endpoint.
    pub api_base: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat-completion response. Every level is optional: providers differ and
/// the only thing relied upon is the first choice's message content.
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletion {
    /// Trimmed content of the first choice, or `None` if absent or blank.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    timeout: Duration,
}

impl LlmClient {
    pub fn new(timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends `[system, user]` to the target endpoint and decodes the reply.
    ///
    /// The whole exchange (connect, send, read body) is cancelled once the
    /// client timeout elapses. A non-2xx status yields `LlmError::Api` with the
    /// raw response body.
    pub async fn complete(
        &self,
        target: &CompletionTarget,
        system: &str,
        prompt: &str,
    ) -> Result<ChatCompletion, LlmError> {
        let request_body = ChatRequest {
            model: &target.model,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let exchange = async {
            let response = self
                .client
                .post(&target.api_base)
                .bearer_auth(&target.api_key)
                .json(&request_body)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    body,
                });
            }

            let completion: ChatCompletion = serde_json::from_str(&body)?;
            debug!(
                "LLM call succeeded: status={}, choices={}",
                status,
                completion.choices.len()
            );
            Ok(completion)
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn target(server: &MockServer) -> CompletionTarget {
        CompletionTarget {
            api_base: format!("{}/v1/chat/completions", server.uri()),
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
        }
    }

    #[test]
    fn test_first_text_trims_content() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": "  hello \n" } }]
        }))
        .unwrap();
        assert_eq!(completion.first_text(), Some("hello"));
    }

    #[test]
    fn test_first_text_none_for_missing_levels() {
        for value in [
            json!({}),
            json!({ "choices": [] }),
            json!({ "choices": [{}] }),
            json!({ "choices": [{ "message": {} }] }),
            json!({ "choices": [{ "message": { "content": null } }] }),
            json!({ "choices": [{ "message": { "content": "   " } }] }),
        ] {
            let completion: ChatCompletion = serde_json::from_value(value.clone()).unwrap();
            assert_eq!(completion.first_text(), None, "payload: {value}");
        }
    }

    #[test]
    fn test_first_text_only_reads_first_choice() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "choices": [
                { "message": { "content": "" } },
                { "message": { "content": "second" } }
            ]
        }))
        .unwrap();
        assert_eq!(completion.first_text(), None);
    }

    #[tokio::test]
    async fn test_complete_sends_bearer_and_fixed_sampling() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(bearer_token("test-key"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "temperature": 0.75,
                "max_tokens": 900,
                "messages": [
                    { "role": "system", "content": "persona" },
                    { "role": "user", "content": "prompt" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "content": "done" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new(Duration::from_secs(5)).unwrap();
        let completion = client
            .complete(&target(&server), "persona", "prompt")
            .await
            .unwrap();
        assert_eq!(completion.first_text(), Some("done"));
    }

    #[tokio::test]
    async fn test_complete_returns_raw_body_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new(Duration::from_secs(5)).unwrap();
        let err = client
            .complete(&target(&server), "persona", "prompt")
            .await
            .unwrap_err();
        match err {
            LlmError::Api { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "choices": [] }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = LlmClient::new(Duration::from_millis(100)).unwrap();
        let err = client
            .complete(&target(&server), "persona", "prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Timeout(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_complete_rejects_non_json_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = LlmClient::new(Duration::from_secs(5)).unwrap();
        let err = client
            .complete(&target(&server), "persona", "prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)), "got {err:?}");
    }
}
