//! Anthropic (Claude) client implementation

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use roster_protocol::{
    ContentBlock, Message, MessageContent, ModelResponse, Role, StopReason, TokenUsage, ToolSpec,
};

use crate::{traits::ModelResult, ModelClient, ProviderConfig, ProviderError};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: usize = 4096;

/// Anthropic API client
pub struct AnthropicClient {
    client: Client,
    config: ProviderConfig,
}

impl AnthropicClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = config.api_key.as_ref().ok_or_else(|| {
            ProviderError::Configuration("API key required for Anthropic".into())
        })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            api_key
                .expose_secret()
                .parse()
                .map_err(|_| ProviderError::Configuration("Invalid API key format".into()))?,
        );
        headers.insert(
            "anthropic-version",
            ANTHROPIC_VERSION
                .parse()
                .map_err(|_| ProviderError::Configuration("Invalid version header".into()))?,
        );

        let timeout = Duration::from_secs(config.timeout_seconds.unwrap_or(120));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, config })
    }

    fn build_request(&self, messages: &[Message], tools: &[ToolSpec]) -> AnthropicRequest {
        let (system, rest) = Self::extract_system(messages);

        AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages: rest.into_iter().map(convert_message).collect(),
            system,
            tools: if tools.is_empty() {
                None
            } else {
                Some(tools.to_vec())
            },
            temperature: self.config.temperature,
        }
    }

    fn extract_system(messages: &[Message]) -> (Option<String>, Vec<&Message>) {
        let mut system = None;
        let mut rest = Vec::new();

        for msg in messages {
            if msg.role == Role::System {
                if let MessageContent::Text(text) = &msg.content {
                    system = Some(text.clone());
                }
            } else {
                rest.push(msg);
            }
        }

        (system, rest)
    }

    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or("https://api.anthropic.com")
    }

    fn convert_response(&self, response: AnthropicResponse) -> ModelResponse {
        let content = response
            .content
            .into_iter()
            .map(|c| match c {
                AnthropicContent::Text { text } => ContentBlock::Text { text },
                AnthropicContent::ToolUse { id, name, input } => {
                    ContentBlock::ToolUse { id, name, input }
                }
                AnthropicContent::ToolResult {
                    tool_use_id,
                    content,
                    is_error,
                } => ContentBlock::ToolResult {
                    tool_use_id,
                    content,
                    is_error,
                },
            })
            .collect();

        let stop_reason = response.stop_reason.map(|r| match r.as_str() {
            "max_tokens" => StopReason::MaxTokens,
            "stop_sequence" => StopReason::StopSequence,
            "tool_use" => StopReason::ToolUse,
            _ => StopReason::EndTurn,
        });

        ModelResponse {
            id: response.id,
            model: response.model,
            content,
            stop_reason,
            usage: TokenUsage {
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
            },
        }
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn chat(&self, messages: &[Message], tools: &[ToolSpec]) -> ModelResult<ModelResponse> {
        let request = self.build_request(messages, tools);
        let url = format!("{}/v1/messages", self.base_url());

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited {
                    retry_after_ms: 60_000,
                });
            }

            return Err(ProviderError::InvalidResponse(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let api_response: AnthropicResponse = response.json().await?;
        tracing::debug!(model = %api_response.model, "model response received");
        Ok(self.convert_response(api_response))
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn provider(&self) -> &str {
        "anthropic"
    }
}

fn convert_message(msg: &Message) -> AnthropicMessage {
    let role = match msg.role {
        Role::Assistant => "assistant",
        // System turns are extracted before conversion.
        Role::User | Role::System => "user",
    };

    let content = match &msg.content {
        MessageContent::Text(text) => vec![AnthropicContent::Text { text: text.clone() }],
        MessageContent::Blocks(blocks) => blocks
            .iter()
            .map(|b| match b {
                ContentBlock::Text { text } => AnthropicContent::Text { text: text.clone() },
                ContentBlock::ToolUse { id, name, input } => AnthropicContent::ToolUse {
                    id: id.clone(),
                    name: name.clone(),
                    input: input.clone(),
                },
                ContentBlock::ToolResult {
                    tool_use_id,
                    content,
                    is_error,
                } => AnthropicContent::ToolResult {
                    tool_use_id: tool_use_id.clone(),
                    content: content.clone(),
                    is_error: *is_error,
                },
            })
            .collect(),
    };

    AnthropicMessage {
        role: role.to_string(),
        content,
    }
}

// API request/response types
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: usize,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AnthropicContent {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default)]
        is_error: bool,
    },
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    id: String,
    model: String,
    content: Vec<AnthropicContent>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u64,
    output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AnthropicClient {
        AnthropicClient::new(
            ProviderConfig::new("claude-sonnet-4-20250514")
                .with_api_key("test-key")
                .with_temperature(0.4),
        )
        .unwrap()
    }

    #[test]
    fn requires_api_key() {
        let err = AnthropicClient::new(ProviderConfig::new("claude-sonnet-4-20250514"));
        assert!(matches!(err, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn system_turn_lifted_out_of_messages() {
        let messages = vec![
            Message::system("You are the sales agent"),
            Message::user("Any new leads?"),
        ];
        let request = client().build_request(&messages, &[]);

        assert_eq!(request.system.as_deref(), Some("You are the sales agent"));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.temperature, Some(0.4));
    }

    #[test]
    fn converts_tool_use_response() {
        let api_response = AnthropicResponse {
            id: "msg_1".into(),
            model: "claude-sonnet-4-20250514".into(),
            content: vec![AnthropicContent::ToolUse {
                id: "tc_1".into(),
                name: "list_leads".into(),
                input: serde_json::json!({"stage": "new"}),
            }],
            stop_reason: Some("tool_use".into()),
            usage: AnthropicUsage {
                input_tokens: 12,
                output_tokens: 8,
            },
        };

        let response = client().convert_response(api_response);
        assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
        assert!(response.has_tool_calls());
        assert_eq!(response.usage.total(), 20);
    }
}
