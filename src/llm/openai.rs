//! OpenAI-compatible chat-completions client.
//!
//! Calls the Chat Completions REST API directly over `reqwest`, so any
//! OpenAI-compatible endpoint works. Implements both collaborator traits:
//! [`CompletionClient`] for the orchestrator's tool-calling runs and
//! [`VisionClient`] for multimodal image analysis.

use crate::llm::client::{ChatMessage, CompletionClient, CompletionResponse, VisionClient};
use crate::types::{AppError, ImageReference, ImageSource, Result, ToolCall, ToolDefinition};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default public OpenAI endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

const VISION_MAX_TOKENS: u32 = 1000;
const VISION_TEMPERATURE: f32 = 0.2;

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    vision_model: String,
}

impl OpenAIClient {
    /// Create a client against `api_base` using `model` for text runs and
    /// `vision_model` for image analysis.
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
        vision_model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            api_base: api_base.into(),
            model: model.into(),
            vision_model: vision_model.into(),
        }
    }

    async fn send(&self, request: &ChatCompletionRequest<'_>) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.api_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Completion(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|wrapper| wrapper.error.message)
                .unwrap_or(body);
            return Err(AppError::Completion(format!(
                "endpoint returned {}: {}",
                status, message
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Completion(format!("failed to parse response: {}", e)))
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<CompletionResponse> {
        let wire_messages: Vec<WireMessage> = messages.iter().map(WireMessage::from_chat).collect();

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: wire_messages,
            tools: if tools.is_empty() {
                None
            } else {
                Some(tools.iter().map(WireTool::from_definition).collect())
            },
            tool_choice: if tools.is_empty() { None } else { Some("auto") },
            max_tokens: None,
            temperature: None,
        };

        let parsed = self.send(&request).await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Completion("no choices in response".to_string()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                id: call.id,
                name: call.function.name,
                arguments: serde_json::from_str(&call.function.arguments)
                    .unwrap_or(serde_json::json!({})),
            })
            .collect();

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            finish_reason: choice.finish_reason.unwrap_or_else(|| "unknown".to_string()),
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl VisionClient for OpenAIClient {
    async fn analyze(&self, image: &ImageReference, instruction: &str) -> Result<String> {
        let url = match image.source {
            ImageSource::Url => image.content.clone(),
            // The upload pipeline normalizes inline payloads to JPEG.
            ImageSource::InlineData => format!("data:image/jpeg;base64,{}", image.content),
        };

        let parts = vec![
            ContentPart::Text {
                text: instruction.to_string(),
            },
            ContentPart::ImageUrl {
                image_url: WireImageUrl {
                    url,
                    detail: "high",
                },
            },
        ];

        let request = ChatCompletionRequest {
            model: &self.vision_model,
            messages: vec![WireMessage {
                role: "user",
                content: Some(WireContent::Parts(parts)),
                tool_calls: None,
                tool_call_id: None,
            }],
            tools: None,
            tool_choice: None,
            max_tokens: Some(VISION_MAX_TOKENS),
            temperature: Some(VISION_TEMPERATURE),
        };

        let parsed = self
            .send(&request)
            .await
            .map_err(|e| AppError::Vision(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::Vision("empty response from vision model".to_string()))
    }
}

// ============= Wire Types =============

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

impl<'a> WireMessage<'a> {
    fn from_chat(message: &'a ChatMessage) -> Self {
        let tool_calls = if message.tool_calls.is_empty() {
            None
        } else {
            Some(
                message
                    .tool_calls
                    .iter()
                    .map(|call| WireToolCall {
                        id: call.id.clone(),
                        kind: "function",
                        function: WireFunctionCall {
                            name: call.name.clone(),
                            arguments: call.arguments.to_string(),
                        },
                    })
                    .collect(),
            )
        };

        Self {
            role: &message.role,
            content: Some(WireContent::Text(message.content.clone())),
            tool_calls,
            tool_call_id: message.tool_call_id.as_deref(),
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum WireContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: WireImageUrl },
}

#[derive(Serialize)]
struct WireImageUrl {
    url: String,
    detail: &'static str,
}

#[derive(Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction<'a>,
}

impl<'a> WireTool<'a> {
    fn from_definition(definition: &'a ToolDefinition) -> Self {
        Self {
            kind: "function",
            function: WireFunction {
                name: &definition.name,
                description: &definition.description,
                parameters: &definition.parameters,
            },
        }
    }
}

#[derive(Serialize)]
struct WireFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Serialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunctionCall,
}

#[derive(Serialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ResponseToolCall>>,
}

#[derive(Deserialize)]
struct ResponseToolCall {
    id: String,
    function: ResponseFunctionCall,
}

#[derive(Deserialize)]
struct ResponseFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}
