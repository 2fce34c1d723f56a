//! `OpenAI` chat-completions type mapping.
//!
//! This module provides the message-array envelope used by `OpenAI` and every
//! `OpenAI`-compatible endpoint (including Gemini's compatibility layer).

use crate::inference::provider::JSON_MODE_INSTRUCTION;
use crate::inference::types::{GenerationRequest, GenerationResult, Message, Usage};
use serde::{Deserialize, Serialize};

/// `response_format` switch for native JSON mode
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ResponseFormat {
    /// Always `json_object`
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// `OpenAI` API chat request format
#[derive(Debug, Serialize)]
pub struct OpenAiChatRequest {
    /// The model identifier
    pub model: String,
    /// The conversation messages
    pub messages: Vec<Message>,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token cap
    pub max_tokens: u32,
    /// Native JSON mode, when requested and supported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Assistant message inside a choice
#[derive(Debug, Deserialize)]
pub struct OpenAiMessage {
    /// Generated text; absent for refusals and tool calls
    #[serde(default)]
    pub content: Option<String>,
}

/// `OpenAI` API choice structure
#[derive(Debug, Deserialize)]
pub struct OpenAiChoice {
    /// The generated message
    pub message: OpenAiMessage,
}

/// `OpenAI` API usage information
#[derive(Debug, Deserialize)]
pub struct OpenAiUsage {
    /// Number of tokens in the prompt
    #[serde(rename = "prompt_tokens")]
    pub prompt: u32,
    /// Number of tokens in the completion
    #[serde(rename = "completion_tokens")]
    pub completion: u32,
}

/// `OpenAI` API chat response format
#[derive(Debug, Deserialize)]
pub struct OpenAiChatResponse {
    /// The generated completion choices
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
    /// Token usage information if available
    pub usage: Option<OpenAiUsage>,
}

/// Creates an `OpenAI` API request from a generation request.
///
/// JSON mode becomes `response_format` when the backend supports it natively
/// and an injected system instruction otherwise.
#[must_use]
pub fn create_request(
    request: &GenerationRequest,
    model: &str,
    native_json_mode: bool,
) -> OpenAiChatRequest {
    let mut messages = request.messages.clone();
    let mut response_format = None;

    if request.json_mode {
        if native_json_mode {
            response_format = Some(ResponseFormat {
                kind: "json_object",
            });
        } else {
            messages.insert(0, Message::system(JSON_MODE_INSTRUCTION));
        }
    }

    OpenAiChatRequest {
        model: model.to_string(),
        messages,
        temperature: request.temperature,
        max_tokens: request.max_output_tokens,
        response_format,
    }
}

/// Maps an `OpenAI` API response to a [`GenerationResult`].
///
/// # Errors
///
/// Returns an error if no choice carries text content.
pub fn map_response(body: OpenAiChatResponse, model: &str) -> Result<GenerationResult, String> {
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| "No choices returned".to_string())?;

    let content = choice
        .message
        .content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| "Choice carried no content".to_string())?;

    let mut result = GenerationResult::new(content, model);
    if let Some(usage) = body.usage {
        result = result.with_usage(Usage::new(usage.prompt, usage.completion));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::types::Role;

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            "openai",
            vec![Message::system("You plan trips."), Message::user("Paris, 2 days")],
        )
        .with_temperature(0.3)
        .with_max_output_tokens(256)
    }

    #[test]
    fn test_create_request_plain() {
        let req = create_request(&request(), "gpt-4o-mini", true);
        assert_eq!(req.model, "gpt-4o-mini");
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.max_tokens, 256);
        assert!(req.response_format.is_none());
    }

    #[test]
    fn test_create_request_native_json_mode() {
        let req = create_request(&request().with_json_mode(true), "gpt-4o-mini", true);
        assert_eq!(
            req.response_format,
            Some(ResponseFormat {
                kind: "json_object"
            })
        );
        assert_eq!(req.messages.len(), 2);

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_create_request_injected_json_instruction() {
        let req = create_request(&request().with_json_mode(true), "llama-3", false);
        assert!(req.response_format.is_none());
        assert_eq!(req.messages.len(), 3);
        assert_eq!(req.messages[0].role, Role::System);
        assert_eq!(req.messages[0].content, JSON_MODE_INSTRUCTION);

        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_map_response_success() {
        let body: OpenAiChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Test response"}}],
                "usage":{"prompt_tokens":10,"completion_tokens":20,"total_tokens":30}}"#,
        )
        .unwrap();

        let result = map_response(body, "gpt-4o").unwrap();
        assert_eq!(result.content, "Test response");
        assert_eq!(result.model, "gpt-4o");
        assert_eq!(result.total_tokens(), Some(30));
    }

    #[test]
    fn test_map_response_no_choices() {
        let body: OpenAiChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(map_response(body, "gpt-4o").is_err());
    }

    #[test]
    fn test_map_response_null_content() {
        let body: OpenAiChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(map_response(body, "gpt-4o").is_err());
    }
}
