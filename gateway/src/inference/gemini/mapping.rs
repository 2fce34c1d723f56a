//! Gemini `generateContent` type mapping.
//!
//! This module provides the contents/parts envelope used by Gemini's native
//! REST API.

use crate::inference::provider::JSON_MODE_INSTRUCTION;
use crate::inference::types::{GenerationRequest, GenerationResult, Message, Role, Usage};
use serde::{Deserialize, Serialize};

/// MIME type requesting native JSON output
pub const JSON_MIME_TYPE: &str = "application/json";

/// One text part of a content block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeminiPart {
    /// Text of the part; absent for non-text parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A content block (one conversation turn)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeminiContent {
    /// `user` or `model`; omitted for system instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts of the turn
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// Sampling and output settings
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,
    /// Output token cap
    pub max_output_tokens: u32,
    /// `application/json` in native JSON mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<&'static str>,
}

/// Gemini API request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation turns
    pub contents: Vec<GeminiContent>,
    /// System messages folded into one instruction block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
    /// Sampling and output settings
    pub generation_config: GenerationConfig,
}

/// One response candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Generated content; absent when the candidate was blocked
    #[serde(default)]
    pub content: Option<GeminiContent>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Gemini API usage information
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiUsage {
    /// Number of tokens in the prompt
    #[serde(default)]
    pub prompt_token_count: u32,
    /// Number of tokens across candidates
    #[serde(default)]
    pub candidates_token_count: u32,
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Response candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    /// Token usage information if available
    #[serde(default)]
    pub usage_metadata: Option<GeminiUsage>,
}

/// Creates a Gemini API request from a generation request.
///
/// Consecutive turns of the same role are merged into one content block,
/// and assistant turns use Gemini's `model` role.
#[must_use]
pub fn create_request(request: &GenerationRequest, native_json_mode: bool) -> GeminiRequest {
    let mut system_parts = Vec::new();
    let mut contents: Vec<GeminiContent> = Vec::with_capacity(request.messages.len());

    for Message { role, content } in &request.messages {
        let role = match role {
            Role::System => {
                system_parts.push(text_part(content));
                continue;
            }
            Role::User => "user",
            Role::Assistant => "model",
        };

        match contents.last_mut() {
            Some(last) if last.role.as_deref() == Some(role) => last.parts.push(text_part(content)),
            _ => contents.push(GeminiContent {
                role: Some(role.to_string()),
                parts: vec![text_part(content)],
            }),
        }
    }

    let mut response_mime_type = None;
    if request.json_mode {
        if native_json_mode {
            response_mime_type = Some(JSON_MIME_TYPE);
        } else {
            system_parts.push(text_part(JSON_MODE_INSTRUCTION));
        }
    }

    let system_instruction = (!system_parts.is_empty()).then(|| GeminiContent {
        role: None,
        parts: system_parts,
    });

    GeminiRequest {
        contents,
        system_instruction,
        generation_config: GenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
            response_mime_type,
        },
    }
}

/// Maps a Gemini API response to a [`GenerationResult`].
///
/// The text is the concatenation of the first candidate's text parts.
///
/// # Errors
///
/// Returns an error if there is no candidate or it carries no text.
pub fn map_response(body: GeminiResponse, model: &str) -> Result<GenerationResult, String> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| "No candidates returned".to_string())?;

    let content: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(format!(
            "Candidate carried no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        ));
    }

    let mut result = GenerationResult::new(content, model);
    if let Some(usage) = body.usage_metadata {
        result = result.with_usage(Usage::new(
            usage.prompt_token_count,
            usage.candidates_token_count,
        ));
    }
    Ok(result)
}

fn text_part(text: &str) -> GeminiPart {
    GeminiPart {
        text: Some(text.to_string()),
    }
}
