//! Gemini `generateContent` backend family.
//!
//! Gemini can also be reached through its `OpenAI`-compatible endpoint; that
//! path is served by [`crate::inference::openai::OpenAiChatAdapter`] and is
//! chosen per profile through [`crate::inference::ApiStyle`].

pub mod client;
pub mod mapping;

pub use client::GeminiAdapter;
pub use mapping::{
    create_request, map_response, GeminiCandidate, GeminiContent, GeminiPart, GeminiRequest,
    GeminiResponse, GeminiUsage, GenerationConfig, JSON_MIME_TYPE,
};
