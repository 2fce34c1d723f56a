//! `OpenAI` chat-completions backend family.

pub mod client;
pub mod mapping;

pub use client::OpenAiChatAdapter;
pub use mapping::{
    create_request, map_response, OpenAiChatRequest, OpenAiChatResponse, OpenAiChoice,
    OpenAiMessage, OpenAiUsage, ResponseFormat,
};
