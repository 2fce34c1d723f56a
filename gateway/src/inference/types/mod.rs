//! Type definitions for generation operations.
//!
//! This module contains shared types used across all backend families.

pub mod error;
pub mod message;
pub mod profile;
pub mod request;
pub mod response;

// Re-export all types for convenience
pub use error::{FailureKind, GatewayError};
pub use message::{Message, Role};
pub use profile::{ApiStyle, ProviderProfile, DEFAULT_TIMEOUT_SECS};
pub use request::{GenerationRequest, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE};
pub use response::{GenerationResult, Usage};
