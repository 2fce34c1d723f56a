//! Wayfarer Gateway - resilience layer between the itinerary backend and its
//! generative text providers.
//!
//! This crate provides:
//! - provider adapters for message-array and contents/parts backends, behind
//!   a retry/fallback controller
//! - best-effort recovery of JSON from malformed generation output
//! - a lazy-expiry circuit breaker for quota-limited HTTP dependencies
//!
//! ```no_run
//! use serde::Deserialize;
//! use wayfarer_gateway::{Gateway, GenerationRequest, Settings};
//!
//! #[derive(Deserialize)]
//! struct Itinerary {
//!     days: Vec<serde_json::Value>,
//! }
//!
//! # async fn run() -> anyhow::Result<()> {
//! let gateway = Gateway::from_settings(&Settings::new()?)?;
//! let itinerary: Itinerary = gateway
//!     .generate_structured(&GenerationRequest::with_message("", "Three days in Porto"))
//!     .await?;
//! println!("{} days", itinerary.days.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Gateway facade exposing text and structured generation.
pub mod gateway;
/// Circuit breaker and guarded client for quota-limited dependencies.
pub mod guard;
/// Provider adapters, retry/fallback controller and registry.
pub mod inference;
/// Infrastructure components (config, telemetry).
pub mod infrastructure;
/// Text normalization, JSON repair and structured output orchestration.
pub mod structured;

pub use gateway::Gateway;
pub use inference::{GatewayError, GenerationRequest, Message, Role};
pub use infrastructure::config::Settings;
