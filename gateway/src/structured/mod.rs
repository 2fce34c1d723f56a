//! Structured output recovery.
//!
//! Turns raw generation text into typed values: [`normalize`] strips the
//! wrapping, [`repair`] fixes structure, and [`StructuredGenerator`] decides
//! when to give up on a text and generate a new one.

pub mod normalize;
pub mod orchestrator;
pub mod repair;

pub use normalize::normalize;
pub use orchestrator::{
    parse_structured, ParseFailure, StructuredGenerator, DEFAULT_MAX_GENERATION_ATTEMPTS,
    DEFAULT_REGENERATION_DELAY_MS,
};
pub use repair::{repair, repair_with_report, RepairPass, RepairReport};
