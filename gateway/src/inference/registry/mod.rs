//! Provider registry for managing multiple generation backends.
//!
//! This module provides the [`ProviderRegistry`] which maps provider names to
//! their adapter and profile.

pub mod core;
pub mod routing;

pub use self::core::{ProviderRegistry, RegisteredProvider};
