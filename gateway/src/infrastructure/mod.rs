/// Configuration management for the gateway.
pub mod config;
/// Telemetry setup for logging, tracing, and metrics.
pub mod telemetry;
