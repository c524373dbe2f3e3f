//! Unit tests for configuration loading and resolution.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `resolution`: Token, repository, port, and limit resolution tests
//! - `env_loading`: Loading through the real environment and CLI sources

mod helpers;
