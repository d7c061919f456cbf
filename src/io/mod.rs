//! Input/output around the grid core

/// Command-line interface and board runner
pub mod cli;
/// Grid configuration and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Debug overlay rendering
pub mod visualization;
