//! Demo board payloads that consume the grid core

/// Gem types and random board filling
pub mod gem;

pub use gem::{Gem, GemKind, GridObject, fill_random};
