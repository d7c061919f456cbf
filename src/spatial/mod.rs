//! Spatial data structures and coordinate conversion
//!
//! This module contains the grid core:
//! - Dense cell storage with bounds-checked access
//! - Grid/world coordinate converters
//! - Change notification and dirty-cell tracking
//! - Construction from configuration

/// Grid/world coordinate conversion strategies
pub mod converter;
/// Grid construction and the debug hook
pub mod factory;
/// Dense cell storage and accessors
pub mod grid;
/// Subscriber registry for cell writes
pub mod notifier;
/// Dirty-cell bookkeeping
pub mod tracking;

pub use converter::{
    CoordinateConverter, HorizontalConverter, IsometricConverter, Orientation, SharedConverter,
    VerticalConverter,
};
pub use factory::{GridVisualizer, build_grid, vertical_grid};
pub use grid::Grid2D;
pub use notifier::{CellChange, ChangeNotifier, SubscriptionId};
pub use tracking::DirtyCells;
