//! Fixed-size 2D grid with pluggable grid/world coordinate conversion
//!
//! Cells map integer coordinates to optional values. World positions are
//! translated through a converter chosen at construction (vertical, horizontal
//! or isometric), and every successful write is reported synchronously to
//! subscribed callbacks.

#![forbid(unsafe_code)]

/// Demo gem board built on the grid
pub mod board;
/// Configuration, errors, debug output and the command-line driver
pub mod io;
/// Grid storage, coordinate conversion and change notification
pub mod spatial;

pub use io::error::{GridError, Result};
pub use spatial::{CoordinateConverter, Grid2D, Orientation};
