//! Grid construction parameters and runtime defaults

use glam::Vec3;

use crate::io::error::Result;
use crate::spatial::grid::validate_dimensions;

// Board defaults match the classic 8x8 match-3 layout
/// Default number of columns
pub const DEFAULT_WIDTH: usize = 8;
/// Default number of rows
pub const DEFAULT_HEIGHT: usize = 8;
/// Default cell edge length in world units
pub const DEFAULT_CELL_SIZE: f32 = 1.0;

/// Fixed seed for reproducible board fills
pub const DEFAULT_SEED: u64 = 42;

// Debug overlay settings
/// Pixels drawn per world unit
pub const DEFAULT_PIXELS_PER_UNIT: f32 = 32.0;
/// Transparent border around the overlay in pixels
pub const DEBUG_IMAGE_MARGIN: u32 = 4;
/// Largest overlay edge in pixels
pub const MAX_DEBUG_IMAGE_DIMENSION: u32 = 8192;
/// Default overlay file name
pub const DEFAULT_DEBUG_OUTPUT: &str = "grid_debug.png";

/// Everything needed to build a grid apart from the converter
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Cell edge length in world units
    pub cell_size: f32,
    /// World position of cell (0, 0)'s minimum corner
    pub origin: Vec3,
    /// Hand the finished grid to a visualizer
    pub debug: bool,
}

impl GridConfig {
    /// Create a configuration with debug output disabled
    pub const fn new(width: usize, height: usize, cell_size: f32, origin: Vec3) -> Self {
        Self {
            width,
            height,
            cell_size,
            origin,
            debug: false,
        }
    }

    /// Enable or disable the debug hook
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Check the configuration without building a grid
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions or cell size are invalid
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height, self.cell_size)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_CELL_SIZE, Vec3::ZERO)
    }
}
