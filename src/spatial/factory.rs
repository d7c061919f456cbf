//! Grid construction from configuration with an optional debug hook

use std::rc::Rc;

use crate::io::configuration::GridConfig;
use crate::io::error::Result;
use crate::spatial::converter::{SharedConverter, VerticalConverter};
use crate::spatial::grid::Grid2D;

/// Consumer of freshly built grids when debug output is enabled
///
/// Implementations sit outside the core (see `io::visualization`) and only
/// use the grid's public read interface.
pub trait GridVisualizer<T> {
    /// Inspect a grid once, right after construction
    ///
    /// # Errors
    ///
    /// Returns an error if the visualization cannot be produced
    fn visualize(&mut self, grid: &Grid2D<T>) -> Result<()>;
}

/// Build a grid, binding the vertical layout when no converter is supplied
///
/// The visualizer runs only when `config.debug` is set.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the visualizer fails
pub fn build_grid<T>(
    config: &GridConfig,
    converter: Option<SharedConverter>,
    visualizer: Option<&mut dyn GridVisualizer<T>>,
) -> Result<Grid2D<T>> {
    let grid = Grid2D::new(
        config.width,
        config.height,
        config.cell_size,
        config.origin,
        converter,
    )?;

    if config.debug {
        match visualizer {
            Some(visualizer) => visualizer.visualize(&grid)?,
            None => log::warn!("debug output requested but no visualizer was supplied"),
        }
    }

    Ok(grid)
}

/// Build a grid on the X-Y plane
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the visualizer fails
pub fn vertical_grid<T>(
    config: &GridConfig,
    visualizer: Option<&mut dyn GridVisualizer<T>>,
) -> Result<Grid2D<T>> {
    build_grid(config, Some(Rc::new(VerticalConverter)), visualizer)
}
