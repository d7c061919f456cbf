//! Fixed-size dense grid with world-space accessors and change notification
//!
//! Cells live in a single contiguous `(height, width)` array, so cell `(x, y)`
//! sits at flat offset `x + y * width`. Out-of-range reads return `None` and
//! out-of-range writes are dropped without notifying anyone.

use glam::{IVec2, Vec3};
use ndarray::Array2;
use num_traits::ToPrimitive;
use std::fmt;

use crate::io::error::{GridError, Result, invalid_configuration};
use crate::spatial::converter::{
    CoordinateConverter, HorizontalConverter, IsometricConverter, SharedConverter,
    VerticalConverter,
};
use crate::spatial::notifier::{CellChange, ChangeNotifier, SubscriptionId};
use std::rc::Rc;

/// Check construction parameters
///
/// Dimensions must be non-zero and addressable with `i32` coordinates, and
/// the cell size must be finite and strictly positive.
///
/// # Errors
///
/// Returns `GridError::InvalidConfiguration` naming the first offending parameter
pub fn validate_dimensions(width: usize, height: usize, cell_size: f32) -> Result<()> {
    for (parameter, value) in [("width", width), ("height", height)] {
        if value == 0 {
            return Err(invalid_configuration(
                parameter,
                &value,
                &"must be greater than zero",
            ));
        }
        if value.to_i32().is_none() {
            return Err(invalid_configuration(
                parameter,
                &value,
                &"must fit in a signed 32-bit coordinate",
            ));
        }
    }

    if width.checked_mul(height).is_none() {
        return Err(invalid_configuration(
            "height",
            &height,
            &format!("{width}x{height} cells overflow the address space"),
        ));
    }

    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(invalid_configuration(
            "cell_size",
            &cell_size,
            &"must be a finite value greater than zero",
        ));
    }

    Ok(())
}

/// Fixed-size 2D grid mapping cells to optional values
///
/// The converter and dimensions are fixed at construction. Every successful
/// write is reported to the subscribers registered at that moment.
pub struct Grid2D<T> {
    width: usize,
    height: usize,
    cell_size: f32,
    origin: Vec3,
    cells: Array2<Option<T>>,
    converter: SharedConverter,
    notifier: ChangeNotifier<T>,
}

impl<T> Grid2D<T> {
    /// Create an empty grid
    ///
    /// Falls back to the vertical layout when no converter is supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions or cell size are invalid
    pub fn new(
        width: usize,
        height: usize,
        cell_size: f32,
        origin: Vec3,
        converter: Option<SharedConverter>,
    ) -> Result<Self> {
        validate_dimensions(width, height, cell_size)?;

        let converter = converter.unwrap_or_else(|| Rc::new(VerticalConverter));
        log::debug!(
            "building {width}x{height} grid, cell size {cell_size}, origin {origin}, {converter:?}"
        );

        Ok(Self {
            width,
            height,
            cell_size,
            origin,
            cells: Array2::from_shape_simple_fn((height, width), || None),
            converter,
            notifier: ChangeNotifier::new(),
        })
    }

    /// Create an empty grid on the X-Y plane
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions or cell size are invalid
    pub fn vertical(width: usize, height: usize, cell_size: f32, origin: Vec3) -> Result<Self> {
        Self::new(
            width,
            height,
            cell_size,
            origin,
            Some(Rc::new(VerticalConverter)),
        )
    }

    /// Create an empty grid on the X-Z ground plane
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions or cell size are invalid
    pub fn horizontal(width: usize, height: usize, cell_size: f32, origin: Vec3) -> Result<Self> {
        Self::new(
            width,
            height,
            cell_size,
            origin,
            Some(Rc::new(HorizontalConverter)),
        )
    }

    /// Create an empty grid with a diamond projection
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions or cell size are invalid
    pub fn isometric(width: usize, height: usize, cell_size: f32, origin: Vec3) -> Result<Self> {
        Self::new(
            width,
            height,
            cell_size,
            origin,
            Some(Rc::new(IsometricConverter)),
        )
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Edge length of one cell in world units
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World position of cell (0, 0)'s minimum corner
    pub const fn origin(&self) -> Vec3 {
        self.origin
    }

    /// The layout this grid was built with
    pub fn converter(&self) -> &dyn CoordinateConverter {
        self.converter.as_ref()
    }

    /// Test if a cell lies inside the grid
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    // Array index for a cell, or None when out of range
    fn index(&self, x: i32, y: i32) -> Option<[usize; 2]> {
        let col = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        (col < self.width && row < self.height).then_some([row, col])
    }

    /// Value stored at a cell
    ///
    /// Returns `None` for empty cells and for coordinates outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        self.index(x, y)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    /// Value stored at the cell containing a world position
    pub fn get_at(&self, world: Vec3) -> Option<&T> {
        let cell = self.world_to_grid(world);
        self.get(cell.x, cell.y)
    }

    /// Store a value and notify subscribers
    ///
    /// Coordinates outside the grid are ignored: nothing is stored and no
    /// subscriber runs.
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        if self.write(x, y, Some(value)).is_none() {
            log::trace!(
                "discarding write to ({x}, {y}) outside {}x{} grid",
                self.width,
                self.height
            );
        }
    }

    /// Store a value at the cell containing a world position
    pub fn set_at(&mut self, world: Vec3, value: T) {
        let cell = self.world_to_grid(world);
        self.set(cell.x, cell.y, value);
    }

    /// Store a value, reporting out-of-range coordinates
    ///
    /// # Errors
    ///
    /// Returns `GridError::OutOfBounds` if the cell is outside the grid
    pub fn try_set(&mut self, x: i32, y: i32, value: T) -> Result<()> {
        self.write(x, y, Some(value))
            .map(|_| ())
            .ok_or(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
    }

    /// Empty a cell and notify subscribers
    ///
    /// Returns the previous content. Out-of-range coordinates are ignored.
    pub fn remove(&mut self, x: i32, y: i32) -> Option<T> {
        self.write(x, y, None).flatten()
    }

    // Replaces a cell's content and dispatches the change.
    // Outer None means the cell was out of range.
    fn write(&mut self, x: i32, y: i32, value: Option<T>) -> Option<Option<T>> {
        let index = self.index(x, y)?;
        let slot = self.cells.get_mut(index)?;
        let previous = std::mem::replace(slot, value);

        let change = CellChange {
            x,
            y,
            value: slot.as_ref(),
        };
        self.notifier.notify(&change);

        Some(previous)
    }

    /// Cell containing a world position
    ///
    /// The result may lie outside the grid.
    pub fn world_to_grid(&self, world: Vec3) -> IVec2 {
        self.converter
            .world_to_grid(world, self.cell_size, self.origin)
    }

    /// World position of a cell's minimum corner
    pub fn grid_to_world(&self, x: i32, y: i32) -> Vec3 {
        self.converter
            .grid_to_world(IVec2::new(x, y), self.cell_size, self.origin)
    }

    /// World position of a cell's centre
    pub fn grid_to_world_centre(&self, x: i32, y: i32) -> Vec3 {
        self.converter
            .grid_to_world_centre(IVec2::new(x, y), self.cell_size, self.origin)
    }

    /// Normal of the grid plane
    pub fn forward(&self) -> Vec3 {
        self.converter.forward()
    }

    /// Register a callback for every successful write
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&CellChange<'_, T>) + 'static,
    {
        self.notifier.subscribe(callback)
    }

    /// Stop delivering writes to a callback
    ///
    /// Returns false when the handle was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Number of registered callbacks
    pub const fn subscriber_count(&self) -> usize {
        self.notifier.len()
    }

    /// Occupied cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &T)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(|((row, col), cell)| {
                cell.as_ref()
                    .map(|value| (IVec2::new(col as i32, row as i32), value))
            })
    }

    /// Count of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

impl<T> fmt::Debug for Grid2D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid2D")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cell_size", &self.cell_size)
            .field("origin", &self.origin)
            .field("converter", &self.converter)
            .field("occupied", &self.occupied_count())
            .field("notifier", &self.notifier)
            .finish()
    }
}
