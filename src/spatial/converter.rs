//! Grid/world coordinate conversion strategies
//!
//! A converter is a stateless transform between integer cell coordinates and
//! world-space positions. The grid never branches on the layout; it calls
//! whichever converter it was built with.

use glam::{IVec2, Vec3};
use num_traits::ToPrimitive;
use std::fmt;
use std::rc::Rc;

/// Converter handle shared between grids
pub type SharedConverter = Rc<dyn CoordinateConverter>;

/// Transform between grid cells and world positions
///
/// Implementations receive the cell size and origin on every call and hold
/// no per-grid state, so one instance can serve any number of grids.
pub trait CoordinateConverter: fmt::Debug {
    /// World position of the cell's minimum corner
    fn grid_to_world(&self, cell: IVec2, cell_size: f32, origin: Vec3) -> Vec3;

    /// World position of the cell's centroid
    fn grid_to_world_centre(&self, cell: IVec2, cell_size: f32, origin: Vec3) -> Vec3;

    /// Cell containing a world position
    ///
    /// Components are floored toward negative infinity, so a position lying
    /// exactly on a boundary belongs to the cell whose lower bound it touches.
    /// Positions with no cell (NaN or beyond the `i32` range) map to a cell
    /// outside every grid.
    fn world_to_grid(&self, world: Vec3, cell_size: f32, origin: Vec3) -> IVec2;

    /// Normal of the plane the grid lies on
    fn forward(&self) -> Vec3;
}

// Floors a cell-space component. NaN and values past the i32 range land on
// i32::MIN, which no grid contains.
fn floor_to_cell(value: f32) -> i32 {
    value.floor().to_i32().unwrap_or(i32::MIN)
}

/// Grid on the X-Y plane, facing +Z
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalConverter;

impl CoordinateConverter for VerticalConverter {
    fn grid_to_world(&self, cell: IVec2, cell_size: f32, origin: Vec3) -> Vec3 {
        Vec3::new(cell.x as f32, cell.y as f32, 0.0) * cell_size + origin
    }

    fn grid_to_world_centre(&self, cell: IVec2, cell_size: f32, origin: Vec3) -> Vec3 {
        let half = cell_size * 0.5;
        self.grid_to_world(cell, cell_size, origin) + Vec3::new(half, half, 0.0)
    }

    fn world_to_grid(&self, world: Vec3, cell_size: f32, origin: Vec3) -> IVec2 {
        let local = (world - origin) / cell_size;
        IVec2::new(floor_to_cell(local.x), floor_to_cell(local.y))
    }

    fn forward(&self) -> Vec3 {
        Vec3::Z
    }
}

/// Grid on the X-Z ground plane, facing down
///
/// Grid y runs along world z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HorizontalConverter;

impl CoordinateConverter for HorizontalConverter {
    fn grid_to_world(&self, cell: IVec2, cell_size: f32, origin: Vec3) -> Vec3 {
        Vec3::new(cell.x as f32, 0.0, cell.y as f32) * cell_size + origin
    }

    fn grid_to_world_centre(&self, cell: IVec2, cell_size: f32, origin: Vec3) -> Vec3 {
        let half = cell_size * 0.5;
        self.grid_to_world(cell, cell_size, origin) + Vec3::new(half, 0.0, half)
    }

    fn world_to_grid(&self, world: Vec3, cell_size: f32, origin: Vec3) -> IVec2 {
        let local = (world - origin) / cell_size;
        IVec2::new(floor_to_cell(local.x), floor_to_cell(local.z))
    }

    fn forward(&self) -> Vec3 {
        Vec3::NEG_Y
    }
}

/// 2:1 diamond projection on the X-Y plane
///
/// Cell `(x, y)` has its minimum corner at
/// `((x - y) * cell_size / 2, (x + y) * cell_size / 4)` relative to the origin.
/// Increasing x moves right and up, increasing y moves left and up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsometricConverter;

impl IsometricConverter {
    fn project(gx: f32, gy: f32, cell_size: f32, origin: Vec3) -> Vec3 {
        Vec3::new(
            (gx - gy) * cell_size * 0.5,
            (gx + gy) * cell_size * 0.25,
            0.0,
        ) + origin
    }
}

impl CoordinateConverter for IsometricConverter {
    fn grid_to_world(&self, cell: IVec2, cell_size: f32, origin: Vec3) -> Vec3 {
        Self::project(cell.x as f32, cell.y as f32, cell_size, origin)
    }

    fn grid_to_world_centre(&self, cell: IVec2, cell_size: f32, origin: Vec3) -> Vec3 {
        Self::project(cell.x as f32 + 0.5, cell.y as f32 + 0.5, cell_size, origin)
    }

    fn world_to_grid(&self, world: Vec3, cell_size: f32, origin: Vec3) -> IVec2 {
        let local = world - origin;
        // u = x - y, v = x + y in cell units
        let u = local.x / (cell_size * 0.5);
        let v = local.y / (cell_size * 0.25);
        IVec2::new(floor_to_cell((u + v) * 0.5), floor_to_cell((v - u) * 0.5))
    }

    fn forward(&self) -> Vec3 {
        Vec3::Z
    }
}

/// Built-in grid layouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// X-Y plane (`VerticalConverter`)
    #[default]
    Vertical,
    /// X-Z ground plane (`HorizontalConverter`)
    Horizontal,
    /// Diamond projection (`IsometricConverter`)
    Isometric,
}

impl Orientation {
    /// Create the converter for this layout
    pub fn converter(self) -> SharedConverter {
        match self {
            Self::Vertical => Rc::new(VerticalConverter),
            Self::Horizontal => Rc::new(HorizontalConverter),
            Self::Isometric => Rc::new(IsometricConverter),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Isometric => "isometric",
        };
        f.write_str(name)
    }
}
