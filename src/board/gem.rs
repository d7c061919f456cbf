//! Gem payloads for the demo match-3 board

use glam::IVec2;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use std::fmt;

use crate::spatial::grid::Grid2D;

/// Colour of a gem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GemKind {
    /// Red
    Ruby,
    /// Blue
    Sapphire,
    /// Green
    Emerald,
    /// Yellow
    Topaz,
    /// Purple
    Amethyst,
}

impl GemKind {
    /// Every kind in declaration order
    pub const ALL: [Self; 5] = [
        Self::Ruby,
        Self::Sapphire,
        Self::Emerald,
        Self::Topaz,
        Self::Amethyst,
    ];
}

impl Distribution<GemKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GemKind {
        let index = rng.random_range(0..GemKind::ALL.len());
        GemKind::ALL.get(index).copied().unwrap_or(GemKind::Ruby)
    }
}

impl fmt::Display for GemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ruby => "ruby",
            Self::Sapphire => "sapphire",
            Self::Emerald => "emerald",
            Self::Topaz => "topaz",
            Self::Amethyst => "amethyst",
        };
        f.write_str(name)
    }
}

/// A gem on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gem {
    /// Colour of the gem
    pub kind: GemKind,
}

impl Gem {
    /// Create a gem of the given kind
    pub const fn new(kind: GemKind) -> Self {
        Self { kind }
    }
}

/// Value placed in a grid that remembers its own cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridObject<T> {
    /// Cell the object was created for
    pub cell: IVec2,
    /// Wrapped payload
    pub item: T,
}

impl<T> GridObject<T> {
    /// Wrap a payload for a cell
    pub const fn new(cell: IVec2, item: T) -> Self {
        Self { cell, item }
    }
}

/// Write a fresh random gem into every cell
///
/// Cells are written in row-major order, each write notifying subscribers.
/// Returns the number of cells written.
pub fn fill_random<R: Rng + ?Sized>(grid: &mut Grid2D<GridObject<Gem>>, rng: &mut R) -> usize {
    let cols = grid.width() as i32;
    let rows = grid.height() as i32;
    let mut written = 0;

    for y in 0..rows {
        for x in 0..cols {
            let gem = Gem::new(rng.random());
            grid.set(x, y, GridObject::new(IVec2::new(x, y), gem));
            written += 1;
        }
    }

    written
}
