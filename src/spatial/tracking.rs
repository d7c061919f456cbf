//! Dirty-cell tracking driven by grid change notifications

use bitvec::prelude::*;
use glam::IVec2;
use std::cell::RefCell;
use std::rc::Rc;

use crate::spatial::grid::Grid2D;
use crate::spatial::notifier::SubscriptionId;

/// Set of cells written since the last drain
///
/// One bit per cell, laid out like the grid storage (`x + y * width`).
#[derive(Clone, Debug)]
pub struct DirtyCells {
    bits: BitVec,
    width: usize,
    height: usize,
}

impl DirtyCells {
    /// Create a tracker with every cell clean
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            bits: bitvec![0; width * height],
            width,
            height,
        }
    }

    /// Subscribe a new tracker to a grid
    ///
    /// The returned handle can be passed to [`Grid2D::unsubscribe`] to stop tracking.
    pub fn track<T>(grid: &mut Grid2D<T>) -> (Rc<RefCell<Self>>, SubscriptionId) {
        let tracker = Rc::new(RefCell::new(Self::new(grid.width(), grid.height())));
        let sink = Rc::clone(&tracker);
        let id = grid.subscribe(move |change| sink.borrow_mut().mark(change.x, change.y));
        (tracker, id)
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let col = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        (col < self.width && row < self.height).then(|| col + row * self.width)
    }

    /// Mark a cell as written
    ///
    /// Coordinates outside the tracked area are ignored.
    pub fn mark(&mut self, x: i32, y: i32) {
        if let Some(offset) = self.offset(x, y) {
            self.bits.set(offset, true);
        }
    }

    /// Test if a cell was written since the last drain
    pub fn is_dirty(&self, x: i32, y: i32) -> bool {
        self.offset(x, y)
            .and_then(|offset| self.bits.get(offset).as_deref().copied())
            .unwrap_or(false)
    }

    /// Number of dirty cells
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no cell is dirty
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Take the dirty cells in storage order and reset the tracker
    pub fn drain(&mut self) -> Vec<IVec2> {
        let width = self.width;
        let cells = self
            .bits
            .iter_ones()
            .map(|offset| IVec2::new((offset % width) as i32, (offset / width) as i32))
            .collect();
        self.bits.fill(false);
        cells
    }
}
