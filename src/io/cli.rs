//! Command-line interface for building and inspecting a demo gem board

use crate::board::gem::{Gem, GemKind, GridObject, fill_random};
use crate::io::configuration::{
    DEFAULT_CELL_SIZE, DEFAULT_DEBUG_OUTPUT, DEFAULT_HEIGHT, DEFAULT_PIXELS_PER_UNIT, DEFAULT_SEED,
    DEFAULT_WIDTH, GridConfig,
};
use crate::io::error::Result;
use crate::io::visualization::DebugOverlay;
use crate::spatial::converter::Orientation;
use crate::spatial::factory::{GridVisualizer, build_grid};
use crate::spatial::grid::Grid2D;
use crate::spatial::tracking::DirtyCells;
use clap::{Parser, ValueEnum};
use glam::{IVec2, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

/// Grid layout selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrientationArg {
    /// X-Y plane
    Vertical,
    /// X-Z ground plane
    Horizontal,
    /// Diamond projection
    Isometric,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Vertical => Self::Vertical,
            OrientationArg::Horizontal => Self::Horizontal,
            OrientationArg::Isometric => Self::Isometric,
        }
    }
}

/// Parse a world position written as `x,y,z`
///
/// # Errors
///
/// Returns a message if there are not exactly three finite numbers
pub fn parse_vec3(input: &str) -> std::result::Result<Vec3, String> {
    let parts = input
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid coordinate in '{input}': {e}"))?;

    match parts.as_slice() {
        [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => {
            Ok(Vec3::new(*x, *y, *z))
        }
        [_, _, _] => Err(format!("coordinates in '{input}' must be finite")),
        _ => Err(format!("expected x,y,z but got '{input}'")),
    }
}

#[derive(Parser, Debug)]
#[command(name = "worldgrid")]
#[command(
    author,
    version,
    about = "Build a gem board on a 2D grid and query it by world position"
)]
/// Command-line arguments for the board demo
pub struct Cli {
    /// Number of columns
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Number of rows
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Cell edge length in world units
    #[arg(short, long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: f32,

    /// World position of cell (0, 0) as x,y,z
    #[arg(
        short,
        long,
        value_parser = parse_vec3,
        default_value = "0,0,0",
        allow_hyphen_values = true
    )]
    pub origin: Vec3,

    /// Grid layout
    #[arg(long, value_enum, default_value_t = OrientationArg::Vertical)]
    pub orientation: OrientationArg,

    /// Write a debug overlay of the grid when it is built
    #[arg(short, long)]
    pub debug: bool,

    /// Path of the debug overlay PNG
    #[arg(long, default_value = DEFAULT_DEBUG_OUTPUT)]
    pub debug_output: PathBuf,

    /// Debug overlay resolution
    #[arg(long, default_value_t = DEFAULT_PIXELS_PER_UNIT)]
    pub pixels_per_unit: f32,

    /// Random seed for the board fill
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// World position to look up after filling, as x,y,z (repeatable)
    #[arg(short, long = "probe", value_parser = parse_vec3, allow_hyphen_values = true)]
    pub probes: Vec<Vec3>,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Grid configuration described by the arguments
    pub const fn grid_config(&self) -> GridConfig {
        GridConfig::new(self.width, self.height, self.cell_size, self.origin)
            .with_debug(self.debug)
    }

    /// Default log filter for the requested verbosity
    pub const fn log_level(&self) -> &'static str {
        if self.quiet { "warn" } else { "info" }
    }
}

/// Result of looking up one world position
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// Queried world position
    pub position: Vec3,
    /// Cell containing the position
    pub cell: IVec2,
    /// Gem found there, if the cell is inside the board
    pub gem: Option<GemKind>,
}

/// Outcome of a board run
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSummary {
    /// Cells written by the fill
    pub cells_written: usize,
    /// Distinct cells reported dirty by the tracker
    pub dirty_cells: usize,
    /// Change notifications observed
    pub notifications: usize,
    /// Lookups requested with `--probe`
    pub probes: Vec<ProbeResult>,
}

/// Builds, fills and queries a board according to CLI arguments
pub struct BoardRunner {
    cli: Cli,
}

impl BoardRunner {
    /// Create a runner for parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the board described by the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the debug overlay fails
    pub fn build(&self) -> Result<Grid2D<GridObject<Gem>>> {
        let config = self.cli.grid_config();
        let converter = Orientation::from(self.cli.orientation).converter();
        let mut overlay =
            DebugOverlay::new(self.cli.debug_output.clone(), self.cli.pixels_per_unit);
        let visualizer: &mut dyn GridVisualizer<GridObject<Gem>> = &mut overlay;

        build_grid(&config, Some(converter), Some(visualizer))
    }

    /// Build, fill and probe the board
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be built
    pub fn run(&self) -> Result<BoardSummary> {
        let mut grid = self.build()?;
        log::info!(
            "built {}x{} {} board with cell size {}",
            grid.width(),
            grid.height(),
            Orientation::from(self.cli.orientation),
            grid.cell_size()
        );

        let (dirty, tracker) = DirtyCells::track(&mut grid);
        let notifications = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&notifications);
        grid.subscribe(move |change| {
            counter.set(counter.get() + 1);
            if let Some(object) = change.value {
                log::trace!("({}, {}) <- {}", change.x, change.y, object.item.kind);
            }
        });

        let mut rng = StdRng::seed_from_u64(self.cli.seed);
        let cells_written = fill_random(&mut grid, &mut rng);
        if !grid.unsubscribe(tracker) {
            log::warn!("dirty tracker was already detached");
        }
        let dirty_cells = dirty.borrow().count();

        let probes = self
            .cli
            .probes
            .iter()
            .map(|&position| {
                let cell = grid.world_to_grid(position);
                let gem = grid.get_at(position).map(|object| object.item.kind);
                match gem {
                    Some(kind) => log::info!("{position} -> ({}, {}) {kind}", cell.x, cell.y),
                    None => log::info!("{position} -> ({}, {}) outside board", cell.x, cell.y),
                }
                ProbeResult {
                    position,
                    cell,
                    gem,
                }
            })
            .collect();

        log::debug!(
            "filled {cells_written} cells, {dirty_cells} dirty, {} notifications",
            notifications.get()
        );

        Ok(BoardSummary {
            cells_written,
            dirty_cells,
            notifications: notifications.get(),
            probes,
        })
    }
}
