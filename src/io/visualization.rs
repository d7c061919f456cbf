//! Debug overlay rendering of grid lines and cell centres to PNG

use glam::{Vec2, Vec3};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

use crate::io::configuration::{DEBUG_IMAGE_MARGIN, MAX_DEBUG_IMAGE_DIMENSION};
use crate::io::error::{GridError, Result};
use crate::spatial::factory::GridVisualizer;
use crate::spatial::grid::Grid2D;

const LINE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const CENTRE_COLOR: Rgba<u8> = Rgba([255, 64, 64, 255]);
const OCCUPIED_COLOR: Rgba<u8> = Rgba([64, 200, 255, 255]);

/// Two world axes spanning the plane orthogonal to `forward`
///
/// Drops the axis `forward` points along most strongly and keeps the other
/// two in X, Y, Z order.
pub fn plane_axes(forward: Vec3) -> (usize, usize) {
    let magnitude = forward.abs();
    if magnitude.x >= magnitude.y && magnitude.x >= magnitude.z {
        (1, 2)
    } else if magnitude.y >= magnitude.z {
        (0, 2)
    } else {
        (0, 1)
    }
}

// Maps projected world coordinates to image pixels, +y up
struct Raster {
    min: Vec2,
    max: Vec2,
    pixels_per_unit: f32,
    margin: f32,
}

impl Raster {
    fn to_pixel(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            (point.x - self.min.x) * self.pixels_per_unit + self.margin,
            (self.max.y - point.y) * self.pixels_per_unit + self.margin,
        )
    }
}

/// Grid visualizer that writes a PNG overlay
///
/// Draws every grid line and a marker per cell centre. Occupied cells get a
/// filled 3x3 marker in a second colour.
#[derive(Debug, Clone)]
pub struct DebugOverlay {
    output_path: PathBuf,
    pixels_per_unit: f32,
    renders: usize,
}

impl DebugOverlay {
    /// Create an overlay writing to `output_path`
    pub fn new(output_path: impl Into<PathBuf>, pixels_per_unit: f32) -> Self {
        Self {
            output_path: output_path.into(),
            pixels_per_unit,
            renders: 0,
        }
    }

    /// Destination of exported overlays
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Number of overlays exported so far
    pub const fn renders(&self) -> usize {
        self.renders
    }

    /// Rasterize a grid without saving it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pixel density is not a positive finite number
    /// - The image would exceed `MAX_DEBUG_IMAGE_DIMENSION` on either edge
    pub fn render<T>(&self, grid: &Grid2D<T>) -> Result<RgbaImage> {
        if !self.pixels_per_unit.is_finite() || self.pixels_per_unit <= 0.0 {
            return Err(GridError::Render {
                reason: format!(
                    "pixels per unit must be positive, got {}",
                    self.pixels_per_unit
                ),
            });
        }

        let (a, b) = plane_axes(grid.forward());
        let project = |point: Vec3| Vec2::new(point[a], point[b]);

        let cols = grid.width() as i32;
        let rows = grid.height() as i32;
        let corner = |x: i32, y: i32| project(grid.grid_to_world(x, y));

        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for y in 0..=rows {
            for x in 0..=cols {
                let point = corner(x, y);
                min = min.min(point);
                max = max.max(point);
            }
        }

        let extent = (max - min) * self.pixels_per_unit;
        let margin = DEBUG_IMAGE_MARGIN as f32;
        let width = extent.x.ceil() + 1.0 + 2.0 * margin;
        let height = extent.y.ceil() + 1.0 + 2.0 * margin;
        let limit = MAX_DEBUG_IMAGE_DIMENSION as f32;
        if width > limit || height > limit {
            return Err(GridError::Render {
                reason: format!(
                    "overlay of {width}x{height} pixels exceeds the {MAX_DEBUG_IMAGE_DIMENSION} pixel limit"
                ),
            });
        }

        let raster = Raster {
            min,
            max,
            pixels_per_unit: self.pixels_per_unit,
            margin,
        };
        let mut img = RgbaImage::new(width as u32, height as u32);

        for y in 0..=rows {
            draw_line(
                &mut img,
                raster.to_pixel(corner(0, y)),
                raster.to_pixel(corner(cols, y)),
                LINE_COLOR,
            );
        }
        for x in 0..=cols {
            draw_line(
                &mut img,
                raster.to_pixel(corner(x, 0)),
                raster.to_pixel(corner(x, rows)),
                LINE_COLOR,
            );
        }

        for y in 0..rows {
            for x in 0..cols {
                let centre = raster.to_pixel(project(grid.grid_to_world_centre(x, y)));
                if grid.get(x, y).is_some() {
                    for dy in -1..=1 {
                        for dx in -1..=1 {
                            put(
                                &mut img,
                                centre + Vec2::new(dx as f32, dy as f32),
                                OCCUPIED_COLOR,
                            );
                        }
                    }
                } else {
                    put(&mut img, centre, CENTRE_COLOR);
                }
            }
        }

        Ok(img)
    }

    /// Rasterize a grid and save it as PNG
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Rendering fails
    /// - The parent directory cannot be created
    /// - The image cannot be saved to the output path
    pub fn export<T>(&mut self, grid: &Grid2D<T>) -> Result<()> {
        let img = self.render(grid)?;

        if let Some(parent) = self
            .output_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent).map_err(|e| GridError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        img.save(&self.output_path)
            .map_err(|e| GridError::ImageExport {
                path: self.output_path.clone(),
                source: e,
            })?;

        self.renders += 1;
        log::info!(
            "wrote {}x{} debug overlay to {}",
            img.width(),
            img.height(),
            self.output_path.display()
        );
        Ok(())
    }
}

impl<T> GridVisualizer<T> for DebugOverlay {
    fn visualize(&mut self, grid: &Grid2D<T>) -> Result<()> {
        self.export(grid)
    }
}

fn put(img: &mut RgbaImage, point: Vec2, color: Rgba<u8>) {
    let point = point.round();
    if point.x < 0.0 || point.y < 0.0 {
        return;
    }
    if let Some(pixel) = img.get_pixel_mut_checked(point.x as u32, point.y as u32) {
        *pixel = color;
    }
}

// Samples one point per pixel along the longer axis
fn draw_line(img: &mut RgbaImage, from: Vec2, to: Vec2, color: Rgba<u8>) {
    let delta = to - from;
    let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        put(img, from + delta * t, color);
    }
}
