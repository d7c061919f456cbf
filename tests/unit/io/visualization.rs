//! Tests for debug overlay rasterization and PNG export

#[cfg(test)]
mod tests {

    use glam::Vec3;
    use image::Rgba;
    use tempfile::TempDir;
    use worldgrid::GridError;
    use worldgrid::io::configuration::DEBUG_IMAGE_MARGIN;
    use worldgrid::io::visualization::{DebugOverlay, plane_axes};
    use worldgrid::spatial::factory::GridVisualizer;
    use worldgrid::spatial::grid::Grid2D;

    const LINE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn board(width: usize, height: usize) -> Grid2D<u8> {
        match Grid2D::vertical(width, height, 1.0, Vec3::ZERO) {
            Ok(grid) => grid,
            Err(error) => unreachable!("valid configuration rejected: {error}"),
        }
    }

    // Tests the projection plane drops the axis the grid faces
    // Verified by always returning the X-Y axes
    #[test]
    fn test_plane_axes() {
        assert_eq!(plane_axes(Vec3::Z), (0, 1));
        assert_eq!(plane_axes(Vec3::NEG_Y), (0, 2));
        assert_eq!(plane_axes(Vec3::X), (1, 2));
    }

    // Tests image size covers the grid plus margin at the requested density
    // Verified by omitting the margin from the image size
    #[test]
    fn test_render_dimensions_and_corners() {
        let grid = board(8, 4);
        let overlay = DebugOverlay::new("unused.png", 4.0);

        let Ok(img) = overlay.render(&grid) else {
            unreachable!("render should succeed");
        };

        let margin = DEBUG_IMAGE_MARGIN;
        assert_eq!(img.width(), 8 * 4 + 1 + 2 * margin);
        assert_eq!(img.height(), 4 * 4 + 1 + 2 * margin);

        // Grid corners sit on the lines, the margin stays empty
        assert_eq!(img.get_pixel(margin, margin), &LINE);
        assert_eq!(img.get_pixel(margin + 32, margin + 16), &LINE);
        assert_eq!(img.get_pixel(0, 0), &TRANSPARENT);
    }

    // Tests occupied cells get a filled marker at their centre
    // Verified by drawing every centre in the empty colour
    #[test]
    fn test_render_marks_occupied_cells() {
        let mut grid = board(2, 2);
        grid.set(1, 1, 7);
        let overlay = DebugOverlay::new("unused.png", 10.0);

        let Ok(img) = overlay.render(&grid) else {
            unreachable!("render should succeed");
        };

        let margin = DEBUG_IMAGE_MARGIN;
        // Cell (1, 1) centre is (1.5, 1.5) in world units; image y grows downward
        let occupied = img.get_pixel(margin + 15, margin + 5);
        let empty = img.get_pixel(margin + 5, margin + 15);
        assert_ne!(occupied, empty);
        assert_ne!(occupied, &TRANSPARENT);
        assert_ne!(empty, &TRANSPARENT);
    }

    // Tests non-positive densities are rejected
    // Verified by removing the density check
    #[test]
    fn test_render_rejects_bad_density() {
        let grid = board(2, 2);

        for density in [0.0, -3.0, f32::NAN] {
            let overlay = DebugOverlay::new("unused.png", density);
            assert!(matches!(
                overlay.render(&grid),
                Err(GridError::Render { .. })
            ));
        }
    }

    // Tests oversized overlays are refused instead of allocated
    // Verified by removing the dimension limit
    #[test]
    fn test_render_rejects_oversized_image() {
        let grid = board(4096, 1);
        let overlay = DebugOverlay::new("unused.png", 64.0);

        assert!(matches!(
            overlay.render(&grid),
            Err(GridError::Render { .. })
        ));
    }

    // Tests horizontal grids are drawn on the ground plane
    // Verified by projecting onto X-Y for every layout
    #[test]
    fn test_render_horizontal_grid() {
        let Ok(grid) = Grid2D::<u8>::horizontal(3, 5, 1.0, Vec3::new(0.0, 2.0, 0.0)) else {
            unreachable!("valid configuration rejected");
        };
        let overlay = DebugOverlay::new("unused.png", 2.0);

        let Ok(img) = overlay.render(&grid) else {
            unreachable!("render should succeed");
        };

        let margin = DEBUG_IMAGE_MARGIN;
        assert_eq!(img.width(), 3 * 2 + 1 + 2 * margin);
        assert_eq!(img.height(), 5 * 2 + 1 + 2 * margin);
    }

    // Tests the visualizer hook writes a PNG, creating missing directories
    // Verified by disabling the directory creation
    #[test]
    fn test_visualize_writes_png() {
        let Ok(dir) = TempDir::new() else {
            unreachable!("temporary directory unavailable");
        };
        let path = dir.path().join("nested").join("grid.png");
        let grid = board(3, 3);
        let mut overlay = DebugOverlay::new(&path, 8.0);

        assert!(overlay.visualize(&grid).is_ok());
        assert!(path.exists());
        assert_eq!(overlay.renders(), 1);
        assert_eq!(overlay.output_path(), path.as_path());

        let reloaded = image::open(&path).map(|img| (img.width(), img.height()));
        let side = 3 * 8 + 1 + 2 * DEBUG_IMAGE_MARGIN;
        assert!(matches!(reloaded, Ok(dims) if dims == (side, side)));
    }

    // Tests a blocked output directory reports the directory that failed
    // Verified by reporting a placeholder path for file system errors
    #[test]
    fn test_export_reports_blocked_directory() {
        let Ok(dir) = TempDir::new() else {
            unreachable!("temporary directory unavailable");
        };
        let blocker = dir.path().join("blocker");
        if let Err(error) = std::fs::write(&blocker, b"not a directory") {
            unreachable!("cannot create blocking file: {error}");
        }
        let mut overlay = DebugOverlay::new(blocker.join("grid.png"), 8.0);

        match overlay.export(&board(2, 2)) {
            Err(GridError::FileSystem {
                path, operation, ..
            }) => {
                assert_eq!(path, blocker);
                assert_eq!(operation, "create directory");
            }
            other => unreachable!("Expected FileSystem error, got {other:?}"),
        }
        assert_eq!(overlay.renders(), 0);
    }
}
