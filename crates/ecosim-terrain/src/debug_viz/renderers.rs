//! Debug renderers: biome map, traversability and boundary overlay.
//!
//! Every renderer draws one grid cell as a `pixels_per_cell` square block with
//! grid row 0 at the top of the image. A `pixels_per_cell` of zero is treated
//! as one. Renderers fail with [`TerrainError::ImageTooLarge`] when the image
//! side would not fit in `u32` or its RGBA buffer could not be allocated.

use super::image::DebugImage;
use crate::biome::BiomeLabel;
use crate::boundary::MergedRectangle;
use crate::error::TerrainError;
use crate::generator::BiomeGenerator;
use crate::grid::BiomeGrid;

/// Traversable cells in the traversability image.
pub const OPEN_COLOR: (u8, u8, u8) = (235, 235, 235);
/// Blocked cells in the traversability image.
pub const BLOCKED_COLOR: (u8, u8, u8) = (30, 30, 30);
/// Boundary rectangles in the overlay.
pub const BOUNDARY_COLOR: (u8, u8, u8) = (255, 40, 40);

/// Decode a biome's `visual_tag` (0xRRGGBB) into RGB.
pub fn biome_color(label: BiomeLabel) -> (u8, u8, u8) {
    let tag = label.attributes().visual_tag;
    ((tag >> 16) as u8, (tag >> 8) as u8, tag as u8)
}

fn blank_for(grid: &BiomeGrid, pixels_per_cell: u32) -> Result<DebugImage, TerrainError> {
    let side = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|c| c.checked_mul(pixels_per_cell))
    };
    let too_large = TerrainError::ImageTooLarge {
        width: grid.width(),
        height: grid.height(),
        pixels_per_cell,
    };
    let (Some(width), Some(height)) = (side(grid.width()), side(grid.height())) else {
        return Err(too_large);
    };
    let bytes = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4));
    match bytes {
        Some(n) if n <= isize::MAX as usize => Ok(DebugImage::new(width, height)),
        _ => Err(too_large),
    }
}

fn paint_cells(
    image: &mut DebugImage,
    grid_width: usize,
    pixels_per_cell: u32,
    colors: impl Iterator<Item = (u8, u8, u8)>,
) {
    let ppc = i64::from(pixels_per_cell);
    for (i, (r, g, b)) in colors.enumerate() {
        let (x, y) = ((i % grid_width) as i64, (i / grid_width) as i64);
        image.fill_rect(x * ppc, y * ppc, ppc, ppc, (r, g, b, 255));
    }
}

/// One colored block per cell, colored by [`biome_color`].
pub fn render_biome_map(
    grid: &BiomeGrid,
    pixels_per_cell: u32,
) -> Result<DebugImage, TerrainError> {
    let ppc = pixels_per_cell.max(1);
    let mut image = blank_for(grid, ppc)?;
    paint_cells(
        &mut image,
        grid.width(),
        ppc,
        grid.cells().iter().map(|&label| biome_color(label)),
    );
    Ok(image)
}

/// Open cells light, blocked cells dark.
pub fn render_traversability(
    world: &BiomeGenerator,
    pixels_per_cell: u32,
) -> Result<DebugImage, TerrainError> {
    let ppc = pixels_per_cell.max(1);
    let grid = world.grid();
    let mut image = blank_for(grid, ppc)?;
    paint_cells(
        &mut image,
        grid.width(),
        ppc,
        world
            .traversability_map()
            .iter()
            .map(|&open| if open == 1 { OPEN_COLOR } else { BLOCKED_COLOR }),
    );
    Ok(image)
}

/// The biome map with `rects` drawn on top in [`BOUNDARY_COLOR`].
///
/// Rectangles are in world units with Y pointing up, as produced by
/// [`extract_boundaries`](crate::boundary::extract_boundaries); the flip is
/// undone so they land on the cell edges they were extracted from. Each
/// rectangle covers at least one pixel in both directions.
pub fn render_boundary_overlay(
    grid: &BiomeGrid,
    rects: &[MergedRectangle],
    pixels_per_cell: u32,
) -> Result<DebugImage, TerrainError> {
    let ppc = pixels_per_cell.max(1);
    let mut image = render_biome_map(grid, ppc)?;
    let scale = f64::from(ppc) / grid.cell_size();
    let (r, g, b) = BOUNDARY_COLOR;

    for rect in rects {
        let x0 = libm::floor(rect.left() * scale) as i64;
        let x1 = (libm::ceil(rect.right() * scale) as i64).max(x0 + 1);
        let y0 = libm::floor((grid.world_height() - rect.top()) * scale) as i64;
        let y1 = (libm::ceil((grid.world_height() - rect.bottom()) * scale) as i64).max(y0 + 1);
        image.fill_rect(x0, y0, x1 - x0, y1 - y0, (r, g, b, 255));
    }
    Ok(image)
}
