//! Region-edge overlay: traversability boundary extraction and rectangle
//! merging.
//!
//! The output is consumed by the 2D and 3D boundary renderers. Nothing here
//! caches results; callers keep the rectangles for as long as they need them.

mod extract;
mod merge;
mod segment;

pub use extract::{extract_segments, extract_segments_from_map};
pub use merge::{MergeTolerance, merge_rectangles};
pub use segment::{BoundarySegment, MergedRectangle, Orientation};

use crate::grid::BiomeGrid;

/// Thickness of boundary segments when not configured, in world units.
pub const DEFAULT_BOUNDARY_THICKNESS: f64 = 8.0;

/// Boundary overlay settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryConfig {
    /// Segment extent across the edge, in world units.
    pub thickness: f64,
    pub tolerance: MergeTolerance,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_BOUNDARY_THICKNESS,
            tolerance: MergeTolerance::default(),
        }
    }
}

/// Turn segments into rectangles, preserving order.
pub fn segments_to_rectangles(segments: &[BoundarySegment]) -> Vec<MergedRectangle> {
    segments.iter().map(BoundarySegment::to_rectangle).collect()
}

/// Extract and merge the boundary overlay for `grid`.
///
/// Logs a warning when `config.tolerance` can join segments across a single
/// cell at this grid's cell size.
pub fn extract_boundaries(grid: &BiomeGrid, config: &BoundaryConfig) -> Vec<MergedRectangle> {
    if !config
        .tolerance
        .separates_adjacent_edges(grid.cell_size(), config.thickness)
    {
        tracing::warn!(
            cell_size = grid.cell_size(),
            thickness = config.thickness,
            gap = config.tolerance.gap,
            "merge gap spans a whole cell; boundaries of one-cell strips will be joined"
        );
    }
    let segments = extract_segments(grid, config.thickness);
    let merged = merge_rectangles(&segments_to_rectangles(&segments), &config.tolerance);
    tracing::debug!(
        segments = segments.len(),
        rectangles = merged.len(),
        "extracted boundary overlay"
    );
    merged
}
