//! Terrain error types.

/// Errors raised while constructing grids or consumer-side maps.
///
/// Out-of-range world queries are not errors: they
/// resolve to [`BiomeLabel::Ocean`](crate::BiomeLabel::Ocean) instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// World extents or cell size were zero or negative, or the resulting
    /// grid has more cells than can be addressed.
    #[error(
        "invalid world dimensions: width={world_width}, height={world_height}, cell_size={cell_size} (all must be > 0 and the grid must fit in memory)"
    )]
    InvalidDimensions {
        /// Requested world width in world units.
        world_width: f64,
        /// Requested world height in world units.
        world_height: f64,
        /// Requested cell edge length in world units.
        cell_size: f64,
    },

    /// A NaN or infinite value reached a validated entry point.
    #[error("non-finite {what}")]
    NonFinite {
        /// Which input was rejected.
        what: &'static str,
    },

    /// An explicit cell list did not match `width * height`.
    #[error("expected {expected} cells, got {actual}")]
    CellCountMismatch {
        /// Cell count implied by the grid dimensions.
        expected: usize,
        /// Cell count actually supplied.
        actual: usize,
    },

    /// A traversability buffer did not match the grid it claims to describe.
    #[error("traversability map has {actual} entries, grid needs {expected}")]
    MapSizeMismatch {
        /// Entry count implied by the grid dimensions.
        expected: usize,
        /// Entry count actually supplied.
        actual: usize,
    },

    /// A debug render would exceed `u32` pixels per side or addressable memory.
    #[error(
        "debug image too large: {width}x{height} cells at {pixels_per_cell} pixels per cell"
    )]
    ImageTooLarge {
        /// Grid width in cells.
        width: usize,
        /// Grid height in cells.
        height: usize,
        /// Requested block size after clamping to at least one.
        pixels_per_cell: u32,
    },
}
