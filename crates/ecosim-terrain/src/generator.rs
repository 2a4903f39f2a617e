//! World generator facade: one grid plus its derived maps, and the query
//! surface read by the simulation and every renderer.

use std::sync::Arc;

use crate::biome::BiomeLabel;
use crate::error::TerrainError;
use crate::grid::{BiomeGrid, WorldParams};
use crate::maps::DerivedMaps;
use crate::stats::GridStats;

/// A generated world.
///
/// Cloning is cheap: the grid and maps are shared behind [`Arc`] and never
/// mutated, so clones can be handed to other threads freely.
#[derive(Clone, Debug)]
pub struct BiomeGenerator {
    seed: u64,
    grid: Arc<BiomeGrid>,
    maps: Arc<DerivedMaps>,
}

impl BiomeGenerator {
    /// Generate a world with the default cell size of 50 world units.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimensions`] for non-positive extents and
    /// [`TerrainError::NonFinite`] for NaN or infinite ones.
    pub fn new(seed: u64, world_width: f64, world_height: f64) -> Result<Self, TerrainError> {
        Self::from_params(&WorldParams::new(seed, world_width, world_height))
    }

    /// Generate a world with an explicit cell size.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new); a non-positive `cell_size` is also rejected.
    pub fn with_cell_size(
        seed: u64,
        world_width: f64,
        world_height: f64,
        cell_size: f64,
    ) -> Result<Self, TerrainError> {
        Self::from_params(
            &WorldParams::new(seed, world_width, world_height).with_cell_size(cell_size),
        )
    }

    /// Generate a world from full parameters.
    ///
    /// # Errors
    ///
    /// See [`WorldParams::grid_dimensions`].
    pub fn from_params(params: &WorldParams) -> Result<Self, TerrainError> {
        let grid = BiomeGrid::generate(params)?;
        Ok(Self::from_grid(params.seed, grid))
    }

    /// Wrap an existing grid, computing its derived maps.
    pub fn from_grid(seed: u64, grid: BiomeGrid) -> Self {
        let maps = DerivedMaps::from_grid(&grid);
        Self {
            seed,
            grid: Arc::new(grid),
            maps: Arc::new(maps),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Label at a world position; [`BiomeLabel::Ocean`] outside the world or
    /// for non-finite coordinates.
    #[inline]
    pub fn biome_at(&self, world_x: f64, world_y: f64) -> BiomeLabel {
        self.grid.biome_at(world_x, world_y)
    }

    /// Validating variant of [`biome_at`](Self::biome_at).
    ///
    /// # Errors
    ///
    /// [`TerrainError::NonFinite`] if either coordinate is NaN or infinite.
    pub fn try_biome_at(&self, world_x: f64, world_y: f64) -> Result<BiomeLabel, TerrainError> {
        if !world_x.is_finite() {
            return Err(TerrainError::NonFinite { what: "world_x" });
        }
        if !world_y.is_finite() {
            return Err(TerrainError::NonFinite { what: "world_y" });
        }
        Ok(self.biome_at(world_x, world_y))
    }

    #[inline]
    pub fn is_traversable(&self, world_x: f64, world_y: f64) -> bool {
        self.biome_at(world_x, world_y).is_traversable()
    }

    #[inline]
    pub fn food_multiplier_at(&self, world_x: f64, world_y: f64) -> f64 {
        self.biome_at(world_x, world_y).food_multiplier()
    }

    /// Map world coordinates to cell coordinates (floored, unchecked).
    pub fn world_to_grid(&self, world_x: f64, world_y: f64) -> (i64, i64) {
        self.grid.world_to_grid(world_x, world_y)
    }

    /// The label grid.
    pub fn grid(&self) -> &BiomeGrid {
        &self.grid
    }

    /// Shared handle to the label grid.
    pub fn shared_grid(&self) -> Arc<BiomeGrid> {
        Arc::clone(&self.grid)
    }

    /// `1` = open, `0` = blocked, index `y * width + x`.
    pub fn traversability_map(&self) -> &[u8] {
        self.maps.traversability()
    }

    pub fn food_map(&self) -> &[f64] {
        self.maps.food()
    }

    /// Label index per cell, index `y * width + x`.
    pub fn grid_array(&self) -> &[u8] {
        self.maps.labels()
    }

    /// `(width, height)` in cells.
    pub fn grid_dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn cell_size(&self) -> f64 {
        self.grid.cell_size()
    }

    /// Per-biome cell counts.
    pub fn stats(&self) -> GridStats {
        GridStats::from_grid(&self.grid)
    }
}
