//! Consumer-side traversability lookups for movement code.
//!
//! Unlike [`BiomeGenerator::is_traversable`], which treats everything outside
//! the world as ocean, the collision map wraps positions around the world
//! extents the way the simulation's toroidal world does.

use glam::DVec2;

use crate::error::TerrainError;
use crate::generator::BiomeGenerator;
use crate::grid::cell_count;

/// Owned copy of a traversability map plus the geometry to index it.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionMap {
    traversability: Vec<u8>,
    grid_width: usize,
    grid_height: usize,
    cell_size: f64,
    world_width: f64,
    world_height: f64,
}

impl CollisionMap {
    /// Build from a raw map (`1` = open).
    ///
    /// # Errors
    ///
    /// [`TerrainError::MapSizeMismatch`] if `traversability` does not hold
    /// `grid_width * grid_height` entries, [`TerrainError::InvalidDimensions`]
    /// for non-positive world extents or cell size or a grid too large to
    /// address.
    pub fn new(
        traversability: &[u8],
        grid_width: usize,
        grid_height: usize,
        cell_size: f64,
        world_width: f64,
        world_height: f64,
    ) -> Result<Self, TerrainError> {
        let invalid = TerrainError::InvalidDimensions {
            world_width,
            world_height,
            cell_size,
        };
        let expected = cell_count(grid_width, grid_height).ok_or(invalid.clone())?;
        if traversability.len() != expected {
            return Err(TerrainError::MapSizeMismatch {
                expected,
                actual: traversability.len(),
            });
        }
        // NaN fails every comparison, so it is caught here as well.
        if !(world_width > 0.0 && world_height > 0.0 && cell_size > 0.0) {
            return Err(invalid);
        }
        Ok(Self {
            traversability: traversability.to_vec(),
            grid_width,
            grid_height,
            cell_size,
            world_width,
            world_height,
        })
    }

    /// Snapshot a generated world's traversability.
    pub fn from_generator(world: &BiomeGenerator) -> Self {
        let grid = world.grid();
        Self {
            traversability: world.traversability_map().to_vec(),
            grid_width: grid.width(),
            grid_height: grid.height(),
            cell_size: grid.cell_size(),
            world_width: grid.world_width(),
            world_height: grid.world_height(),
        }
    }

    pub fn world_width(&self) -> f64 {
        self.world_width
    }

    pub fn world_height(&self) -> f64 {
        self.world_height
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Whether `pos` (grid-aligned world coordinates) is open ground.
    ///
    /// Coordinates wrap into `[0, world_width) x [0, world_height)`; cells the
    /// wrapped position maps past the grid, or non-finite positions, are
    /// blocked.
    pub fn is_traversable(&self, pos: DVec2) -> bool {
        if !pos.is_finite() {
            return false;
        }
        let wrapped_x = pos.x.rem_euclid(self.world_width);
        let wrapped_y = pos.y.rem_euclid(self.world_height);

        let grid_x = libm::floor(wrapped_x / self.cell_size) as usize;
        let grid_y = libm::floor(wrapped_y / self.cell_size) as usize;
        if grid_x >= self.grid_width || grid_y >= self.grid_height {
            return false;
        }
        self.traversability[grid_y * self.grid_width + grid_x] == 1
    }

    /// [`is_traversable`](Self::is_traversable) for positions expressed with
    /// world-Y pointing up, as the boundary overlay and renderers use.
    pub fn is_traversable_y_up(&self, pos: DVec2) -> bool {
        self.is_traversable(DVec2::new(pos.x, self.world_height - pos.y))
    }

    /// Check many positions at once; `1` = open, `0` = blocked.
    pub fn check_positions(&self, positions: &[DVec2]) -> Vec<u8> {
        positions
            .iter()
            .map(|&p| u8::from(self.is_traversable(p)))
            .collect()
    }
}
