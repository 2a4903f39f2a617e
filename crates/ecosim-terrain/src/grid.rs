//! Immutable biome grid and world↔grid coordinate mapping.

use std::time::Instant;

use crate::biome::{BiomeClassifier, BiomeLabel, ClassifierParams};
use crate::error::TerrainError;

/// Cell edge length used when callers do not pick one, in world units.
pub const DEFAULT_CELL_SIZE: f64 = 50.0;

/// Largest cell count any per-cell buffer (the widest holds `f64`) can address.
pub const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Inputs that fully determine a generated world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldParams {
    /// Seed for every noise field.
    pub seed: u64,
    /// World extent along X in world units.
    pub world_width: f64,
    /// World extent along Y in world units.
    pub world_height: f64,
    /// Edge length of one square cell in world units.
    pub cell_size: f64,
    /// Climate field sampling parameters.
    pub classifier: ClassifierParams,
}

impl WorldParams {
    /// Parameters with the default cell size and classifier settings.
    pub fn new(seed: u64, world_width: f64, world_height: f64) -> Self {
        Self {
            seed,
            world_width,
            world_height,
            cell_size: DEFAULT_CELL_SIZE,
            classifier: ClassifierParams::default(),
        }
    }

    /// Override the cell size.
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Validate the extents and return the grid size in cells.
    ///
    /// # Errors
    ///
    /// [`TerrainError::NonFinite`] for NaN or infinite inputs and
    /// [`TerrainError::InvalidDimensions`] when any of them is `<= 0` or the
    /// grid would exceed [`MAX_CELLS`].
    pub fn grid_dimensions(&self) -> Result<(usize, usize), TerrainError> {
        grid_dimensions(self.world_width, self.world_height, self.cell_size)
    }
}

fn grid_dimensions(
    world_width: f64,
    world_height: f64,
    cell_size: f64,
) -> Result<(usize, usize), TerrainError> {
    for (what, value) in [
        ("world_width", world_width),
        ("world_height", world_height),
        ("cell_size", cell_size),
    ] {
        if !value.is_finite() {
            return Err(TerrainError::NonFinite { what });
        }
    }
    let invalid = TerrainError::InvalidDimensions {
        world_width,
        world_height,
        cell_size,
    };
    if world_width <= 0.0 || world_height <= 0.0 || cell_size <= 0.0 {
        return Err(invalid);
    }

    let width = libm::ceil(world_width / cell_size);
    let height = libm::ceil(world_height / cell_size);
    // `usize::MAX as f64` rounds up to 2^64, so the open upper bound rejects
    // everything that would saturate in the cast. A quotient that underflows
    // to zero leaves an empty side.
    let fits = |cells: f64| (1.0..usize::MAX as f64).contains(&cells);
    if !(fits(width) && fits(height)) {
        return Err(invalid);
    }
    let (width, height) = (width as usize, height as usize);
    cell_count(width, height).ok_or(invalid)?;
    Ok((width, height))
}

/// `width * height` if it fits within [`MAX_CELLS`].
pub(crate) fn cell_count(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height).filter(|&n| n <= MAX_CELLS)
}

/// Row-major grid of biome labels, written once and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeGrid {
    width: usize,
    height: usize,
    cell_size: f64,
    world_width: f64,
    world_height: f64,
    cells: Vec<BiomeLabel>,
}

impl BiomeGrid {
    /// Classify every cell of the world described by `params`.
    ///
    /// # Errors
    ///
    /// See [`WorldParams::grid_dimensions`].
    pub fn generate(params: &WorldParams) -> Result<Self, TerrainError> {
        let (width, height) = params.grid_dimensions()?;
        let start = Instant::now();

        let classifier =
            BiomeClassifier::new(params.seed, width, height, params.classifier.clone());
        // Bounded by `MAX_CELLS` in `grid_dimensions`.
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(classifier.classify(x, y));
            }
        }

        tracing::debug!(
            seed = params.seed,
            width,
            height,
            elapsed_us = start.elapsed().as_micros() as u64,
            "generated biome grid"
        );

        Ok(Self {
            width,
            height,
            cell_size: params.cell_size,
            world_width: params.world_width,
            world_height: params.world_height,
            cells,
        })
    }

    /// Build a grid from explicit labels in row-major order.
    ///
    /// The world extent is taken to be exactly `width * cell_size` by
    /// `height * cell_size`.
    ///
    /// # Errors
    ///
    /// [`TerrainError::InvalidDimensions`] for an empty or oversized grid or a
    /// non-positive cell size, [`TerrainError::CellCountMismatch`] when `cells` does not
    /// hold `width * height` labels.
    pub fn from_cells(
        width: usize,
        height: usize,
        cell_size: f64,
        cells: Vec<BiomeLabel>,
    ) -> Result<Self, TerrainError> {
        let world_width = width as f64 * cell_size;
        let world_height = height as f64 * cell_size;
        grid_dimensions(world_width, world_height, cell_size)?;

        let expected = cell_count(width, height).ok_or(TerrainError::InvalidDimensions {
            world_width,
            world_height,
            cell_size,
        })?;
        if cells.len() != expected {
            return Err(TerrainError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            width,
            height,
            cell_size,
            world_width,
            world_height,
            cells,
        })
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` in cells.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn world_width(&self) -> f64 {
        self.world_width
    }

    pub fn world_height(&self) -> f64 {
        self.world_height
    }

    /// All labels, row-major (`y * width + x`).
    pub fn cells(&self) -> &[BiomeLabel] {
        &self.cells
    }

    /// Iterate rows from `y = 0` downward.
    pub fn rows(&self) -> impl Iterator<Item = &[BiomeLabel]> {
        self.cells.chunks_exact(self.width)
    }

    /// Flat index of cell `(x, y)`. Caller guarantees bounds.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Label at cell `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<BiomeLabel> {
        if x < self.width && y < self.height {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Map world coordinates to (possibly out-of-range) cell coordinates.
    #[inline]
    pub fn world_to_grid(&self, world_x: f64, world_y: f64) -> (i64, i64) {
        (
            libm::floor(world_x / self.cell_size) as i64,
            libm::floor(world_y / self.cell_size) as i64,
        )
    }

    /// Cell containing a world position, or `None` outside the grid.
    ///
    /// Non-finite coordinates never resolve to a cell.
    pub fn cell_at_world(&self, world_x: f64, world_y: f64) -> Option<(usize, usize)> {
        if !world_x.is_finite() || !world_y.is_finite() {
            return None;
        }
        let (gx, gy) = self.world_to_grid(world_x, world_y);
        if gx < 0 || gy < 0 {
            return None;
        }
        let (gx, gy) = (gx as usize, gy as usize);
        (gx < self.width && gy < self.height).then_some((gx, gy))
    }

    /// Label at a world position; [`BiomeLabel::Ocean`] outside the grid.
    #[inline]
    pub fn biome_at(&self, world_x: f64, world_y: f64) -> BiomeLabel {
        self.cell_at_world(world_x, world_y)
            .map_or(BiomeLabel::Ocean, |(x, y)| self.cells[self.index(x, y)])
    }
}
