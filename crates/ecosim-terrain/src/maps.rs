//! Flat per-cell projections of a [`BiomeGrid`] through the biome table.

use crate::grid::BiomeGrid;

/// Traversability, food and label-index arrays, index `y * width + x`.
///
/// Computed once from a grid and only ever handed out as shared slices.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedMaps {
    traversability: Vec<u8>,
    food: Vec<f64>,
    labels: Vec<u8>,
}

impl DerivedMaps {
    /// Project every cell of `grid`.
    pub fn from_grid(grid: &BiomeGrid) -> Self {
        let cells = grid.cells();
        let mut traversability = Vec::with_capacity(cells.len());
        let mut food = Vec::with_capacity(cells.len());
        let mut labels = Vec::with_capacity(cells.len());

        for &label in cells {
            let attrs = label.attributes();
            traversability.push(u8::from(attrs.traversable));
            food.push(attrs.food_multiplier);
            labels.push(label.index());
        }

        Self {
            traversability,
            food,
            labels,
        }
    }

    /// `1` for open cells, `0` for blocked ones.
    pub fn traversability(&self) -> &[u8] {
        &self.traversability
    }

    pub fn food(&self) -> &[f64] {
        &self.food
    }

    /// [`BiomeLabel::index`](crate::BiomeLabel::index) per cell.
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
