//! Per-biome cell counts for logging and diagnostics.

use crate::biome::BiomeLabel;
use crate::grid::BiomeGrid;

/// Histogram of a grid's labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridStats {
    /// Cell count per label, indexed by [`BiomeLabel::index`].
    pub counts: [usize; BiomeLabel::COUNT],
    /// Total number of cells.
    pub total: usize,
    /// Number of traversable cells.
    pub traversable: usize,
}

impl GridStats {
    pub fn from_grid(grid: &BiomeGrid) -> Self {
        let mut counts = [0; BiomeLabel::COUNT];
        for label in grid.cells() {
            counts[label.index() as usize] += 1;
        }
        let traversable = BiomeLabel::ALL
            .iter()
            .filter(|l| l.is_traversable())
            .map(|l| counts[l.index() as usize])
            .sum();
        Self {
            counts,
            total: grid.cells().len(),
            traversable,
        }
    }

    pub fn count(&self, label: BiomeLabel) -> usize {
        self.counts[label.index() as usize]
    }

    /// Share of traversable cells in `[0, 1]`; `0.0` for an empty grid.
    pub fn traversable_fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.traversable as f64 / self.total as f64
        }
    }

    /// Most common traversable biome. Ties go to the lower label index.
    pub fn dominant_land_biome(&self) -> Option<BiomeLabel> {
        BiomeLabel::ALL
            .iter()
            .copied()
            .filter(|l| l.is_traversable() && self.count(*l) > 0)
            .fold(None, |best: Option<BiomeLabel>, l| match best {
                Some(b) if self.count(b) >= self.count(l) => Some(b),
                _ => Some(l),
            })
    }
}
