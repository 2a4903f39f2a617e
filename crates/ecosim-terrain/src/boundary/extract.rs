//! Traversability edge scan.
//!
//! Segments are emitted only from the traversable side of an edge, so every
//! open/blocked edge yields exactly one segment. Cells on the grid border are
//! not tested against the outside: the world border is not a boundary.

use super::segment::{BoundarySegment, Orientation};
use crate::error::TerrainError;
use crate::grid::{BiomeGrid, cell_count};

/// Geometry shared by every segment of one scan.
struct ScanFrame {
    width: usize,
    height: usize,
    cell_size: f64,
    world_height: f64,
    thickness: f64,
}

impl ScanFrame {
    /// World-Y of grid row line `grid_y` (rows grow downward, world-Y up).
    #[inline]
    fn world_y(&self, grid_y: f64) -> f64 {
        self.world_height - grid_y * self.cell_size
    }

    fn vertical(&self, line_x: usize, row: usize) -> BoundarySegment {
        BoundarySegment {
            x: line_x as f64 * self.cell_size,
            y: self.world_y(row as f64 + 0.5),
            length: self.cell_size,
            orientation: Orientation::Vertical,
            thickness: self.thickness,
        }
    }

    fn horizontal(&self, column: usize, line_y: usize) -> BoundarySegment {
        BoundarySegment {
            x: (column as f64 + 0.5) * self.cell_size,
            y: self.world_y(line_y as f64),
            length: self.cell_size,
            orientation: Orientation::Horizontal,
            thickness: self.thickness,
        }
    }

    fn scan(&self, open: impl Fn(usize, usize) -> bool) -> Vec<BoundarySegment> {
        let mut segments = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if !open(x, y) {
                    continue;
                }
                if x + 1 < self.width && !open(x + 1, y) {
                    segments.push(self.vertical(x + 1, y));
                }
                if x > 0 && !open(x - 1, y) {
                    segments.push(self.vertical(x, y));
                }
                if y > 0 && !open(x, y - 1) {
                    segments.push(self.horizontal(x, y));
                }
                if y + 1 < self.height && !open(x, y + 1) {
                    segments.push(self.horizontal(x, y + 1));
                }
            }
        }
        segments
    }
}

/// Emit one segment per edge between a traversable and a blocked cell.
///
/// Order is row-major by the traversable cell, then right, left, top, bottom.
pub fn extract_segments(grid: &BiomeGrid, thickness: f64) -> Vec<BoundarySegment> {
    let frame = ScanFrame {
        width: grid.width(),
        height: grid.height(),
        cell_size: grid.cell_size(),
        world_height: grid.world_height(),
        thickness,
    };
    let cells = grid.cells();
    frame.scan(|x, y| cells[y * frame.width + x].is_traversable())
}

/// [`extract_segments`] over a bare traversability buffer (`1` = open).
///
/// # Errors
///
/// [`TerrainError::MapSizeMismatch`] if `map.len() != width * height`,
/// [`TerrainError::InvalidDimensions`] if that product overflows.
pub fn extract_segments_from_map(
    map: &[u8],
    width: usize,
    height: usize,
    cell_size: f64,
    world_height: f64,
    thickness: f64,
) -> Result<Vec<BoundarySegment>, TerrainError> {
    let expected = cell_count(width, height).ok_or(TerrainError::InvalidDimensions {
        world_width: width as f64 * cell_size,
        world_height,
        cell_size,
    })?;
    if map.len() != expected {
        return Err(TerrainError::MapSizeMismatch {
            expected,
            actual: map.len(),
        });
    }
    let frame = ScanFrame {
        width,
        height,
        cell_size,
        world_height,
        thickness,
    };
    Ok(frame.scan(|x, y| map[y * width + x] != 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::BiomeLabel;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const CS: f64 = 50.0;

    /// Identify the grid edge a segment sits on: `(orientation, line, cell)`.
    fn edge_key(seg: &BoundarySegment, world_height: f64) -> (Orientation, i64, i64) {
        match seg.orientation {
            Orientation::Vertical => (
                Orientation::Vertical,
                (seg.x / CS).round() as i64,
                ((world_height - seg.y) / CS).floor() as i64,
            ),
            Orientation::Horizontal => (
                Orientation::Horizontal,
                ((world_height - seg.y) / CS).round() as i64,
                (seg.x / CS).floor() as i64,
            ),
        }
    }

    fn key_rank(k: &(Orientation, i64, i64)) -> (u8, i64, i64) {
        (k.0 as u8, k.1, k.2)
    }

    fn random_grid(rng: &mut ChaCha8Rng, width: usize, height: usize) -> BiomeGrid {
        let cells = (0..width * height)
            .map(|_| {
                if rng.random_bool(0.5) {
                    BiomeLabel::Grassland
                } else {
                    BiomeLabel::Ocean
                }
            })
            .collect();
        BiomeGrid::from_cells(width, height, CS, cells).unwrap()
    }

    #[test]
    fn test_single_open_cell_in_blocked_ring() {
        use BiomeLabel::*;
        #[rustfmt::skip]
        let cells = vec![
            Ocean, Ocean,  Ocean,
            Ocean, Forest, Mountain,
            Ocean, Ocean,  Ocean,
        ];
        let grid = BiomeGrid::from_cells(3, 3, CS, cells).unwrap();
        let segs = extract_segments(&grid, 8.0);

        assert_eq!(segs.len(), 4);
        // right, left, top, bottom of cell (1, 1); world height 150.
        assert_eq!((segs[0].x, segs[0].y), (100.0, 75.0));
        assert_eq!(segs[0].orientation, Orientation::Vertical);
        assert_eq!((segs[1].x, segs[1].y), (50.0, 75.0));
        assert_eq!((segs[2].x, segs[2].y), (75.0, 100.0));
        assert_eq!(segs[2].orientation, Orientation::Horizontal);
        assert_eq!((segs[3].x, segs[3].y), (75.0, 50.0));
        assert!(segs.iter().all(|s| s.length == CS && s.thickness == 8.0));
    }

    #[test]
    fn test_world_border_is_not_a_boundary() {
        let grid = BiomeGrid::from_cells(4, 3, CS, vec![BiomeLabel::Grassland; 12]).unwrap();
        assert!(extract_segments(&grid, 8.0).is_empty());
    }

    #[test]
    fn test_all_blocked_has_no_segments() {
        let grid = BiomeGrid::from_cells(4, 3, CS, vec![BiomeLabel::Ocean; 12]).unwrap();
        assert!(extract_segments(&grid, 8.0).is_empty());
    }

    #[test]
    fn test_y_axis_is_flipped() {
        use BiomeLabel::*;
        // Open cell in grid row 0 above a blocked cell in row 1.
        let grid = BiomeGrid::from_cells(1, 2, CS, vec![Desert, Ocean]).unwrap();
        let segs = extract_segments(&grid, 8.0);
        assert_eq!(segs.len(), 1);
        // Grid line y = 1 sits at world y = 100 - 50.
        assert_eq!(segs[0].y, 50.0);
        assert_eq!(segs[0].orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_every_mixed_edge_exactly_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xB0DE);
        for _ in 0..25 {
            let width = rng.random_range(1..12);
            let height = rng.random_range(1..12);
            let grid = random_grid(&mut rng, width, height);
            let open = |x: usize, y: usize| grid.get(x, y).is_some_and(|l| l.is_traversable());

            let mut expected = Vec::new();
            for y in 0..height {
                for x in 0..width {
                    if x + 1 < width && open(x, y) != open(x + 1, y) {
                        expected.push((Orientation::Vertical, x as i64 + 1, y as i64));
                    }
                    if y + 1 < height && open(x, y) != open(x, y + 1) {
                        expected.push((Orientation::Horizontal, y as i64 + 1, x as i64));
                    }
                }
            }

            let mut emitted: Vec<_> = extract_segments(&grid, 8.0)
                .iter()
                .map(|s| edge_key(s, grid.world_height()))
                .collect();
            let emitted_count = emitted.len();
            emitted.sort_by_key(key_rank);
            emitted.dedup();
            assert_eq!(emitted.len(), emitted_count, "duplicate segment emitted");

            expected.sort_by_key(key_rank);
            assert_eq!(emitted, expected);
        }
    }

    #[test]
    fn test_map_variant_matches_grid_variant() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let grid = random_grid(&mut rng, 9, 7);
        let map: Vec<u8> = grid.cells().iter().map(|l| u8::from(l.is_traversable())).collect();
        let from_map =
            extract_segments_from_map(&map, 9, 7, CS, grid.world_height(), 8.0).unwrap();
        assert_eq!(from_map, extract_segments(&grid, 8.0));
    }

    #[test]
    fn test_map_variant_checks_length() {
        let err = extract_segments_from_map(&[1, 0, 1], 2, 2, CS, 100.0, 8.0).unwrap_err();
        assert_eq!(
            err,
            TerrainError::MapSizeMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_map_variant_rejects_overflowing_grid() {
        let err = extract_segments_from_map(&[], usize::MAX, 2, CS, 100.0, 8.0).unwrap_err();
        assert!(matches!(err, TerrainError::InvalidDimensions { .. }));
    }
}
