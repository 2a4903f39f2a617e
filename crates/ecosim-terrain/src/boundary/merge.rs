//! Greedy rectangle coalescing.
//!
//! Each unused rectangle grows by absorbing every unused rectangle that shares
//! its cross extent and touches it end to end, rescanning until a full pass
//! makes no change. Output depends on input order but is deterministic for a
//! given order.

use super::segment::MergedRectangle;

/// Merge eligibility thresholds in world units.
///
/// The two segments on opposite sides of a one-cell-wide strip are
/// `cell_size - thickness` apart and share their cross extent. `gap` must not
/// exceed that distance or the merge bridges the strip; see
/// [`separates_adjacent_edges`](Self::separates_adjacent_edges).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeTolerance {
    /// Maximum difference in cross extent and center line for two rectangles
    /// to count as collinear.
    pub alignment: f64,
    /// Maximum distance between facing edges for two rectangles to count as
    /// touching.
    pub gap: f64,
}

impl Default for MergeTolerance {
    fn default() -> Self {
        Self {
            alignment: 1.0,
            gap: 2.0,
        }
    }
}

impl MergeTolerance {
    /// Whether segments on opposite edges of one cell stay apart when merged.
    pub fn separates_adjacent_edges(&self, cell_size: f64, thickness: f64) -> bool {
        self.gap <= cell_size - thickness
    }
}

/// Grow `current` by `other` if they are collinear and touching.
fn absorb(
    current: &MergedRectangle,
    other: &MergedRectangle,
    tol: &MergeTolerance,
) -> Option<MergedRectangle> {
    let same_row = (current.height - other.height).abs() < tol.alignment
        && (current.y - other.y).abs() < tol.alignment;
    if same_row {
        if (current.right() - other.left()).abs() < tol.gap {
            return Some(MergedRectangle::from_extents(
                current.left(),
                other.right(),
                current.bottom(),
                current.top(),
            ));
        }
        if (other.right() - current.left()).abs() < tol.gap {
            return Some(MergedRectangle::from_extents(
                other.left(),
                current.right(),
                current.bottom(),
                current.top(),
            ));
        }
    }

    let same_column = (current.width - other.width).abs() < tol.alignment
        && (current.x - other.x).abs() < tol.alignment;
    if same_column {
        if (current.top() - other.bottom()).abs() < tol.gap {
            return Some(MergedRectangle::from_extents(
                current.left(),
                current.right(),
                current.bottom(),
                other.top(),
            ));
        }
        if (other.top() - current.bottom()).abs() < tol.gap {
            return Some(MergedRectangle::from_extents(
                current.left(),
                current.right(),
                other.bottom(),
                current.top(),
            ));
        }
    }

    None
}

/// Coalesce touching, same-size rectangles.
///
/// Never returns more rectangles than it was given; an empty input gives an
/// empty output.
pub fn merge_rectangles(rects: &[MergedRectangle], tol: &MergeTolerance) -> Vec<MergedRectangle> {
    let mut used = vec![false; rects.len()];
    let mut merged = Vec::new();

    for i in 0..rects.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let mut current = rects[i];

        loop {
            let mut extended = false;
            for (j, other) in rects.iter().enumerate() {
                if used[j] {
                    continue;
                }
                if let Some(grown) = absorb(&current, other, tol) {
                    current = grown;
                    used[j] = true;
                    extended = true;
                }
            }
            if !extended {
                break;
            }
        }

        merged.push(current);
    }

    merged
}
