//! Spatial Hash Grid Broad Phase
//!
//! A uniform grid over the world rectangle that maps each body's AABB to
//! the range of cells it covers. Candidate pairs come from shared cells,
//! which keeps the narrow phase close to O(n) for well-distributed scenes.
//!
//! # How It Works
//!
//! The world is cut into `columns x rows` cells of `cell_size` on a side.
//! Bodies register under every cell their AABB touches and remember the
//! covered [`CellRange`], so removal and incremental updates never rescan
//! the whole grid. Queries stamp visited bodies with a monotonically
//! increasing counter to deduplicate neighbors that share several cells
//! with the query body.
//!
//! Out-of-range positions are clamped onto the border cells, so bodies
//! that leave the world keep participating until the caller prunes them.
//!
//! Author: Moroya Sakamoto

use log::debug;

use crate::body::{Aabb, RigidBody};

/// Inclusive rectangle of grid cells covered by one body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

/// Uniform-cell broad phase over a fixed world rectangle.
///
/// Cells store body indices into the world's body list. The grid never
/// allocates per query: callers pass a scratch buffer that is cleared and
/// refilled.
pub struct SpatialHashGrid {
    columns: usize,
    rows: usize,
    cell_size: f64,
    cells: Vec<Vec<usize>>,
    query_counter: u64,
}

impl SpatialHashGrid {
    /// Create a grid covering `width x height` with square cells of
    /// `cell_size` on a side. Dimensions are floored to whole cells and
    /// held to at least one cell per axis.
    #[must_use]
    pub fn new(width: f64, height: f64, cell_size: f64) -> Self {
        let columns = ((width / cell_size).floor() as usize).max(1);
        let rows = ((height / cell_size).floor() as usize).max(1);
        debug!(
            "spatial hash grid: {}x{} cells of {} ({} total)",
            columns,
            rows,
            cell_size,
            columns * rows
        );
        Self {
            columns,
            rows,
            cell_size,
            cells: vec![Vec::new(); columns * rows],
            query_counter: 0,
        }
    }

    /// Cells per row.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Cells per column.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total cell count.
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.columns + x
    }

    // NaN maps to cell 0 through the saturating cast.
    #[inline]
    fn clamp_to_axis(value: f64, cell_limit: usize) -> usize {
        value.clamp(0.0, (cell_limit - 1) as f64) as usize
    }

    /// Cell range covered by an AABB, clamped onto the grid border.
    fn cell_range(&self, aabb: &Aabb) -> CellRange {
        CellRange {
            min_x: Self::clamp_to_axis((aabb.min.x / self.cell_size).floor(), self.columns),
            min_y: Self::clamp_to_axis((aabb.min.y / self.cell_size).floor(), self.rows),
            max_x: Self::clamp_to_axis((aabb.max.x / self.cell_size).floor(), self.columns),
            max_y: Self::clamp_to_axis((aabb.max.y / self.cell_size).floor(), self.rows),
        }
    }

    /// Register `index` under every cell the body's AABB covers and record
    /// the range on the body.
    pub fn insert(&mut self, body: &mut RigidBody, index: usize) {
        let range = self.cell_range(&body.aabb());
        for y in range.min_y..=range.max_y {
            for x in range.min_x..=range.max_x {
                let cell = self.cell_index(x, y);
                self.cells[cell].push(index);
            }
        }
        body.cell_range = Some(range);
    }

    /// Remove `index` from the body's recorded cell range. No-op when the
    /// body was never inserted.
    pub fn remove(&mut self, body: &mut RigidBody, index: usize) {
        let Some(range) = body.cell_range.take() else {
            return;
        };
        for y in range.min_y..=range.max_y {
            for x in range.min_x..=range.max_x {
                let cell = self.cell_index(x, y);
                if let Some(slot) = self.cells[cell].iter().position(|&id| id == index) {
                    self.cells[cell].swap_remove(slot);
                }
            }
        }
    }

    /// Refresh the body's cell membership after it moved. Cheap no-op while
    /// the covered range is unchanged.
    pub fn update(&mut self, body: &mut RigidBody, index: usize) {
        let range = self.cell_range(&body.aabb());
        if body.cell_range == Some(range) {
            return;
        }
        self.remove(body, index);
        self.insert(body, index);
    }

    /// Rewrite the moved body's stored index after a swap-remove in the
    /// body list changed its slot from `old_index` to `new_index`.
    pub fn reindex(&mut self, body: &RigidBody, old_index: usize, new_index: usize) {
        let Some(range) = body.cell_range else {
            return;
        };
        for y in range.min_y..=range.max_y {
            for x in range.min_x..=range.max_x {
                let cell = self.cell_index(x, y);
                for slot in &mut self.cells[cell] {
                    if *slot == old_index {
                        *slot = new_index;
                    }
                }
            }
        }
    }

    /// Collect candidate neighbors of `index` into `out`: every other body
    /// sharing at least one covered cell, each reported once. The range is
    /// recomputed from the current AABB, so queries see the latest pose
    /// even before `update` ran.
    pub fn query_nearby(&mut self, bodies: &mut [RigidBody], index: usize, out: &mut Vec<usize>) {
        out.clear();
        let range = self.cell_range(&bodies[index].aabb());
        self.query_counter += 1;
        let counter = self.query_counter;
        for y in range.min_y..=range.max_y {
            for x in range.min_x..=range.max_x {
                let cell = self.cell_index(x, y);
                for &neighbor in &self.cells[cell] {
                    if neighbor == index || bodies[neighbor].query_stamp == counter {
                        continue;
                    }
                    bodies[neighbor].query_stamp = counter;
                    out.push(neighbor);
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
