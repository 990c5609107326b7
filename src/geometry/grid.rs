// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Periodic grid shapes and event counts.
//!
//! Cells are addressed either by a multi-index or by their position in
//! row-major flattening order (last axis fastest). All index arithmetic is
//! periodic: indices wrap modulo the grid dimension along each axis.

use crate::error::{Eq2pcError, Result};
use ndarray::IxDyn;
use std::fmt;

/// Largest supported grid dimensionality.
pub const MAX_DIMENSIONS: usize = 3;

/// Shape of a periodic grid: 1 to 3 positive dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridShape(Vec<usize>);

impl GridShape {
    /// Create a grid shape, rejecting zero dimensions and dimensionality outside 1..=3.
    pub fn new(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() || dims.len() > MAX_DIMENSIONS {
            return Err(Eq2pcError::UnsupportedDimensionality(dims.len()));
        }
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(Eq2pcError::invalid_shape(
                dims,
                format!("axis {} has zero length", axis),
            ));
        }
        Ok(Self(dims.to_vec()))
    }

    /// Grid dimensions.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Total number of cells.
    pub fn cells(&self) -> usize {
        self.0.iter().product()
    }

    /// ndarray dimension for this shape.
    pub fn ix(&self) -> IxDyn {
        IxDyn(&self.0)
    }

    /// Flat (row-major) position of a multi-index. Indices wrap periodically.
    pub fn ravel(&self, index: &[usize]) -> usize {
        self.0
            .iter()
            .zip(index)
            .fold(0, |flat, (&d, &i)| flat * d + i % d)
    }

    /// Multi-index of a flat position.
    pub fn unravel(&self, mut flat: usize) -> Vec<usize> {
        let mut index = vec![0; self.0.len()];
        for (axis, &d) in self.0.iter().enumerate().rev() {
            index[axis] = flat % d;
            flat /= d;
        }
        index
    }

    /// All multi-indices in flattening order.
    pub fn positions(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        (0..self.cells()).map(move |flat| self.unravel(flat))
    }

    /// For every cell `x`, the flat position of `x + offset` (mod the grid).
    ///
    /// Shifts and correlations are evaluated through these tables so the hot
    /// loops only do slice lookups.
    pub fn offset_table(&self, offset: &[usize]) -> Vec<usize> {
        self.positions()
            .map(|index| {
                let moved: Vec<usize> = index
                    .iter()
                    .zip(offset)
                    .zip(&self.0)
                    .map(|((&i, &o), &d)| (i + o % d) % d)
                    .collect();
                self.ravel(&moved)
            })
            .collect()
    }

    /// The offset that undoes `offset`, i.e. `-offset mod d` per axis.
    pub fn inverse_offset(&self, offset: &[usize]) -> Vec<usize> {
        offset
            .iter()
            .zip(&self.0)
            .map(|(&o, &d)| (d - o % d) % d)
            .collect()
    }

    /// Check that another shape matches this one.
    pub fn expect_same(&self, other: &GridShape) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(Eq2pcError::shape_mismatch(&self.0, &other.0))
        }
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        write!(f, "[{}]", dims.join("x"))
    }
}

/// Number of cells carrying each phase label.
///
/// Entry `k` counts the cells of phase `k + 1`. Cells not accounted for
/// belong to one extra, implicit phase `len + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventCounts(Vec<usize>);

impl EventCounts {
    /// Create event counts; the list must not be empty.
    pub fn new(events: &[usize]) -> Result<Self> {
        if events.is_empty() {
            return Err(Eq2pcError::invalid_events(events, "no phases given"));
        }
        Ok(Self(events.to_vec()))
    }

    /// Explicit counts.
    pub fn counts(&self) -> &[usize] {
        &self.0
    }

    /// Sum of the explicit counts.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Check that the counts fit in the grid.
    pub fn validate_for(&self, shape: &GridShape) -> Result<()> {
        let total = self.total();
        let capacity = shape.cells();
        if total > capacity {
            return Err(Eq2pcError::EventsExceedCapacity {
                events: self.0.clone(),
                total,
                capacity,
            });
        }
        Ok(())
    }

    /// Number of cells left for the implicit last phase.
    pub fn implicit(&self, shape: &GridShape) -> usize {
        shape.cells().saturating_sub(self.total())
    }

    /// Number of phases a structure with these counts has on `shape`.
    pub fn num_phases(&self, shape: &GridShape) -> usize {
        if self.implicit(shape) > 0 {
            self.0.len() + 1
        } else {
            self.0.len()
        }
    }
}
