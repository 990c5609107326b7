// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Labeled periodic structures.
//!
//! A Structure assigns a phase label in `1..=P` to every cell of a grid.
//! Structures are immutable: shifting, reflecting and relabeling all
//! produce new structures.
//!
//! # Examples
//!
//! ```
//! use eq2pc_search::geometry::{EventCounts, GridShape, Placement, Structure};
//!
//! let shape = GridShape::new(&[2, 3]).unwrap();
//! let events = EventCounts::new(&[2, 1]).unwrap();
//! let s = Structure::generate(&shape, &events, Placement::Blocks).unwrap();
//!
//! assert_eq!(s.to_flat(), vec![1, 1, 2, 3, 3, 3]);
//! assert_eq!(s.num_phases(), 3);
//! assert_eq!(s.event_counts(), vec![2, 1, 3]);
//! ```

use crate::error::{Eq2pcError, Result};
use crate::geometry::grid::{EventCounts, GridShape};
use ndarray::{ArrayD, Dimension};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// A phase label. Valid labels start at 1.
pub type Phase = u32;

/// How `Structure::generate` lays out the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Phase 1 fills the first cells in flattening order, then phase 2, and so on.
    Blocks,
    /// Block layout shuffled with a ChaCha8 generator seeded from `seed`.
    Shuffled { seed: u64 },
}

/// Phase labels on a periodic grid, stored in flattening order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Structure {
    shape: GridShape,
    cells: Vec<Phase>,
}

impl Structure {
    /// Build a structure from trusted parts.
    pub(crate) fn from_cells(shape: GridShape, cells: Vec<Phase>) -> Self {
        debug_assert_eq!(shape.cells(), cells.len());
        Self { shape, cells }
    }

    /// Rebuild a structure from a flat label sequence in flattening order.
    ///
    /// Only the length and the label range are checked; whether the phase
    /// counts are consistent with some search is up to the caller.
    pub fn from_flat(shape: &GridShape, labels: Vec<Phase>) -> Result<Self> {
        if labels.len() != shape.cells() {
            return Err(Eq2pcError::FlatLengthMismatch {
                shape: shape.dims().to_vec(),
                expected: shape.cells(),
                found: labels.len(),
            });
        }
        if let Some(cell) = labels.iter().position(|&label| label == 0) {
            return Err(Eq2pcError::InvalidLabel { label: 0, cell });
        }
        Ok(Self::from_cells(shape.clone(), labels))
    }

    /// Build a structure from an ndarray of labels.
    pub fn from_array(array: &ArrayD<Phase>) -> Result<Self> {
        let shape = GridShape::new(array.shape())?;
        Self::from_flat(&shape, array.iter().copied().collect())
    }

    /// Generate a structure with exactly the given event counts.
    ///
    /// Cells not claimed by any explicit count stay unassigned until the end,
    /// then receive the implicit last phase `len(events) + 1`.
    pub fn generate(shape: &GridShape, events: &EventCounts, placement: Placement) -> Result<Self> {
        events.validate_for(shape)?;

        let mut slots: Vec<Option<Phase>> = vec![None; shape.cells()];
        let mut next = 0;
        for (phase, &count) in (1..).zip(events.counts()) {
            for slot in &mut slots[next..next + count] {
                *slot = Some(phase);
            }
            next += count;
        }

        if let Placement::Shuffled { seed } = placement {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            slots.shuffle(&mut rng);
        }

        let fill = events.counts().len() as Phase + 1;
        let cells = slots.into_iter().map(|slot| slot.unwrap_or(fill)).collect();
        Ok(Self::from_cells(shape.clone(), cells))
    }

    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// Labels in flattening order.
    pub fn cells(&self) -> &[Phase] {
        &self.cells
    }

    /// Flat label sequence for persistence.
    pub fn to_flat(&self) -> Vec<Phase> {
        self.cells.clone()
    }

    /// Labels as an ndarray, for rendering and other consumers.
    pub fn to_array(&self) -> ArrayD<Phase> {
        ArrayD::from_shape_fn(self.shape.ix(), |index| {
            self.cells[self.shape.ravel(index.slice())]
        })
    }

    /// Label at a multi-index; indices wrap periodically.
    pub fn get(&self, index: &[usize]) -> Result<Phase> {
        self.check_index(index)?;
        Ok(self.cells[self.shape.ravel(index)])
    }

    /// Number of phases, i.e. the largest label present.
    pub fn num_phases(&self) -> usize {
        self.cells.iter().copied().max().unwrap_or(0) as usize
    }

    /// Number of cells of each phase `1..=num_phases`.
    pub fn event_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.num_phases()];
        for &label in &self.cells {
            counts[label as usize - 1] += 1;
        }
        counts
    }

    /// Periodic roll: `result[x] = self[x - shift]`.
    pub fn shift(&self, shift: &[usize]) -> Result<Structure> {
        self.check_index(shift)?;
        let source = self.shape.offset_table(&self.shape.inverse_offset(shift));
        let cells = source.iter().map(|&from| self.cells[from]).collect();
        Ok(Self::from_cells(self.shape.clone(), cells))
    }

    /// Mirror the structure along every axis in `axes`.
    pub fn reflect(&self, axes: &[usize]) -> Result<Structure> {
        let dims = self.shape.dims();
        if let Some(&axis) = axes.iter().find(|&&axis| axis >= dims.len()) {
            return Err(Eq2pcError::InvalidAxis {
                axis,
                ndim: dims.len(),
            });
        }
        let cells = self
            .shape
            .positions()
            .map(|mut index| {
                for &axis in axes {
                    index[axis] = dims[axis] - 1 - index[axis];
                }
                self.cells[self.shape.ravel(&index)]
            })
            .collect();
        Ok(Self::from_cells(self.shape.clone(), cells))
    }

    fn check_index(&self, index: &[usize]) -> Result<()> {
        if index.len() != self.shape.ndim() {
            return Err(Eq2pcError::IndexMismatch {
                index: index.to_vec(),
                ndim: self.shape.ndim(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    fn grid(dims: &[usize]) -> GridShape {
        GridShape::new(dims).unwrap()
    }

    #[test]
    fn test_block_generation_is_deterministic() {
        let shape = grid(&[4, 3]);
        let events = EventCounts::new(&[3, 2]).unwrap();
        let first = Structure::generate(&shape, &events, Placement::Blocks).unwrap();
        let second = Structure::generate(&shape, &events, Placement::Blocks).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_flat(), vec![1, 1, 1, 2, 2, 3, 3, 3, 3, 3, 3, 3]);
    }

    #[test]
    fn test_full_events_have_no_implicit_phase() {
        let shape = grid(&[4]);
        let events = EventCounts::new(&[1, 3]).unwrap();
        let s = Structure::generate(&shape, &events, Placement::Blocks).unwrap();
        assert_eq!(s.to_flat(), vec![1, 2, 2, 2]);
        assert_eq!(s.num_phases(), 2);
    }

    #[test]
    fn test_shuffled_generation_keeps_counts_and_seed() {
        let shape = grid(&[3, 3, 2]);
        let events = EventCounts::new(&[4, 5, 2]).unwrap();
        let a = Structure::generate(&shape, &events, Placement::Shuffled { seed: 7 }).unwrap();
        let b = Structure::generate(&shape, &events, Placement::Shuffled { seed: 7 }).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.event_counts(), vec![4, 5, 2, 7]);
    }

    #[test]
    fn test_generation_rejects_overfull_events() {
        let shape = grid(&[2, 2]);
        let events = EventCounts::new(&[3, 2]).unwrap();
        assert!(matches!(
            Structure::generate(&shape, &events, Placement::Blocks),
            Err(Eq2pcError::EventsExceedCapacity { .. })
        ));
    }

    #[test]
    fn test_from_flat_validation() {
        let shape = grid(&[2, 2]);
        assert!(matches!(
            Structure::from_flat(&shape, vec![1, 2, 3]),
            Err(Eq2pcError::FlatLengthMismatch { expected: 4, found: 3, .. })
        ));
        assert_eq!(
            Structure::from_flat(&shape, vec![1, 0, 2, 2]),
            Err(Eq2pcError::InvalidLabel { label: 0, cell: 1 })
        );
    }

    #[test]
    fn test_array_round_trip() {
        let shape = grid(&[2, 3]);
        let s = Structure::from_flat(&shape, vec![1, 2, 3, 3, 2, 1]).unwrap();
        let array = s.to_array();
        assert_eq!(array.shape(), &[2, 3]);
        assert_eq!(array[IxDyn(&[1, 0])], 3);
        assert_eq!(Structure::from_array(&array).unwrap(), s);
    }

    #[test]
    fn test_shift_is_periodic_roll() {
        let shape = grid(&[4]);
        let s = Structure::from_flat(&shape, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(s.shift(&[1]).unwrap().to_flat(), vec![4, 1, 2, 3]);
        assert_eq!(s.shift(&[3]).unwrap().to_flat(), vec![2, 3, 4, 1]);
        assert_eq!(s.shift(&[0]).unwrap(), s);
    }

    #[test]
    fn test_shift_2d() {
        let shape = grid(&[2, 3]);
        let s = Structure::from_flat(&shape, vec![1, 2, 3, 4, 5, 6]).unwrap();
        // np.roll(s, (1, 1), (0, 1))
        assert_eq!(s.shift(&[1, 1]).unwrap().to_flat(), vec![6, 4, 5, 3, 1, 2]);
    }

    #[test]
    fn test_reflect() {
        let shape = grid(&[2, 3]);
        let s = Structure::from_flat(&shape, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(s.reflect(&[0]).unwrap().to_flat(), vec![4, 5, 6, 1, 2, 3]);
        assert_eq!(s.reflect(&[1]).unwrap().to_flat(), vec![3, 2, 1, 6, 5, 4]);
        assert_eq!(s.reflect(&[0, 1]).unwrap().to_flat(), vec![6, 5, 4, 3, 2, 1]);
        assert_eq!(s.reflect(&[0]).unwrap().reflect(&[0]).unwrap(), s);
    }

    #[test]
    fn test_bad_axes_and_indices_are_errors() {
        let s = Structure::from_flat(&grid(&[3]), vec![1, 2, 2]).unwrap();
        assert_eq!(s.reflect(&[1]), Err(Eq2pcError::InvalidAxis { axis: 1, ndim: 1 }));
        assert_eq!(
            s.shift(&[1, 0]),
            Err(Eq2pcError::IndexMismatch {
                index: vec![1, 0],
                ndim: 1
            })
        );
        assert_eq!(s.get(&[]), Err(Eq2pcError::IndexMismatch { index: vec![], ndim: 1 }));
    }

    #[test]
    fn test_get_wraps_periodically() {
        let s = Structure::from_flat(&grid(&[2, 3]), vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(s.get(&[1, 2]), Ok(6));
        assert_eq!(s.get(&[3, 4]), Ok(5));
        // A short index no longer reads the cell of its prefix
        assert!(s.get(&[1]).is_err());
    }
}
