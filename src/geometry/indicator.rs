// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Indicator decomposition of structures.
//!
//! The indicator of phase `i` is true exactly where the structure has label
//! `i`. The full indicator set of a structure is mutually exclusive and
//! exhaustive. The last phase is linearly dependent on the others, so most
//! operations use only the independent indicators `1..P-1`.

use crate::error::{Eq2pcError, Result};
use crate::geometry::grid::GridShape;
use crate::geometry::structure::{Phase, Structure};
use ndarray::{ArrayD, Dimension};

/// Boolean mask of one phase, same shape as its structure.
pub type Indicator = ArrayD<bool>;

/// Indicators of phases `1..=P` (`include_all`) or `1..P` (independent only).
pub fn decompose(structure: &Structure, include_all: bool) -> Vec<Indicator> {
    let phases = structure.num_phases() as Phase;
    let last = if include_all { phases } else { phases.saturating_sub(1) };
    let shape = structure.shape();
    (1..=last)
        .map(|phase| {
            ArrayD::from_shape_fn(shape.ix(), |index| {
                structure.cells()[shape.ravel(index.slice())] == phase
            })
        })
        .collect()
}

/// Rebuild a structure from its indicators.
///
/// Indicator `k` (0-based) marks phase `k + 1`. With `include_all` every cell
/// must be covered; otherwise uncovered cells take the implicit phase
/// `indicators.len() + 1`. Overlapping indicators are rejected.
///
/// The grid shape is taken from the first indicator, so an empty list is
/// `EmptyIndicators`. A single-phase structure has no independent
/// indicators; use [`recompose_in`] to rebuild it.
pub fn recompose(indicators: &[Indicator], include_all: bool) -> Result<Structure> {
    let first = indicators.first().ok_or(Eq2pcError::EmptyIndicators)?;
    let shape = GridShape::new(first.shape())?;
    recompose_in(&shape, indicators, include_all)
}

/// [`recompose`] on a known grid. An empty indicator list gives the
/// single-phase structure, or `UncoveredCell(0)` with `include_all`.
pub fn recompose_in(shape: &GridShape, indicators: &[Indicator], include_all: bool) -> Result<Structure> {
    let mut slots: Vec<Option<Phase>> = vec![None; shape.cells()];
    for (phase, indicator) in (1..).zip(indicators) {
        if indicator.shape() != shape.dims() {
            return Err(Eq2pcError::shape_mismatch(shape.dims(), indicator.shape()));
        }
        for (cell, &set) in indicator.iter().enumerate() {
            if !set {
                continue;
            }
            match slots[cell] {
                Some(previous) => {
                    return Err(Eq2pcError::OverlappingIndicators {
                        first: previous,
                        second: phase,
                        cell,
                    })
                }
                None => slots[cell] = Some(phase),
            }
        }
    }

    let fill = indicators.len() as Phase + 1;
    let cells = slots
        .into_iter()
        .enumerate()
        .map(|(cell, slot)| match slot {
            Some(phase) => Ok(phase),
            None if include_all => Err(Eq2pcError::UncoveredCell(cell)),
            None => Ok(fill),
        })
        .collect::<Result<Vec<Phase>>>()?;

    Ok(Structure::from_cells(shape.clone(), cells))
}
