// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Grid and structure model.
//!
//! This module contains the data types the correlation engine and the
//! relation detector operate on:
//! - GridShape: validated 1-, 2- or 3-dimensional periodic grid
//! - EventCounts: number of cells per phase (last phase implicit)
//! - Structure: phase labels on a grid, indexed periodically
//! - Indicator: boolean mask of one phase
//! - transform: operations that map 2PC-equivalent structures to 2PC-equivalent structures

pub mod grid;
pub mod indicator;
pub mod structure;
pub mod transform;

// Re-export for convenience
pub use grid::{EventCounts, GridShape, MAX_DIMENSIONS};
pub use indicator::{decompose, recompose, recompose_in, Indicator};
pub use structure::{Phase, Placement, Structure};
