// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error type shared by every module of the crate.

use thiserror::Error;

/// Errors raised by grid construction, correlation, relation and search operations.
///
/// Every precondition failure is reported before any enumeration work starts;
/// a search that returns an error never returns partial cases.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Eq2pcError {
    /// A grid dimension is zero or the dimension list is empty.
    #[error("Invalid grid shape {shape:?}: {reason}")]
    InvalidShape { shape: Vec<usize>, reason: String },

    /// Only 1-, 2- and 3-dimensional grids are supported.
    #[error("Unsupported dimensionality {0} (expected 1, 2 or 3)")]
    UnsupportedDimensionality(usize),

    /// The event count list is malformed (e.g. empty).
    #[error("Invalid event counts {events:?}: {reason}")]
    InvalidEvents { events: Vec<usize>, reason: String },

    /// The event counts need more cells than the grid has.
    #[error("Event counts {events:?} total {total} but the grid only has {capacity} cells")]
    EventsExceedCapacity {
        events: Vec<usize>,
        total: usize,
        capacity: usize,
    },

    /// Cell 0 is pinned to phase 1, so phase 1 needs at least one event.
    #[error("Event counts {0:?} leave phase 1 empty; the anchored cell needs phase 1")]
    UnanchoredEvents(Vec<usize>),

    /// A multi-index or shift vector without one component per grid axis.
    #[error("Index {index:?} does not have one component per axis of a {ndim}-dimensional grid")]
    IndexMismatch { index: Vec<usize>, ndim: usize },

    /// A reflection axis beyond the grid's dimensionality.
    #[error("Axis {axis} out of range for a {ndim}-dimensional grid")]
    InvalidAxis { axis: usize, ndim: usize },

    /// Two arrays that must share a shape do not.
    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// A flat label sequence does not fill the grid exactly.
    #[error("Flat data has {found} cells but shape {shape:?} needs {expected}")]
    FlatLengthMismatch {
        shape: Vec<usize>,
        expected: usize,
        found: usize,
    },

    /// Phase labels start at 1.
    #[error("Invalid phase label {label} at cell {cell}")]
    InvalidLabel { label: u32, cell: usize },

    /// Two indicators claim the same cell.
    #[error("Indicators for phases {first} and {second} overlap at cell {cell}")]
    OverlappingIndicators {
        first: u32,
        second: u32,
        cell: usize,
    },

    /// With all indicators given, every cell must be covered.
    #[error("Cell {0} is not covered by any indicator")]
    UncoveredCell(usize),

    /// Recomposition needs at least one indicator to know the grid shape.
    #[error("No indicator arrays given")]
    EmptyIndicators,

    /// Exact and spectral signatures cannot be compared with each other.
    #[error("Cannot compare signatures computed with {left:?} and {right:?} using {comparison}")]
    MixedSignatures {
        left: crate::correlation::Method,
        right: crate::correlation::Method,
        comparison: String,
    },

    /// Signatures of different phase pairs or grid shapes.
    #[error("Signature layouts differ: {0}")]
    SignatureLayoutMismatch(String),

    /// Tolerances must be finite and positive.
    #[error("Invalid tolerance {0}")]
    InvalidTolerance(f64),

    /// The stop policy cannot be satisfied.
    #[error("Invalid stop policy: {0}")]
    InvalidStopPolicy(String),

    /// Phase groups for concatenation are malformed.
    #[error("Invalid phase groups {groups:?}: {reason}")]
    InvalidPhaseGroups { groups: Vec<Vec<u32>>, reason: String },

    /// A convolution kernel is malformed or produced a non-indicator.
    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),

    /// A case record without structures.
    #[error("Case record has no structures")]
    EmptyCase,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Eq2pcError>;

impl Eq2pcError {
    /// Create an InvalidShape error.
    pub fn invalid_shape(shape: &[usize], reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            shape: shape.to_vec(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidEvents error.
    pub fn invalid_events(events: &[usize], reason: impl Into<String>) -> Self {
        Self::InvalidEvents {
            events: events.to_vec(),
            reason: reason.into(),
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(expected: &[usize], found: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            found: found.to_vec(),
        }
    }
}
