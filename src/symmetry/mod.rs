// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Symmetry relations between structures.
//!
//! Two structures are related when one is a periodic shift of the other,
//! optionally after mirroring along a set of axes. The search never reports
//! two related structures as a case, whether or not their signatures agree.
//! A shift always preserves the signature. A reflection maps each cross
//! correlation `C_ab(r)` to `C_ab(-r)`, so it preserves autocorrelations
//! only.
//!
//! ## Module Structure
//!
//! - `relation`: shift and reflection+shift detection
//! - `dedup`: greedy maximal pairwise-unrelated subsets
//! - `mod`: reflection axis-set tables and re-exports

pub mod dedup;
pub mod relation;

pub use dedup::maximal_unrelated_subset;
pub use relation::{
    find_relation, related, related_by_reflection_shift, related_by_shift,
    reflection_shift_relation, shift_relation, unrelated, Relation,
};

/// Reflections of a 1-D grid.
pub const REFLECTIONS_1D: &[&[usize]] = &[&[0]];

/// Reflections of a 2-D grid, in the order they are tried.
pub const REFLECTIONS_2D: &[&[usize]] = &[&[0], &[1], &[0, 1]];

/// Reflections of a 3-D grid, in the order they are tried.
pub const REFLECTIONS_3D: &[&[usize]] = &[
    &[0],
    &[1],
    &[2],
    &[0, 1],
    &[0, 2],
    &[1, 2],
    &[0, 1, 2],
];

/// Every non-empty set of axes to mirror along, for `ndim` axes.
pub fn reflection_axis_sets(ndim: usize) -> &'static [&'static [usize]] {
    match ndim {
        1 => REFLECTIONS_1D,
        2 => REFLECTIONS_2D,
        3 => REFLECTIONS_3D,
        _ => &[],
    }
}
