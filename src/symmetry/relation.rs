// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Shift and reflection+shift relations.
//!
//! `a` is related to `b` by shift `s` when `a == b.shift(s)`, and by
//! reflection `axes` and shift `s` when `a == b.reflect(axes).shift(s)`.
//! Shifts are tried in flattening order and reflections in table order, so
//! the reported witness is always the first one.

use super::reflection_axis_sets;
use crate::error::Result;
use crate::geometry::Structure;

/// A witness that two structures are related.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
    /// Axes mirrored before shifting; empty for a pure shift.
    pub axes: Vec<usize>,
    pub shift: Vec<usize>,
}

impl Relation {
    pub fn is_pure_shift(&self) -> bool {
        self.axes.is_empty()
    }

    /// Map `b` onto `a`.
    pub fn apply(&self, b: &Structure) -> Result<Structure> {
        b.reflect(&self.axes)?.shift(&self.shift)
    }
}

/// First shift `s` with `a == b.shift(s)`.
///
/// Structures on different grids are never related.
pub fn shift_relation(a: &Structure, b: &Structure) -> Option<Vec<usize>> {
    let shape = a.shape();
    if shape != b.shape() || a.event_counts() != b.event_counts() {
        return None;
    }
    let (left, right) = (a.cells(), b.cells());
    shape.positions().find(|shift| {
        // b.shift(s)[x] = b[x - s]
        let source = shape.offset_table(&shape.inverse_offset(shift));
        left.iter().zip(&source).all(|(&label, &from)| label == right[from])
    })
}

pub fn related_by_shift(a: &Structure, b: &Structure) -> bool {
    shift_relation(a, b).is_some()
}

/// First reflection (in table order) and shift relating `a` to `b`.
pub fn reflection_shift_relation(a: &Structure, b: &Structure) -> Option<Relation> {
    if a.shape() != b.shape() {
        return None;
    }
    reflection_axis_sets(a.shape().ndim()).iter().find_map(|axes| {
        let mirrored = b.reflect(axes).ok()?;
        shift_relation(a, &mirrored).map(|shift| Relation {
            axes: axes.to_vec(),
            shift,
        })
    })
}

pub fn related_by_reflection_shift(a: &Structure, b: &Structure) -> bool {
    reflection_shift_relation(a, b).is_some()
}

/// First witness relating `a` to `b`: a pure shift if there is one,
/// otherwise (when allowed) a reflection followed by a shift.
pub fn find_relation(a: &Structure, b: &Structure, allow_reflection: bool) -> Option<Relation> {
    if let Some(shift) = shift_relation(a, b) {
        return Some(Relation {
            axes: Vec::new(),
            shift,
        });
    }
    if allow_reflection {
        reflection_shift_relation(a, b)
    } else {
        None
    }
}

pub fn related(a: &Structure, b: &Structure, allow_reflection: bool) -> bool {
    find_relation(a, b, allow_reflection).is_some()
}

pub fn unrelated(a: &Structure, b: &Structure, allow_reflection: bool) -> bool {
    !related(a, b, allow_reflection)
}
