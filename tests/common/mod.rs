// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use eq2pc_search::geometry::{EventCounts, GridShape, Placement, Structure};
use proptest::prelude::*;

/// Build a structure from its flat labels.
pub fn structure(dims: &[usize], labels: &[u32]) -> Structure {
    Structure::from_flat(&GridShape::new(dims).unwrap(), labels.to_vec()).unwrap()
}

/// The first case of the [4, 3] grid with phase counts [3, 2].
pub const CASE_4X3: [[u32; 12]; 2] = [
    [1, 1, 3, 2, 3, 3, 3, 3, 1, 2, 3, 3],
    [1, 1, 3, 3, 3, 2, 3, 3, 1, 3, 3, 2],
];

/// The only case of the [8] grid with phase counts [4], reflections allowed.
pub const CASE_8: [[u32; 8]; 2] = [[1, 1, 1, 2, 2, 1, 2, 2], [1, 1, 2, 1, 1, 2, 2, 2]];

/// All cases of the [8] grid with phase counts [2, 2].
pub const CASES_8_2_2: [[[u32; 8]; 2]; 3] = [
    [[1, 2, 1, 3, 3, 2, 3, 3], [1, 2, 3, 3, 3, 2, 1, 3]],
    [[1, 2, 3, 2, 1, 3, 3, 3], [1, 2, 3, 3, 1, 3, 3, 2]],
    [[1, 2, 3, 3, 1, 3, 3, 2], [1, 3, 3, 3, 1, 2, 3, 2]],
];

pub fn pair_4x3() -> (Structure, Structure) {
    (structure(&[4, 3], &CASE_4X3[0]), structure(&[4, 3], &CASE_4X3[1]))
}

pub fn pair_8() -> (Structure, Structure) {
    (structure(&[8], &CASE_8[0]), structure(&[8], &CASE_8[1]))
}

/// Grid shapes of 1 to 3 axes with small dimensions.
pub fn small_shape() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..5, 1..=3)
}

/// Shuffled structures with up to three explicit phases.
pub fn arb_structure() -> impl Strategy<Value = Structure> {
    (small_shape(), prop::collection::vec(0usize..4, 1..=3), any::<u64>()).prop_filter_map(
        "event counts exceed the grid",
        |(dims, events, seed)| {
            let shape = GridShape::new(&dims).ok()?;
            let events = EventCounts::new(&events).ok()?;
            Structure::generate(&shape, &events, Placement::Shuffled { seed }).ok()
        },
    )
}

/// A structure, a shift vector for it, and a reflection axis mask.
pub fn arb_structure_with_motion() -> impl Strategy<Value = (Structure, Vec<usize>, Vec<usize>)> {
    (arb_structure(), any::<[usize; 3]>(), any::<[bool; 3]>()).prop_map(|(s, raw_shift, mask)| {
        let dims = s.shape().dims().to_vec();
        let shift = dims.iter().zip(raw_shift).map(|(d, r)| r % d).collect();
        let axes = (0..dims.len()).filter(|&axis| mask[axis]).collect();
        (s, shift, axes)
    })
}
