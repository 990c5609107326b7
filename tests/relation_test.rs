// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for shift and reflection relations.
//!
//! These tests validate that:
//! - related is reflexive and symmetric, with and without reflections
//! - every shifted or reflected copy is found, with a witness that maps it back
//! - related structures have equal signatures
//! - witnesses are reported in table order

mod common;

use common::{arb_structure, arb_structure_with_motion, pair_4x3, structure};
use eq2pc_search::correlation::{signature, Method};
use eq2pc_search::geometry::{EventCounts, GridShape};
use eq2pc_search::search::enumerate_candidates;
use eq2pc_search::symmetry::{
    find_relation, maximal_unrelated_subset, related, related_by_reflection_shift,
    related_by_shift, Relation,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn related_is_reflexive(s in arb_structure()) {
        prop_assert!(related_by_shift(&s, &s));
        prop_assert!(related(&s, &s, false));
        prop_assert!(related(&s, &s, true));
        let zero = vec![0; s.shape().ndim()];
        prop_assert_eq!(
            find_relation(&s, &s, true),
            Some(Relation { axes: vec![], shift: zero })
        );
    }

    #[test]
    fn related_is_symmetric(a in arb_structure(), b in arb_structure()) {
        for reflection in [false, true] {
            prop_assert_eq!(related(&a, &b, reflection), related(&b, &a, reflection));
        }
    }

    #[test]
    fn moved_copies_are_found((s, shift, axes) in arb_structure_with_motion()) {
        let moved = s.reflect(&axes).unwrap().shift(&shift).unwrap();
        prop_assert!(related(&moved, &s, true));
        prop_assert!(related(&s, &moved, true));
        if axes.is_empty() {
            prop_assert!(related(&moved, &s, false));
        }

        let witness = find_relation(&moved, &s, true).unwrap();
        prop_assert_eq!(witness.apply(&s).unwrap(), moved.clone());
        if let Some(relation) = find_relation(&moved, &s, false) {
            prop_assert!(relation.is_pure_shift());
        }
    }

    #[test]
    fn shifted_copies_have_equal_signatures((s, shift, _axes) in arb_structure_with_motion()) {
        let moved = s.shift(&shift).unwrap();
        prop_assert_eq!(signature(&s, Method::Exact), signature(&moved, Method::Exact));
    }

    #[test]
    fn reflected_two_phase_copies_have_equal_signatures(
        (s, shift, axes) in arb_structure_with_motion()
    ) {
        // Reflection maps C_ab(r) to C_ab(-r), which equals C_ab(r) for
        // autocorrelations; with two phases the signature is one autocorrelation.
        prop_assume!(s.num_phases() <= 2);
        let moved = s.reflect(&axes).unwrap().shift(&shift).unwrap();
        prop_assert!(related(&s, &moved, true));
        prop_assert_eq!(signature(&s, Method::Exact), signature(&moved, Method::Exact));
    }
}

#[test]
fn test_related_pairs_among_candidates_share_signatures() {
    let shape = GridShape::new(&[8]).unwrap();
    let candidates = enumerate_candidates(&shape, &EventCounts::new(&[4]).unwrap()).unwrap();
    let signatures: Vec<_> = candidates.iter().map(|s| signature(s, Method::Exact)).collect();
    let mut related_pairs = 0;
    for i in 0..candidates.len() {
        for j in i + 1..candidates.len() {
            if related(&candidates[i], &candidates[j], true) {
                related_pairs += 1;
                assert_eq!(signatures[i], signatures[j]);
            }
        }
    }
    assert!(related_pairs > 0);
}

#[test]
fn test_found_case_is_unrelated_both_ways() {
    let (a, b) = pair_4x3();
    assert!(!related(&a, &b, true));
    assert!(!related(&b, &a, true));
    assert!(!related_by_reflection_shift(&a, &b));
}

#[test]
fn test_reflection_order_is_deterministic() {
    // Axis 1 alone matches, so does the pair {0, 1}; axis 1 is reported
    let a = structure(&[2, 4], &[1, 1, 2, 3, 1, 1, 2, 3]);
    let b = a.reflect(&[1]).unwrap();
    assert!(related_by_reflection_shift(&a, &b));
    assert_eq!(
        find_relation(&a, &b, true),
        Some(Relation {
            axes: vec![1],
            shift: vec![0, 0]
        })
    );

    // Axis 0 alone matches, so does the pair {0, 1}; axis 0 is reported
    let a = structure(&[4, 2], &[1, 1, 1, 1, 2, 2, 3, 3]);
    let b = a.reflect(&[0]).unwrap();
    assert_eq!(
        find_relation(&a, &b, true),
        Some(Relation {
            axes: vec![0],
            shift: vec![0, 0]
        })
    );
    assert_eq!(find_relation(&a, &b, false), None);
}

#[test]
fn test_dedup_of_shifted_copies() {
    let base = structure(&[6], &[1, 1, 2, 3, 3, 3]);
    let other = structure(&[6], &[1, 2, 1, 3, 3, 3]);
    let items = vec![
        base.clone(),
        base.shift(&[1]).unwrap(),
        other.clone(),
        base.shift(&[4]).unwrap(),
        other.shift(&[2]).unwrap(),
        base.reflect(&[0]).unwrap(),
    ];
    let without = maximal_unrelated_subset(&items, |a, b| related(a, b, false));
    assert_eq!(without, vec![base.clone(), other.clone(), base.reflect(&[0]).unwrap()]);
    let with = maximal_unrelated_subset(&items, |a, b| related(a, b, true));
    assert_eq!(with, vec![base, other]);
}
