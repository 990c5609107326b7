// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Candidate enumeration.
//!
//! Cell 0 of every candidate is pinned to phase 1, which removes the
//! translation symmetry that would otherwise let every structure appear once
//! per occupied cell of phase 1. The remaining cells run through every
//! distinct permutation of their label multiset in lexicographic order.

use crate::error::{Eq2pcError, Result};
use crate::geometry::{EventCounts, GridShape, Phase, Placement, Structure};

/// Distinct permutations of a multiset in lexicographic order.
///
/// # Examples
///
/// ```
/// use eq2pc_search::search::MultisetPermutations;
///
/// let all: Vec<Vec<u32>> = MultisetPermutations::new(vec![2, 1, 1]).collect();
/// assert_eq!(all, vec![vec![1, 1, 2], vec![1, 2, 1], vec![2, 1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct MultisetPermutations<T> {
    current: Vec<T>,
    exhausted: bool,
}

impl<T: Ord + Clone> MultisetPermutations<T> {
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort();
        Self {
            current: items,
            exhausted: false,
        }
    }
}

impl<T: Ord + Clone> Iterator for MultisetPermutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.exhausted {
            return None;
        }
        let item = self.current.clone();
        self.exhausted = !next_permutation(&mut self.current);
        Some(item)
    }
}

/// Advance to the next lexicographic permutation in place.
/// Returns false (leaving the slice unchanged) at the last permutation.
fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    let Some(pivot) = items.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let Some(successor) = items.iter().rposition(|item| *item > items[pivot]) else {
        return false;
    };
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

/// Number of distinct arrangements of a multiset with the given
/// multiplicities, or None on overflow.
pub fn count_multiset_permutations(multiplicities: &[usize]) -> Option<u128> {
    let mut total: u128 = 1;
    let mut placed: u128 = 0;
    for &count in multiplicities {
        // total *= C(placed + count, count), built up one factor at a time
        for k in 1..=count as u128 {
            placed += 1;
            total = total.checked_mul(placed)? / k;
        }
    }
    Some(total)
}

/// Every candidate structure for `events` on `shape`, anchored at cell 0.
pub fn enumerate_candidates(shape: &GridShape, events: &EventCounts) -> Result<Vec<Structure>> {
    if events.counts()[0] == 0 {
        return Err(Eq2pcError::UnanchoredEvents(events.counts().to_vec()));
    }
    let blocks = Structure::generate(shape, events, Placement::Blocks)?;
    let rest = blocks.cells()[1..].to_vec();
    MultisetPermutations::new(rest)
        .map(|tail| {
            let mut labels: Vec<Phase> = Vec::with_capacity(shape.cells());
            labels.push(1);
            labels.extend(tail);
            Structure::from_flat(shape, labels)
        })
        .collect()
}

/// Number of candidates `enumerate_candidates` would produce.
pub fn candidate_count(shape: &GridShape, events: &EventCounts) -> Option<u128> {
    let mut multiplicities = events.counts().to_vec();
    multiplicities[0] = multiplicities[0].saturating_sub(1);
    multiplicities.push(events.implicit(shape));
    count_multiset_permutations(&multiplicities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutations_of_distinct_items() {
        let all: Vec<Vec<u8>> = MultisetPermutations::new(vec![3, 1, 2]).collect();
        assert_eq!(
            all,
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1]
            ]
        );
    }

    #[test]
    fn test_empty_multiset_has_one_permutation() {
        let all: Vec<Vec<u8>> = MultisetPermutations::new(vec![]).collect();
        assert_eq!(all, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_counts_match_enumeration() {
        assert_eq!(count_multiset_permutations(&[2, 2, 7]), Some(1980));
        assert_eq!(count_multiset_permutations(&[]), Some(1));
        let items = vec![1, 1, 2, 3, 3, 3];
        assert_eq!(
            MultisetPermutations::new(items).count() as u128,
            count_multiset_permutations(&[2, 1, 3]).unwrap()
        );
        assert_eq!(count_multiset_permutations(&[200, 200]), None);
    }

    #[test]
    fn test_candidates_are_anchored() {
        let shape = GridShape::new(&[4, 3]).unwrap();
        let events = EventCounts::new(&[3, 2]).unwrap();
        let candidates = enumerate_candidates(&shape, &events).unwrap();
        assert_eq!(candidates.len(), 1980);
        assert_eq!(candidate_count(&shape, &events), Some(1980));
        assert!(candidates.iter().all(|s| s.cells()[0] == 1));
        assert!(candidates.iter().all(|s| s.event_counts() == vec![3, 2, 7]));
        assert_eq!(
            candidates[0].to_flat(),
            vec![1, 1, 1, 2, 2, 3, 3, 3, 3, 3, 3, 3]
        );
    }

    #[test]
    fn test_degenerate_grid() {
        let shape = GridShape::new(&[2, 2]).unwrap();
        let events = EventCounts::new(&[1, 1]).unwrap();
        let candidates = enumerate_candidates(&shape, &events).unwrap();
        let flat: Vec<Vec<u32>> = candidates.iter().map(Structure::to_flat).collect();
        assert_eq!(flat, vec![vec![1, 2, 3, 3], vec![1, 3, 2, 3], vec![1, 3, 3, 2]]);
    }

    #[test]
    fn test_unanchored() {
        let shape = GridShape::new(&[4]).unwrap();
        let events = EventCounts::new(&[0, 2]).unwrap();
        assert!(matches!(
            enumerate_candidates(&shape, &events),
            Err(Eq2pcError::UnanchoredEvents(_))
        ));
    }
}
