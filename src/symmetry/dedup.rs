// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Greedy deduplication under a relation.

use std::collections::VecDeque;

/// A maximal subset of `items` in which no two elements are related.
///
/// The head of the pool is kept, everything related to it is dropped, and
/// the process repeats on what is left. The result keeps the input order
/// and always contains the first item. It is maximal but not necessarily
/// maximum.
pub fn maximal_unrelated_subset<T, F>(items: &[T], mut related: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let mut pool: VecDeque<T> = items.iter().cloned().collect();
    let mut kept = Vec::new();
    while let Some(head) = pool.pop_front() {
        pool.retain(|item| !related(&head, item));
        kept.push(head);
    }
    kept
}
