// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! EnumeratePredicate - fills the candidate table.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use crate::search::enumerate_candidates;
use crate::state::Counters;
use tracing::info;

/// Enumerates every anchored candidate into `ctx.candidates`.
///
/// Deterministic: succeeds once. An enumeration error is stored on the
/// context and the later predicates pass it through to the stop step.
#[derive(Debug)]
pub struct EnumeratePredicate;

impl Predicate for EnumeratePredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        match enumerate_candidates(&ctx.shape, &ctx.events) {
            Ok(candidates) => {
                info!(
                    grid = %ctx.shape,
                    events = ?ctx.events.counts(),
                    candidates = candidates.len(),
                    "Enumerated candidate structures"
                );
                ctx.statistics.add(Counters::Candidates, candidates.len() as u64);
                ctx.candidates = candidates;
                ctx.signatures.clear();
                ctx.cases.clear();
            }
            Err(err) => ctx.fail(err),
        }
        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "Enumerate"
    }
}
