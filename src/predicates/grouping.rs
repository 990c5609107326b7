// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! GroupingPredicate - the grouping pass.
//!
//! Each choice is an anchor candidate `i`, tried in increasing order. The
//! choice succeeds when some later candidate has the same signature and is
//! not related to the anchor; the case recorded is the anchor followed by a
//! maximal pairwise-unrelated subset of those partners.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use crate::error::Result;
use crate::state::Counters;
use crate::symmetry::{maximal_unrelated_subset, related};
use tracing::debug;

/// Chooses anchor candidates; see the module documentation.
#[derive(Debug)]
pub struct GroupingPredicate;

impl Predicate for GroupingPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        if ctx.failure.is_some() {
            return PredicateResult::Success;
        }
        PredicateResult::Choices(ctx.candidates.len())
    }

    fn retry_pred(&mut self, ctx: &mut SearchContext, _round: usize, choice: usize) -> PredicateResult {
        match group(ctx, choice) {
            Ok(Some(case)) => {
                debug!(anchor = choice, partners = case.len() - 1, "Recorded case");
                ctx.cases.push(case);
                PredicateResult::Success
            }
            Ok(None) => PredicateResult::Failure,
            Err(err) => {
                ctx.fail(err);
                PredicateResult::Success
            }
        }
    }

    fn name(&self) -> &str {
        "Grouping"
    }
}

/// The case anchored at candidate `anchor`, if there is one.
fn group(ctx: &mut SearchContext, anchor: usize) -> Result<Option<Vec<usize>>> {
    let candidates = &ctx.candidates;
    let signatures = &ctx.signatures;
    let reflection = ctx.config.effective_reflection();

    let mut matches = Vec::new();
    for later in anchor + 1..candidates.len() {
        let outcome = ctx.comparison.compare(&signatures[anchor], &signatures[later])?;
        if outcome.near_tolerance {
            ctx.statistics.increment(Counters::NearTolerance);
        }
        if outcome.matched {
            matches.push(later);
        }
    }
    debug!(
        anchor,
        total = candidates.len(),
        matches = matches.len(),
        "Compared signatures"
    );
    if matches.is_empty() {
        return Ok(None);
    }

    let unrelated: Vec<usize> = matches
        .iter()
        .copied()
        .filter(|&j| !related(&candidates[anchor], &candidates[j], reflection))
        .collect();
    ctx.statistics.add(Counters::SignatureMatches, matches.len() as u64);
    ctx.statistics
        .add(Counters::RelatedMatches, (matches.len() - unrelated.len()) as u64);
    if unrelated.is_empty() {
        return Ok(None);
    }

    let partners = maximal_unrelated_subset(&unrelated, |&x, &y| {
        related(&candidates[x], &candidates[y], reflection)
    });
    Ok(Some(std::iter::once(anchor).chain(partners).collect()))
}
