// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! SignaturePredicate - the signature pass.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use tracing::debug;

/// Computes the signature of candidate `round` on each round.
///
/// Runs one round per candidate, returning `SuccessSamePredicate` until
/// the last, so `ctx.signatures[i]` always belongs to `ctx.candidates[i]`.
#[derive(Debug)]
pub struct SignaturePredicate;

impl Predicate for SignaturePredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, round: usize) -> PredicateResult {
        let total = ctx.candidates.len();
        if ctx.failure.is_some() || round >= total {
            return PredicateResult::Success;
        }

        match ctx.correlator.signature(&ctx.candidates[round]) {
            Ok(signature) => ctx.signatures.push(signature),
            Err(err) => {
                ctx.fail(err);
                return PredicateResult::Success;
            }
        }
        debug!(candidate = round, total, "Computed signature");

        if round + 1 < total {
            PredicateResult::SuccessSamePredicate
        } else {
            PredicateResult::Success
        }
    }

    fn name(&self) -> &str {
        "Signatures"
    }
}
