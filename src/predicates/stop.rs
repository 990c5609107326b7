// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! StopPolicyPredicate - ends the search program.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult, TerminalPredicate};
use crate::search::StopPolicy;

/// Suspends once the stop policy is satisfied or an error was recorded;
/// otherwise fails, which sends the engine back for the next anchor.
#[derive(Debug)]
pub struct StopPolicyPredicate {
    policy: StopPolicy,
}

impl StopPolicyPredicate {
    pub fn new(policy: StopPolicy) -> Self {
        Self { policy }
    }
}

impl Predicate for StopPolicyPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        if ctx.failure.is_some() || self.policy.reached(ctx.cases.len()) {
            PredicateResult::Suspend
        } else {
            PredicateResult::Failure
        }
    }

    fn name(&self) -> &str {
        "StopPolicy"
    }
}

impl TerminalPredicate for StopPolicyPredicate {}
