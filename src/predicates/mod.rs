// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search predicates.
//!
//! This module contains the predicates used in the search program.
//! Each predicate is one step of the search.
//!
//! # Organization
//!
//! - `enumerate`: EnumeratePredicate builds the candidate table
//! - `signatures`: SignaturePredicate computes one signature per round
//! - `grouping`: GroupingPredicate chooses an anchor and records its case
//! - `stop`: StopPolicyPredicate decides whether to keep looking
//! - Built-in predicates: `FailPredicate`, `SuspendPredicate`

pub mod enumerate;
pub mod grouping;
pub mod signatures;
pub mod stop;

// Re-export main predicates for convenience
pub use enumerate::EnumeratePredicate;
pub use grouping::GroupingPredicate;
pub use signatures::SignaturePredicate;
pub use stop::StopPolicyPredicate;

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult, TerminalPredicate};

/// Built-in fail predicate (Prolog's `fail.`).
///
/// This predicate always fails, forcing backtracking. It's a terminal predicate
/// that ends a search path without success, similar to Prolog's `fail.` built-in.
///
/// # Example
///
/// ```
/// use eq2pc_search::engine::EngineBuilder;
/// use eq2pc_search::predicates::{EnumeratePredicate, FailPredicate};
/// use eq2pc_search::context::SearchContext;
/// use eq2pc_search::search::SearchConfig;
///
/// let mut ctx = SearchContext::new(SearchConfig::new(&[8], &[4])).unwrap();
/// let engine = EngineBuilder::new()
///     .add(Box::new(EnumeratePredicate))
///     .terminal(Box::new(FailPredicate))
///     .build();
///
/// // Failed - engine consumed, but the candidates are on the context
/// assert!(engine.search(&mut ctx).is_none());
/// assert_eq!(ctx.candidates.len(), 35);
/// ```
#[derive(Debug)]
pub struct FailPredicate;

impl Predicate for FailPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn retry_pred(
        &mut self,
        _ctx: &mut SearchContext,
        _round: usize,
        _choice: usize,
    ) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Fail"
    }
}

/// FailPredicate is a terminal predicate (like Prolog's fail.).
impl TerminalPredicate for FailPredicate {}

/// Built-in suspend predicate: hands control back to the caller with the
/// engine state preserved.
#[derive(Debug)]
pub struct SuspendPredicate;

impl Predicate for SuspendPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        PredicateResult::Suspend
    }

    fn name(&self) -> &str {
        "Suspend"
    }
}

impl TerminalPredicate for SuspendPredicate {}
