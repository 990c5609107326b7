// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Predicate trait for the search program.
//!
//! The search engine works by trying predicates in sequence. Each predicate
//! is one step of the search: enumerating candidates, computing signatures,
//! choosing an anchor candidate, deciding whether to stop.
//!
//! # Example
//!
//! ```
//! use eq2pc_search::engine::{Predicate, PredicateResult};
//! use eq2pc_search::context::SearchContext;
//!
//! #[derive(Debug)]
//! struct TwoWay;
//!
//! impl Predicate for TwoWay {
//!     fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
//!         // Return Choices(2) to try two alternatives
//!         PredicateResult::Choices(2)
//!     }
//!
//!     fn retry_pred(&mut self, _ctx: &mut SearchContext, _round: usize, choice: usize) -> PredicateResult {
//!         if choice < 2 {
//!             PredicateResult::Success
//!         } else {
//!             PredicateResult::Failure
//!         }
//!     }
//!
//!     fn name(&self) -> &str {
//!         "TwoWay"
//!     }
//! }
//! ```

use crate::context::SearchContext;
use std::fmt::Debug;

/// Result of attempting a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateResult {
    /// Predicate succeeded. Move to next predicate in sequence.
    Success,

    /// Predicate succeeded but stay at same predicate with next round.
    /// Allows a single predicate to execute once per candidate.
    SuccessSamePredicate,

    /// Predicate has no (more) valid choices. Backtrack to previous predicate.
    Failure,

    /// Predicate has multiple choices to explore.
    /// Engine will call retry_pred(round, choice) for each choice in 0..n.
    Choices(usize),

    /// Suspend execution. Engine returns control with state preserved.
    Suspend,
}

/// A terminal predicate that ends a search program.
///
/// Terminal predicates only ever fail or suspend. `EngineBuilder::terminal`
/// requires one, so every built program ends properly.
pub trait TerminalPredicate: Predicate {}

/// Trait for search predicates.
///
/// # Lifecycle
///
/// 1. Engine calls `try_pred` when first encountering the predicate
/// 2. If Success: engine advances to next predicate
/// 3. If Failure: engine backtracks to previous predicate
/// 4. If Choices(n): engine calls `retry_pred` for choice 0, then 1, ... on each backtrack
///
/// A predicate that succeeded without choices is passed over on backtracking;
/// it is never re-tried.
pub trait Predicate: Debug {
    /// Try this predicate for a given round.
    ///
    /// The round starts at 0 and increments each time the predicate returns
    /// `SuccessSamePredicate`.
    fn try_pred(&mut self, ctx: &mut SearchContext, round: usize) -> PredicateResult;

    /// Retry this predicate with a specific choice.
    ///
    /// Called after try_pred returns Choices(n), for each choice in 0..n.
    /// May only return `Success`, `SuccessSamePredicate` or `Failure`.
    #[allow(unused)]
    fn retry_pred(
        &mut self,
        ctx: &mut SearchContext,
        round: usize,
        choice: usize,
    ) -> PredicateResult {
        // Predicates that return Choices must implement this.
        panic!("{}::retry_pred should never be called", self.name());
    }

    /// Name for logging and diagnostics. Defaults to the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
