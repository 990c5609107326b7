// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Non-deterministic search engine.
//!
//! This module implements a backtracking engine that runs predicates in
//! sequence. The 2PC search is written as a short predicate program:
//!
//! ```text
//! Enumerate -> Signatures -> Grouping (one choice per anchor candidate)
//!           -> count case -> StopPolicy (Failure = keep going, Suspend = stop)
//! ```
//!
//! # Architecture
//!
//! The engine maintains a stack of predicate execution states. Each entry
//! records which predicate runs, its round, and its mode:
//! 1. Call try_pred(round) on each predicate
//! 2. If Success: advance to next predicate
//! 3. If SuccessSamePredicate: increment round, stay at same predicate
//! 4. If Choices(n): enter choice mode, call retry_pred(round, 0..n-1)
//! 5. If Failure: backtrack to previous stack entry
//! 6. If Suspend: pause and return control to caller
//!
//! Entries that succeeded deterministically are marked done, so
//! backtracking passes straight through them.
//!
//! # Example
//!
//! ```
//! use eq2pc_search::engine::EngineBuilder;
//! use eq2pc_search::predicates::{FailPredicate, SuspendPredicate};
//! use eq2pc_search::context::SearchContext;
//! use eq2pc_search::search::SearchConfig;
//!
//! let mut ctx = SearchContext::new(SearchConfig::new(&[4], &[2])).unwrap();
//! let engine = EngineBuilder::new()
//!     .terminal(Box::new(SuspendPredicate))
//!     .build();
//! assert!(engine.search(&mut ctx).is_some());
//!
//! let engine = EngineBuilder::new()
//!     .terminal(Box::new(FailPredicate))
//!     .build();
//! assert!(engine.search(&mut ctx).is_none());
//! ```

pub mod predicate;

pub use predicate::{Predicate, PredicateResult, TerminalPredicate};

use crate::context::SearchContext;

/// Initial capacity of the predicate stack.
const INITIAL_STACK_SIZE: usize = 64;

/// How a stack entry will be resumed on backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// try_pred has not been called yet.
    Call,
    /// Exploring choices: next choice to try, and how many there are.
    Choice { next: usize, count: usize },
    /// Succeeded deterministically; nothing left to try.
    Done,
}

/// Stack entry tracking the state of one predicate execution.
#[derive(Debug)]
struct StackEntry {
    /// Index of the predicate in the predicates list.
    predicate_index: usize,

    /// Current round number (incremented by SuccessSamePredicate).
    round: usize,

    mode: Mode,
}

impl StackEntry {
    fn new(predicate_index: usize, round: usize) -> Self {
        Self {
            predicate_index,
            round,
            mode: Mode::Call,
        }
    }
}

/// Search engine that coordinates predicate execution and backtracking.
pub struct SearchEngine {
    /// List of predicates to execute in sequence.
    predicates: Vec<Box<dyn Predicate>>,

    /// Stack of predicate execution states.
    stack: Vec<StackEntry>,

    /// Statistics: number of try_pred calls.
    try_count: u64,

    /// Statistics: number of retry_pred calls.
    retry_count: u64,
}

impl SearchEngine {
    /// Create a new search engine with the given predicates.
    ///
    /// Prefer [`EngineBuilder`], which guarantees the sequence ends with a
    /// terminal predicate.
    pub fn new(predicates: Vec<Box<dyn Predicate>>) -> Self {
        Self {
            predicates,
            stack: Vec::with_capacity(INITIAL_STACK_SIZE),
            try_count: 0,
            retry_count: 0,
        }
    }

    /// Run the program.
    ///
    /// Consumes the engine and returns:
    /// - `Some(engine)` if a predicate suspended
    /// - `None` if every choice was exhausted
    ///
    /// Results are side effects on `ctx`, not return values.
    ///
    /// # Panics
    ///
    /// Panics if the predicate sequence reaches its end without a FAIL or
    /// SUSPEND, or if retry_pred returns Choices or Suspend.
    pub fn search(mut self, ctx: &mut SearchContext) -> Option<Self> {
        self.stack.clear();
        self.try_count = 0;
        self.retry_count = 0;

        if self.predicates.is_empty() {
            return None;
        }

        self.stack.push(StackEntry::new(0, 0));

        loop {
            // Backtracked past the first predicate
            let entry = self.stack.last_mut()?;
            let pred_idx = entry.predicate_index;
            let round = entry.round;

            let mode = entry.mode;

            let result = match mode {
                Mode::Done => {
                    self.stack.pop();
                    continue;
                }
                Mode::Choice { next, count } if next >= count => {
                    self.stack.pop();
                    continue;
                }
                Mode::Choice { next, count } => {
                    entry.mode = Mode::Choice {
                        next: next + 1,
                        count,
                    };
                    self.retry_count += 1;
                    let result = self.predicates[pred_idx].retry_pred(ctx, round, next);
                    if matches!(result, PredicateResult::Choices(_) | PredicateResult::Suspend) {
                        panic!("retry_pred returned invalid result: {:?}", result);
                    }
                    result
                }
                Mode::Call => {
                    entry.mode = Mode::Done;
                    self.try_count += 1;
                    self.predicates[pred_idx].try_pred(ctx, round)
                }
            };

            match result {
                PredicateResult::Success => {
                    self.push_next_predicate(pred_idx);
                }
                PredicateResult::SuccessSamePredicate => {
                    self.stack.push(StackEntry::new(pred_idx, round + 1));
                }
                PredicateResult::Failure => {
                    // Choice entries stay on the stack and move to their next choice;
                    // a failed call is popped when the loop comes back to it.
                }
                PredicateResult::Choices(count) => {
                    if let Some(entry) = self.stack.last_mut() {
                        entry.mode = Mode::Choice { next: 0, count };
                    }
                }
                PredicateResult::Suspend => {
                    return Some(self);
                }
            }
        }
    }

    /// Push a new stack entry for the next predicate in sequence.
    fn push_next_predicate(&mut self, current: usize) {
        let next_index = current + 1;

        if next_index >= self.predicates.len() {
            panic!(
                "Invalid predicate sequence: reached end without FAIL or SUSPEND. \
                 Every program must terminate with a FAIL or SUSPEND predicate."
            );
        }

        self.stack.push(StackEntry::new(next_index, 0));
    }

    /// Get statistics about the search.
    ///
    /// Returns (try_count, retry_count).
    pub fn statistics(&self) -> (u64, u64) {
        (self.try_count, self.retry_count)
    }
}

/// Builds a predicate program that is guaranteed to end with a terminal predicate.
#[derive(Default)]
pub struct EngineBuilder {
    predicates: Vec<Box<dyn Predicate>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate.
    pub fn add(mut self, predicate: Box<dyn Predicate>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Append the terminal predicate, closing the program.
    pub fn terminal<T: TerminalPredicate + 'static>(mut self, predicate: Box<T>) -> TerminatedBuilder {
        self.predicates.push(predicate);
        TerminatedBuilder {
            predicates: self.predicates,
        }
    }
}

/// A closed predicate program, ready to build.
pub struct TerminatedBuilder {
    predicates: Vec<Box<dyn Predicate>>,
}

impl TerminatedBuilder {
    pub fn build(self) -> SearchEngine {
        SearchEngine::new(self.predicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchConfig;
    use std::cell::Cell;
    use std::rc::Rc;

    fn context() -> SearchContext {
        SearchContext::new(SearchConfig::new(&[4], &[2])).unwrap()
    }

    /// Test predicate that always succeeds.
    #[derive(Debug)]
    struct AlwaysSucceed;

    impl Predicate for AlwaysSucceed {
        fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
            PredicateResult::Success
        }
    }

    /// Test predicate that always fails.
    #[derive(Debug)]
    struct AlwaysFail;

    impl Predicate for AlwaysFail {
        fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
            PredicateResult::Failure
        }
    }

    impl TerminalPredicate for AlwaysFail {}

    /// Test predicate that suspends.
    #[derive(Debug)]
    struct Suspend;

    impl Predicate for Suspend {
        fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
            PredicateResult::Suspend
        }
    }

    impl TerminalPredicate for Suspend {}

    /// Offers `n` choices; each succeeds.
    #[derive(Debug)]
    struct Range(usize);

    impl Predicate for Range {
        fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
            PredicateResult::Choices(self.0)
        }

        fn retry_pred(&mut self, _ctx: &mut SearchContext, _round: usize, _choice: usize) -> PredicateResult {
            PredicateResult::Success
        }
    }

    /// Succeeds `n` rounds in a row, counting calls.
    #[derive(Debug)]
    struct Rounds(usize, Rc<Cell<usize>>);

    impl Predicate for Rounds {
        fn try_pred(&mut self, _ctx: &mut SearchContext, round: usize) -> PredicateResult {
            self.1.set(self.1.get() + 1);
            if round + 1 < self.0 {
                PredicateResult::SuccessSamePredicate
            } else {
                PredicateResult::Success
            }
        }
    }

    #[test]
    fn test_simple_success_with_suspend() {
        let mut ctx = context();
        let engine = EngineBuilder::new()
            .add(Box::new(AlwaysSucceed))
            .terminal(Box::new(Suspend))
            .build();

        let engine = engine.search(&mut ctx);
        assert!(engine.is_some());
        assert_eq!(engine.unwrap().statistics(), (2, 0));
    }

    #[test]
    fn test_immediate_failure() {
        let mut ctx = context();
        let engine = EngineBuilder::new().terminal(Box::new(AlwaysFail)).build();
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    fn test_empty_predicates() {
        let mut ctx = context();
        let engine = SearchEngine::new(vec![]);
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    fn test_backtracking_passes_deterministic_predicates() {
        // Every Range choice fails at AlwaysFail; backtracking must pass over
        // the completed rounds instead of re-running them.
        let calls = Rc::new(Cell::new(0));
        let mut ctx = context();
        let engine = EngineBuilder::new()
            .add(Box::new(Rounds(3, calls.clone())))
            .add(Box::new(Range(4)))
            .add(Box::new(AlwaysFail))
            .terminal(Box::new(Suspend))
            .build();

        assert!(engine.search(&mut ctx).is_none());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_choice_then_suspend() {
        let calls = Rc::new(Cell::new(0));
        let mut ctx = context();
        let engine = EngineBuilder::new()
            .add(Box::new(Rounds(2, calls.clone())))
            .add(Box::new(Range(3)))
            .terminal(Box::new(Suspend))
            .build();

        let engine = engine.search(&mut ctx).expect("suspended");
        // Rounds x2, Range, Suspend; one retry for choice 0
        assert_eq!(engine.statistics(), (4, 1));
    }

    #[test]
    #[should_panic(expected = "Invalid predicate sequence")]
    fn test_invalid_program_without_terminal() {
        let mut ctx = context();
        let engine = SearchEngine::new(vec![Box::new(AlwaysSucceed)]);
        let _ = engine.search(&mut ctx);
    }
}
