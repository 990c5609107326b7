// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are stored in the context, and can be incremented by special predicates,
//! or by the predicates that do the counted work.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

#[derive(EnumCountMacro, EnumIter, Display, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// Candidate structures enumerated.
    Candidates,
    /// Later candidates whose signature equals an anchor's.
    SignatureMatches,
    /// Signature matches discarded because they are related to the anchor.
    RelatedMatches,
    /// Cases recorded before cross-case filtering.
    Cases,
    /// Spectral comparisons within an order of magnitude of the tolerance.
    NearTolerance,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// A predicate that will increment the given counter, whenever a condition holds (or always).
    pub fn counting_predicate(
        counter: Counters,
        filter: Option<fn(&SearchContext) -> bool>,
    ) -> Box<dyn Predicate> {
        Box::new(CountingPredicate {
            filter: filter.unwrap_or(|_ctxt| true),
            counter,
        })
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counters) {
        self.add(counter, 1);
    }

    pub fn add(&mut self, counter: Counters, amount: u64) {
        self.stats[counter as usize] += amount;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Counters::iter()
            .map(|counter| format!("{}={}", counter, self.get(counter)))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

#[derive(Debug)]
struct CountingPredicate {
    filter: fn(&SearchContext) -> bool,
    counter: Counters,
}

impl Predicate for CountingPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        if (self.filter)(ctx) {
            ctx.statistics.increment(self.counter);
        }
        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "CountingPredicate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchConfig;

    #[test]
    fn test_counters() {
        let mut stats = Statistics::new();
        stats.increment(Counters::Cases);
        stats.add(Counters::Candidates, 35);
        assert_eq!(stats.get(Counters::Cases), 1);
        assert_eq!(stats.get(Counters::Candidates), 35);
        assert_eq!(stats.get(Counters::NearTolerance), 0);
        assert_eq!(
            stats.to_string(),
            "Candidates=35 SignatureMatches=0 RelatedMatches=0 Cases=1 NearTolerance=0"
        );
    }

    #[test]
    fn test_counting_predicate_respects_filter() {
        let mut ctx = SearchContext::new(SearchConfig::new(&[4], &[2])).unwrap();
        let mut always = Statistics::counting_predicate(Counters::Cases, None);
        let mut never = Statistics::counting_predicate(Counters::Cases, Some(|_ctx| false));
        assert_eq!(always.try_pred(&mut ctx, 0), PredicateResult::Success);
        assert_eq!(never.try_pred(&mut ctx, 0), PredicateResult::Success);
        assert_eq!(ctx.statistics.get(Counters::Cases), 1);
    }
}
