// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The 2PC-equivalence search.
//!
//! [`search`] enumerates every anchored arrangement of the configured phase
//! counts, groups candidates with equal signatures, drops partners that are
//! merely shifts or reflections of their anchor, and returns the cases that
//! survive cross-case filtering.
//!
//! # Examples
//!
//! ```
//! use eq2pc_search::search::{search, SearchConfig, StopPolicy};
//! use eq2pc_search::symmetry::related;
//!
//! let outcome = search(&SearchConfig::new(&[8], &[4])).unwrap();
//! assert_eq!(outcome.cases.len(), 1);
//!
//! let case = &outcome.cases[0];
//! assert_eq!(case.anchor().to_flat(), vec![1, 1, 1, 2, 2, 1, 2, 2]);
//! assert!(!related(case.anchor(), &case.partners()[0], true));
//! ```

pub mod case;
pub mod config;
pub mod enumerate;

pub use case::{Case, CaseRecord};
pub use config::{SearchConfig, StopPolicy};
pub use enumerate::{
    candidate_count, count_multiset_permutations, enumerate_candidates, MultisetPermutations,
};

use crate::context::SearchContext;
use crate::engine::{EngineBuilder, SearchEngine};
use crate::error::Result;
use crate::geometry::Structure;
use crate::predicates::{EnumeratePredicate, GroupingPredicate, SignaturePredicate, StopPolicyPredicate};
use crate::state::{Counters, Statistics};
use crate::symmetry::{maximal_unrelated_subset, related};
use tracing::info;

/// The result of a search that ran without error.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Cases after cross-case filtering. Empty is a valid result.
    pub cases: Vec<Case>,
    /// True when every anchor was tried; false when the stop policy ended
    /// the scan early.
    pub completed: bool,
    pub statistics: Statistics,
}

/// The search as a predicate program:
/// enumerate, compute signatures, choose an anchor, count, check the stop policy.
pub fn search_program(config: &SearchConfig) -> SearchEngine {
    EngineBuilder::new()
        .add(Box::new(EnumeratePredicate))
        .add(Box::new(SignaturePredicate))
        .add(Box::new(GroupingPredicate))
        .add(Statistics::counting_predicate(
            Counters::Cases,
            Some(|ctx: &SearchContext| ctx.failure.is_none()),
        ))
        .terminal(Box::new(StopPolicyPredicate::new(config.stop_policy())))
        .build()
}

/// Run a search.
///
/// The configuration is validated before anything is enumerated. On error
/// no cases are returned.
pub fn search(config: &SearchConfig) -> Result<SearchOutcome> {
    let mut ctx = SearchContext::new(config.clone())?;
    info!(
        grid = %ctx.shape,
        events = ?config.events(),
        method = ?config.method(),
        reflection = ctx.allow_reflection(),
        stop_policy = ?config.stop_policy(),
        "Starting 2PC search"
    );

    let suspended = search_program(config).search(&mut ctx);
    if let Some(err) = ctx.failure.take() {
        return Err(err);
    }
    let completed = suspended.is_none();

    let kept = cross_case_filter(&ctx.candidates, &ctx.cases, ctx.allow_reflection());
    let cases: Vec<Case> = kept.iter().map(|indices| ctx.case(indices)).collect();
    info!(
        found = ctx.cases.len(),
        kept = cases.len(),
        completed,
        statistics = %ctx.statistics,
        "Finished 2PC search"
    );

    Ok(SearchOutcome {
        cases,
        completed,
        statistics: ctx.statistics,
    })
}

/// Drop whole cases that repeat an earlier one.
///
/// Case anchors are deduplicated with `reflection`; then every case whose
/// anchor is related (reflection always allowed) to a partner of the first
/// case is dropped. Only the first case is kept unless at least two survive.
pub fn cross_case_filter(
    candidates: &[Structure],
    cases: &[Vec<usize>],
    reflection: bool,
) -> Vec<Vec<usize>> {
    if cases.len() <= 1 {
        return cases.to_vec();
    }
    let anchors: Vec<&Structure> = cases.iter().map(|case| &candidates[case[0]]).collect();

    let all: Vec<usize> = (0..cases.len()).collect();
    let mut survivors =
        maximal_unrelated_subset(&all, |&x, &y| related(anchors[x], anchors[y], reflection));
    for &partner in &cases[0][1..] {
        survivors.retain(|&case| !related(&candidates[partner], anchors[case], true));
    }

    if survivors.len() > 1 {
        survivors.iter().map(|&case| cases[case].clone()).collect()
    } else {
        vec![cases[0].clone()]
    }
}
