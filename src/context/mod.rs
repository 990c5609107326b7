// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context.
//!
//! The SearchContext is the state passed through the predicate program of
//! one search:
//! - the validated configuration and the objects derived from it
//!   (grid, event counts, correlator, comparison strategy)
//! - the candidate and signature tables, both indexed by candidate
//! - the cases found so far, as candidate indices
//! - statistics, and the first error raised inside the program
//!
//! Nothing here is shared between searches.

use crate::correlation::{Comparison, Correlator, Signature};
use crate::error::{Eq2pcError, Result};
use crate::geometry::{EventCounts, GridShape, Structure};
use crate::search::{Case, SearchConfig};
use crate::state::Statistics;

#[derive(Debug)]
pub struct SearchContext {
    pub config: SearchConfig,
    pub shape: GridShape,
    pub events: EventCounts,
    pub correlator: Correlator,
    pub comparison: Comparison,

    /// Candidate structures in enumeration order.
    pub candidates: Vec<Structure>,

    /// `signatures[i]` is the signature of `candidates[i]`.
    pub signatures: Vec<Signature>,

    /// Each case is an anchor index followed by its partners' indices.
    pub cases: Vec<Vec<usize>>,

    pub statistics: Statistics,

    /// Set by a predicate that hit an error; the program then suspends.
    pub failure: Option<Eq2pcError>,
}

impl SearchContext {
    /// Create a context for a validated configuration.
    pub fn new(config: SearchConfig) -> Result<Self> {
        let (shape, events, comparison) = config.resolve()?;
        let correlator = Correlator::new(&shape, config.method());
        Ok(Self {
            config,
            shape,
            events,
            correlator,
            comparison,
            candidates: Vec::new(),
            signatures: Vec::new(),
            cases: Vec::new(),
            statistics: Statistics::new(),
            failure: None,
        })
    }

    /// Whether reflections count as relations in this search.
    pub fn allow_reflection(&self) -> bool {
        self.config.effective_reflection()
    }

    /// Record the first error raised inside the program.
    pub fn fail(&mut self, error: Eq2pcError) {
        if self.failure.is_none() {
            self.failure = Some(error);
        }
    }

    /// The structures of a case given as candidate indices.
    pub fn case(&self, indices: &[usize]) -> Case {
        Case::new(indices.iter().map(|&i| self.candidates[i].clone()).collect())
    }
}
