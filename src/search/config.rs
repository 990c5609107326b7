// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search configuration.

use crate::correlation::{Comparison, Method, DEFAULT_TOLERANCE};
use crate::error::{Eq2pcError, Result};
use crate::geometry::{EventCounts, GridShape};

/// When the grouping pass stops recording cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StopPolicy {
    /// Scan every candidate.
    None,
    /// Stop after the first case.
    #[default]
    AfterFirst,
    /// Stop once this many cases have been recorded.
    AfterCount(usize),
}

impl StopPolicy {
    /// True once `cases` cases satisfy the policy.
    pub fn reached(&self, cases: usize) -> bool {
        match *self {
            StopPolicy::None => false,
            StopPolicy::AfterFirst => cases >= 1,
            StopPolicy::AfterCount(limit) => cases >= limit,
        }
    }

    fn validate(&self) -> Result<()> {
        if *self == StopPolicy::AfterCount(0) {
            return Err(Eq2pcError::InvalidStopPolicy(
                "AfterCount(0) would stop before any case is found".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters of one search.
///
/// # Examples
///
/// ```
/// use eq2pc_search::correlation::Method;
/// use eq2pc_search::search::{SearchConfig, StopPolicy};
///
/// let config = SearchConfig::new(&[4, 3], &[3, 2])
///     .with_method(Method::Spectral)
///     .with_tolerance(1e-9)
///     .with_stop_policy(StopPolicy::AfterCount(2));
/// assert!(config.validate().is_ok());
/// assert!(config.reflection());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    shape: Vec<usize>,
    events: Vec<usize>,
    reflection: bool,
    method: Method,
    tolerance: f64,
    stop_policy: StopPolicy,
}

impl SearchConfig {
    /// A configuration with reflection on, the exact method and stop-at-first.
    pub fn new(shape: &[usize], events: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            events: events.to_vec(),
            reflection: true,
            method: Method::default(),
            tolerance: DEFAULT_TOLERANCE,
            stop_policy: StopPolicy::default(),
        }
    }

    pub fn with_reflection(mut self, reflection: bool) -> Self {
        self.reflection = reflection;
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Tolerance for spectral signature comparison; unused by the exact method.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_stop_policy(mut self, stop_policy: StopPolicy) -> Self {
        self.stop_policy = stop_policy;
        self
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn events(&self) -> &[usize] {
        &self.events
    }

    /// Reflection as requested by the caller.
    pub fn reflection(&self) -> bool {
        self.reflection
    }

    /// Reflection as applied: always on for 3-D grids.
    pub fn effective_reflection(&self) -> bool {
        self.reflection || self.shape.len() == 3
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn stop_policy(&self) -> StopPolicy {
        self.stop_policy
    }

    /// Check every precondition of a search.
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }

    /// Validated grid, event counts and comparison strategy.
    pub(crate) fn resolve(&self) -> Result<(GridShape, EventCounts, Comparison)> {
        let shape = GridShape::new(&self.shape)?;
        let events = EventCounts::new(&self.events)?;
        events.validate_for(&shape)?;
        if events.counts()[0] == 0 {
            return Err(Eq2pcError::UnanchoredEvents(self.events.clone()));
        }
        let comparison = Comparison::for_method(self.method, self.tolerance)?;
        self.stop_policy.validate()?;
        Ok((shape, events, comparison))
    }
}
