// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Per-structure correlation signatures.
//!
//! The signature of a structure with `P` phases is the correlation of every
//! pair `(a, b)` of independent phases, `1 <= a <= b <= P - 1`, in
//! lexicographic pair order. The last phase is implied by the others, so
//! leaving it out loses nothing.

use super::{Correlation, Correlator, Method};
use crate::error::{Eq2pcError, Result};
use crate::geometry::{decompose, GridShape, Phase, Structure};

/// An ordered pair of phase labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhasePair {
    pub first: Phase,
    pub second: Phase,
}

/// Pairs `(a, b)` with `1 <= a <= b <= independent`, lexicographically.
pub fn phase_pairs(independent: usize) -> Vec<PhasePair> {
    let last = independent as Phase;
    (1..=last)
        .flat_map(|first| (first..=last).map(move |second| PhasePair { first, second }))
        .collect()
}

/// The stacked correlations of one structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    method: Method,
    shape: GridShape,
    pairs: Vec<PhasePair>,
    correlations: Vec<Correlation>,
}

impl Signature {
    pub(crate) fn new(
        method: Method,
        shape: GridShape,
        pairs: Vec<PhasePair>,
        correlations: Vec<Correlation>,
    ) -> Self {
        debug_assert_eq!(pairs.len(), correlations.len());
        Self {
            method,
            shape,
            pairs,
            correlations,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    pub fn pairs(&self) -> &[PhasePair] {
        &self.pairs
    }

    pub fn correlations(&self) -> &[Correlation] {
        &self.correlations
    }

    /// Correlation of one phase pair, if present.
    pub fn get(&self, pair: PhasePair) -> Option<&Correlation> {
        self.pairs
            .iter()
            .position(|&p| p == pair)
            .map(|k| &self.correlations[k])
    }

    /// Number of phase pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True for single-phase structures, which have no independent phase.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Same grid and same phase pairs.
    pub fn same_layout(&self, other: &Signature) -> bool {
        self.shape == other.shape && self.pairs == other.pairs
    }

    /// Euclidean norm of the difference of two signatures over all pairs
    /// and shifts.
    pub fn discrepancy(&self, other: &Signature) -> Result<f64> {
        if !self.same_layout(other) {
            return Err(Eq2pcError::SignatureLayoutMismatch(format!(
                "{} with {} pairs vs {} with {} pairs",
                self.shape,
                self.pairs.len(),
                other.shape,
                other.pairs.len()
            )));
        }
        let sum: f64 = self
            .correlations
            .iter()
            .zip(&other.correlations)
            .map(|(a, b)| {
                let a = a.to_f64();
                let b = b.to_f64();
                a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum::<f64>()
            })
            .sum();
        Ok(sum.sqrt())
    }
}

/// Signature of `structure` using `method`.
pub fn signature(structure: &Structure, method: Method) -> Signature {
    let correlator = Correlator::new(structure.shape(), method);
    let indicators = decompose(structure, false);
    let pairs = phase_pairs(indicators.len());
    let correlations = correlator.correlate_pairs(&indicators, &pairs);
    Signature::new(method, structure.shape().clone(), pairs, correlations)
}

/// The `P x P` matrix of correlations of all phase indicators, including
/// the last: entry `[a-1][b-1]` correlates phase `a` with phase `b`.
pub fn full_correlations(structure: &Structure, method: Method) -> Vec<Vec<Correlation>> {
    let correlator = Correlator::new(structure.shape(), method);
    let indicators = decompose(structure, true);
    let phases = indicators.len() as Phase;
    let pairs: Vec<PhasePair> = (1..=phases)
        .flat_map(|first| (1..=phases).map(move |second| PhasePair { first, second }))
        .collect();
    let mut correlations = correlator.correlate_pairs(&indicators, &pairs).into_iter();
    (0..phases)
        .map(|_| correlations.by_ref().take(phases as usize).collect())
        .collect()
}
