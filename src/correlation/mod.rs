// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Two-point correlation engine.
//!
//! The 2PC of indicators `Ia`, `Ib` at shift `s` is
//! `C[s] = sum_x Ia[x] * Ib[(x + s) mod d]`. It is computed either exactly
//! (integer counts, O(N^2)) or spectrally (FFT, O(N log N), approximate).
//!
//! A [`Correlator`] holds the per-grid precomputation (offset tables or FFT
//! plans) so that the search pays for it once, not once per candidate.

pub mod comparison;
pub mod exact;
pub mod signature;
pub mod spectral;

pub use comparison::{Comparison, SignatureMatch, DEFAULT_TOLERANCE};
pub use signature::{full_correlations, phase_pairs, signature, PhasePair, Signature};
pub use spectral::cross_spectrum;

use crate::error::{Eq2pcError, Result};
use crate::geometry::{decompose, GridShape, Indicator, Structure};
use exact::ExactCorrelator;
use ndarray::ArrayD;
use spectral::SpectralCorrelator;

/// How correlations are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// Direct circular correlation with integer counts.
    #[default]
    Exact,
    /// FFT-based correlation; values are floating point.
    Spectral,
}

/// Correlation values for every shift, indexed like the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Correlation {
    Exact(ArrayD<u64>),
    Spectral(ArrayD<f64>),
}

impl Correlation {
    /// Method that produced these values.
    pub fn method(&self) -> Method {
        match self {
            Correlation::Exact(_) => Method::Exact,
            Correlation::Spectral(_) => Method::Spectral,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Correlation::Exact(values) => values.shape(),
            Correlation::Spectral(values) => values.shape(),
        }
    }

    /// Values as floating point, whatever the method.
    pub fn to_f64(&self) -> ArrayD<f64> {
        match self {
            Correlation::Exact(values) => values.mapv(|v| v as f64),
            Correlation::Spectral(values) => values.clone(),
        }
    }

    /// Integer counts, if computed exactly.
    pub fn as_exact(&self) -> Option<&ArrayD<u64>> {
        match self {
            Correlation::Exact(values) => Some(values),
            Correlation::Spectral(_) => None,
        }
    }
}

#[derive(Debug)]
enum Backend {
    Exact(ExactCorrelator),
    Spectral(SpectralCorrelator),
}

/// Correlation evaluator for one grid shape and method.
#[derive(Debug)]
pub struct Correlator {
    shape: GridShape,
    method: Method,
    backend: Backend,
}

impl Correlator {
    pub fn new(shape: &GridShape, method: Method) -> Self {
        let backend = match method {
            Method::Exact => Backend::Exact(ExactCorrelator::new(shape)),
            Method::Spectral => Backend::Spectral(SpectralCorrelator::new(shape)),
        };
        Self {
            shape: shape.clone(),
            method,
            backend,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// Correlate two indicators of this correlator's grid.
    pub fn correlate(&self, a: &Indicator, b: &Indicator) -> Result<Correlation> {
        self.check(a)?;
        self.check(b)?;
        Ok(match &self.backend {
            Backend::Exact(exact) => Correlation::Exact(exact.correlate(a, b)),
            Backend::Spectral(spectral) => Correlation::Spectral(spectral.correlate(a, b)),
        })
    }

    /// Signature of a structure on this correlator's grid.
    pub fn signature(&self, structure: &Structure) -> Result<Signature> {
        self.shape.expect_same(structure.shape())?;
        let indicators = decompose(structure, false);
        let pairs = phase_pairs(indicators.len());
        let correlations = self.correlate_pairs(&indicators, &pairs);
        Ok(Signature::new(self.method, self.shape.clone(), pairs, correlations))
    }

    /// Correlations for the given pairs of `indicators` (phase `k` is
    /// `indicators[k - 1]`). Spectral transforms are computed once per phase.
    pub(crate) fn correlate_pairs(
        &self,
        indicators: &[Indicator],
        pairs: &[PhasePair],
    ) -> Vec<Correlation> {
        match &self.backend {
            Backend::Exact(exact) => pairs
                .iter()
                .map(|pair| {
                    Correlation::Exact(exact.correlate(
                        &indicators[pair.first as usize - 1],
                        &indicators[pair.second as usize - 1],
                    ))
                })
                .collect(),
            Backend::Spectral(spectral) => {
                let transforms: Vec<_> = indicators.iter().map(|i| spectral.transform(i)).collect();
                pairs
                    .iter()
                    .map(|pair| {
                        Correlation::Spectral(spectral.correlate_transformed(
                            &transforms[pair.first as usize - 1],
                            &transforms[pair.second as usize - 1],
                        ))
                    })
                    .collect()
            }
        }
    }

    fn check(&self, indicator: &Indicator) -> Result<()> {
        if indicator.shape() != self.shape.dims() {
            return Err(Eq2pcError::shape_mismatch(self.shape.dims(), indicator.shape()));
        }
        Ok(())
    }
}

/// Correlate two indicator arrays of the same shape.
pub fn correlate(a: &Indicator, b: &Indicator, method: Method) -> Result<Correlation> {
    let shape = GridShape::new(a.shape())?;
    Correlator::new(&shape, method).correlate(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    fn indicator(dims: &[usize], set: &[bool]) -> Indicator {
        ArrayD::from_shape_vec(IxDyn(dims), set.to_vec()).unwrap()
    }

    #[test]
    fn test_exact_1d() {
        let a = indicator(&[4], &[true, true, false, false]);
        let b = indicator(&[4], &[true, false, true, false]);
        let c = correlate(&a, &b, Method::Exact).unwrap();
        // C[s] = sum_x a[x] b[x+s]
        let expected = ArrayD::from_shape_vec(IxDyn(&[4]), vec![1u64, 1, 1, 1]).unwrap();
        assert_eq!(c, Correlation::Exact(expected));

        let auto = correlate(&a, &a, Method::Exact).unwrap();
        assert_eq!(
            auto.as_exact().unwrap().iter().copied().collect::<Vec<_>>(),
            vec![2, 1, 0, 1]
        );
    }

    #[test]
    fn test_zero_shift_is_overlap() {
        let a = indicator(&[2, 3], &[true, false, true, false, true, false]);
        let c = correlate(&a, &a, Method::Exact).unwrap();
        assert_eq!(c.as_exact().unwrap()[IxDyn(&[0, 0])], 3);
        assert_eq!(c.shape(), &[2, 3]);
    }

    #[test]
    fn test_spectral_matches_exact() {
        let a = indicator(&[3, 2], &[true, false, false, true, true, false]);
        let b = indicator(&[3, 2], &[false, true, true, false, false, false]);
        let exact = correlate(&a, &b, Method::Exact).unwrap().to_f64();
        let spectral = correlate(&a, &b, Method::Spectral).unwrap().to_f64();
        for (x, y) in exact.iter().zip(spectral.iter()) {
            assert!((x - y).abs() < 1e-12, "{} vs {}", x, y);
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let a = indicator(&[4], &[true, false, false, false]);
        let b = indicator(&[2, 2], &[true, false, false, false]);
        assert!(matches!(
            correlate(&a, &b, Method::Exact),
            Err(Eq2pcError::ShapeMismatch { .. })
        ));
    }
}
