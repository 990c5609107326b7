// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! FFT-based correlation.
//!
//! The N-dimensional transform is applied one axis at a time over the
//! array's lanes. rustfft does not normalize, so the inverse divides by the
//! number of cells.

use crate::error::{Eq2pcError, Result};
use crate::geometry::{GridShape, Indicator};
use ndarray::{ArrayD, Axis};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;

/// Spectral correlator holding forward and inverse plans for every axis.
pub struct SpectralCorrelator {
    shape: GridShape,
    forward: Vec<Arc<dyn Fft<f64>>>,
    inverse: Vec<Arc<dyn Fft<f64>>>,
}

impl fmt::Debug for SpectralCorrelator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectralCorrelator")
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

impl SpectralCorrelator {
    pub fn new(shape: &GridShape) -> Self {
        let mut planner = FftPlanner::new();
        let forward = shape.dims().iter().map(|&d| planner.plan_fft_forward(d)).collect();
        let inverse = shape.dims().iter().map(|&d| planner.plan_fft_inverse(d)).collect();
        Self {
            shape: shape.clone(),
            forward,
            inverse,
        }
    }

    /// Forward N-dimensional transform of an indicator.
    pub fn transform(&self, indicator: &Indicator) -> ArrayD<Complex64> {
        let mut data = indicator.mapv(|set| Complex64::new(if set { 1.0 } else { 0.0 }, 0.0));
        apply(&mut data, &self.forward);
        data
    }

    /// `conj(Fa) * Fb` for already transformed indicators.
    pub fn cross_transformed(&self, fa: &ArrayD<Complex64>, fb: &ArrayD<Complex64>) -> ArrayD<Complex64> {
        let mut cross = fa.mapv(|z| z.conj());
        cross.zip_mut_with(fb, |x, y| *x *= *y);
        cross
    }

    /// Correlation from already transformed indicators.
    pub fn correlate_transformed(&self, fa: &ArrayD<Complex64>, fb: &ArrayD<Complex64>) -> ArrayD<f64> {
        let mut cross = self.cross_transformed(fa, fb);
        apply(&mut cross, &self.inverse);
        let cells = self.shape.cells() as f64;
        cross.mapv(|z| z.re / cells)
    }

    pub fn correlate(&self, a: &Indicator, b: &Indicator) -> ArrayD<f64> {
        self.correlate_transformed(&self.transform(a), &self.transform(b))
    }
}

/// Run one 1-D plan along each axis in turn.
fn apply(data: &mut ArrayD<Complex64>, plans: &[Arc<dyn Fft<f64>>]) {
    for (axis, fft) in plans.iter().enumerate() {
        let mut buffer = vec![Complex64::default(); data.len_of(Axis(axis))];
        for mut lane in data.lanes_mut(Axis(axis)) {
            for (slot, value) in buffer.iter_mut().zip(lane.iter()) {
                *slot = *value;
            }
            fft.process(&mut buffer);
            for (value, slot) in lane.iter_mut().zip(&buffer) {
                *value = *slot;
            }
        }
    }
}

/// Cross power spectrum `conj(F(a)) * F(b)` of two indicators.
///
/// Inverse transforming it and taking the real part gives the spectral
/// correlation of `a` and `b` (times the number of cells).
pub fn cross_spectrum(a: &Indicator, b: &Indicator) -> Result<ArrayD<Complex64>> {
    if a.shape() != b.shape() {
        return Err(Eq2pcError::shape_mismatch(a.shape(), b.shape()));
    }
    let shape = GridShape::new(a.shape())?;
    let spectral = SpectralCorrelator::new(&shape);
    Ok(spectral.cross_transformed(&spectral.transform(a), &spectral.transform(b)))
}
