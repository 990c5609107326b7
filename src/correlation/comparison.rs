// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Signature equality.
//!
//! Exact signatures are compared element by element. Spectral signatures
//! are floating point, so they match when the norm of their difference is
//! below a tolerance. The strategy follows from the correlation method and
//! the two are never mixed.

use super::{Method, Signature};
use crate::error::{Eq2pcError, Result};
use tracing::warn;

/// Default spectral tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-13;

/// A signature equality strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    Exact,
    Tolerance(f64),
}

/// Outcome of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignatureMatch {
    pub matched: bool,
    /// The discrepancy was within an order of magnitude of the tolerance.
    pub near_tolerance: bool,
}

impl Comparison {
    /// The strategy for signatures computed with `method`.
    pub fn for_method(method: Method, tolerance: f64) -> Result<Self> {
        match method {
            Method::Exact => Ok(Comparison::Exact),
            Method::Spectral => {
                if !tolerance.is_finite() || tolerance <= 0.0 {
                    return Err(Eq2pcError::InvalidTolerance(tolerance));
                }
                Ok(Comparison::Tolerance(tolerance))
            }
        }
    }

    /// The method whose signatures this strategy compares.
    pub fn method(&self) -> Method {
        match self {
            Comparison::Exact => Method::Exact,
            Comparison::Tolerance(_) => Method::Spectral,
        }
    }

    /// Compare two signatures.
    ///
    /// Signatures over different grids or phase pairs never match.
    /// Signatures of the wrong method are an error.
    pub fn compare(&self, a: &Signature, b: &Signature) -> Result<SignatureMatch> {
        if a.method() != self.method() || b.method() != self.method() {
            return Err(Eq2pcError::MixedSignatures {
                left: a.method(),
                right: b.method(),
                comparison: format!("{:?}", self),
            });
        }
        if !a.same_layout(b) {
            return Ok(SignatureMatch::default());
        }

        match *self {
            Comparison::Exact => Ok(SignatureMatch {
                matched: a.correlations() == b.correlations(),
                near_tolerance: false,
            }),
            Comparison::Tolerance(tolerance) => {
                let norm = a.discrepancy(b)?;
                let matched = norm < tolerance;
                let near_tolerance = norm >= tolerance / 10.0 && norm < tolerance * 10.0;
                if near_tolerance {
                    warn!(
                        norm,
                        tolerance,
                        matched,
                        "Signature discrepancy within an order of magnitude of the tolerance"
                    );
                }
                Ok(SignatureMatch {
                    matched,
                    near_tolerance,
                })
            }
        }
    }

    /// Shorthand for `compare(..)?.matched`.
    pub fn matches(&self, a: &Signature, b: &Signature) -> Result<bool> {
        Ok(self.compare(a, b)?.matched)
    }
}
