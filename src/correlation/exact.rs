// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Direct circular correlation.

use crate::geometry::{GridShape, Indicator};
use ndarray::{ArrayD, Dimension};

/// Exact correlator with one offset table per shift.
///
/// `offsets[s][x]` is the flat position of `x + s`, with `s` in flattening
/// order, so a correlation is a sum of table lookups.
#[derive(Debug)]
pub struct ExactCorrelator {
    shape: GridShape,
    offsets: Vec<Vec<usize>>,
}

impl ExactCorrelator {
    pub fn new(shape: &GridShape) -> Self {
        let offsets = shape.positions().map(|s| shape.offset_table(&s)).collect();
        Self {
            shape: shape.clone(),
            offsets,
        }
    }

    /// `C[s] = sum_x a[x] * b[x + s]`, as integer counts.
    pub fn correlate(&self, a: &Indicator, b: &Indicator) -> ArrayD<u64> {
        let target: Vec<bool> = b.iter().copied().collect();
        let support: Vec<usize> = a
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(|(x, _)| x)
            .collect();

        ArrayD::from_shape_fn(self.shape.ix(), |shift| {
            let table = &self.offsets[self.shape.ravel(shift.slice())];
            support.iter().filter(|&&x| target[table[x]]).count() as u64
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_2d_shift_direction() {
        let shape = GridShape::new(&[2, 2]).unwrap();
        let correlator = ExactCorrelator::new(&shape);
        let a = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![true, false, false, false]).unwrap();
        let b = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![false, true, false, false]).unwrap();
        let c = correlator.correlate(&a, &b);
        // b is a moved by +1 along axis 1
        assert_eq!(c[IxDyn(&[0, 1])], 1);
        assert_eq!(c.iter().sum::<u64>(), 1);
    }

    #[test]
    fn test_total_is_product_of_counts() {
        let shape = GridShape::new(&[3, 3]).unwrap();
        let correlator = ExactCorrelator::new(&shape);
        let a = ArrayD::from_shape_fn(IxDyn(&[3, 3]), |ix| ix[0] == ix[1]);
        let b = ArrayD::from_shape_fn(IxDyn(&[3, 3]), |ix| ix[0] == 0);
        let c = correlator.correlate(&a, &b);
        assert_eq!(c.iter().sum::<u64>(), 3 * 3);
    }
}
