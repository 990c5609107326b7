// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Structure operations that conserve 2PC-equivalence.
//!
//! Applied to two structures with equal signatures, each of these returns
//! two structures with equal signatures again, which turns one found case
//! into a family of larger ones:
//! - `zero_pad` / `phase_extension`: spread the cells over a finer grid
//! - `kernel_application`: convolve each phase with its own kernel
//! - `structure_extension`: phase extension followed by kernel application
//! - `phase_concatenation`: merge groups of phases into single phases

use crate::error::{Eq2pcError, Result};
use crate::geometry::grid::{GridShape, MAX_DIMENSIONS};
use crate::geometry::indicator::{decompose, recompose_in, Indicator};
use crate::geometry::structure::{Phase, Structure};
use ndarray::{ArrayD, Dimension, IxDyn};

/// Integer convolution kernel, one per independent phase.
pub type Kernel = ArrayD<u32>;

/// Embed `structure` on a grid scaled by `factors`, at stride positions.
///
/// `factors` may name more axes than the structure has (up to three); the
/// structure then gains unit axes first. Cells off the stride are `None`.
pub fn zero_pad(structure: &Structure, factors: &[usize]) -> Result<ArrayD<Option<Phase>>> {
    let dims = structure.shape().dims();
    let ndim = dims.len().max(factors.len());
    if ndim > MAX_DIMENSIONS {
        return Err(Eq2pcError::UnsupportedDimensionality(factors.len()));
    }
    if factors.contains(&0) {
        return Err(Eq2pcError::invalid_shape(factors, "zero padding factor"));
    }

    let stride: Vec<usize> = (0..ndim).map(|axis| factors.get(axis).copied().unwrap_or(1)).collect();
    let base: Vec<usize> = (0..ndim).map(|axis| dims.get(axis).copied().unwrap_or(1)).collect();
    let padded: Vec<usize> = stride.iter().zip(&base).map(|(z, d)| z * d).collect();

    let mut out = ArrayD::from_elem(IxDyn(&padded), None);
    for index in structure.shape().positions() {
        let target: Vec<usize> = (0..ndim)
            .map(|axis| index.get(axis).copied().unwrap_or(0) * stride[axis])
            .collect();
        out[IxDyn(&target)] = Some(structure.get(&index)?);
    }
    Ok(out)
}

/// Zero padding followed by assigning the new phase `num_phases + 1` to
/// every padded cell.
pub fn phase_extension(structure: &Structure, factors: &[usize]) -> Result<Structure> {
    let padded = zero_pad(structure, factors)?;
    let shape = GridShape::new(padded.shape())?;
    if padded.iter().all(Option::is_some) {
        return Ok(Structure::from_cells(shape, padded.iter().flatten().copied().collect()));
    }
    let fill = structure.num_phases() as Phase + 1;
    let cells = padded.iter().map(|slot| slot.unwrap_or(fill)).collect();
    Ok(Structure::from_cells(shape, cells))
}

/// Unit impulse kernel of the given extent: 1 at the origin, 0 elsewhere.
pub fn unit_kernel(extent: &[usize]) -> Kernel {
    ArrayD::from_shape_fn(IxDyn(extent), |index| {
        u32::from(index.slice().iter().all(|&i| i == 0))
    })
}

/// Convolve each independent indicator with its kernel and recompose.
///
/// The convolution is the full, non-periodic one truncated to the grid, so
/// the structure should have been phase extended enough that no phase is
/// pushed past the grid edge.
///
/// Phases beyond the last kernel given use an all-ones kernel of the first
/// kernel's shape, so they are smeared into blocks. With no kernels at all
/// every indicator is kept as it is.
pub fn kernel_application(structure: &Structure, kernels: &[Kernel]) -> Result<Structure> {
    let indicators = decompose(structure, false);
    if kernels.len() > indicators.len() {
        return Err(Eq2pcError::InvalidKernel(format!(
            "{} kernels given for {} independent phases",
            kernels.len(),
            indicators.len()
        )));
    }
    let shape = structure.shape();
    if let Some(kernel) = kernels.iter().find(|k| k.ndim() != shape.ndim()) {
        return Err(Eq2pcError::InvalidKernel(format!(
            "kernel with {} axes for a {}-dimensional structure",
            kernel.ndim(),
            shape.ndim()
        )));
    }

    let fill = match kernels.first() {
        Some(first) => Kernel::ones(first.raw_dim()),
        None => unit_kernel(&vec![1; shape.ndim()]),
    };
    let convolved = indicators
        .iter()
        .enumerate()
        .map(|(k, indicator)| convolve_truncated(indicator, kernels.get(k).unwrap_or(&fill), k + 1))
        .collect::<Result<Vec<Indicator>>>()?;

    recompose_in(shape, &convolved, false)
}

/// `out[x] = sum_k indicator[x - k] * kernel[k]` over `x` in the grid,
/// without wrap-around. The result must again be an indicator.
fn convolve_truncated(indicator: &Indicator, kernel: &Kernel, phase: usize) -> Result<Indicator> {
    let dims = indicator.shape().to_vec();
    let mut values = ArrayD::<u32>::zeros(IxDyn(&dims));
    for (offset, &weight) in kernel.indexed_iter() {
        if weight == 0 {
            continue;
        }
        let offset = offset.slice();
        for (index, &set) in indicator.indexed_iter() {
            if !set {
                continue;
            }
            let target: Vec<usize> = index.slice().iter().zip(offset).map(|(i, o)| i + o).collect();
            if target.iter().zip(&dims).all(|(t, d)| t < d) {
                values[IxDyn(&target)] += weight;
            }
        }
    }

    if let Some((index, &value)) = values.indexed_iter().find(|(_, v)| **v > 1) {
        return Err(Eq2pcError::InvalidKernel(format!(
            "convolution of phase {} produced {} at {:?}",
            phase,
            value,
            index.slice()
        )));
    }
    Ok(values.mapv(|v| v == 1))
}

/// Phase extension by the kernels' extent, then kernel application.
///
/// Without kernels the default is the unit impulse of extent 2 on every
/// axis for phase 1; the other independent phases then get 2-wide blocks.
pub fn structure_extension(structure: &Structure, kernels: &[Kernel]) -> Result<Structure> {
    let default;
    let kernels = if kernels.is_empty() {
        default = [unit_kernel(&vec![2; structure.shape().ndim()])];
        &default[..]
    } else {
        kernels
    };
    let extended = phase_extension(structure, kernels[0].shape())?;
    kernel_application(&extended, kernels)
}

/// Merge groups of phases.
///
/// Group `k` (in the order given) becomes label `k + 1`. Phases not named
/// by any group follow as singleton groups in ascending order.
pub fn phase_concatenation(structure: &Structure, groups: &[Vec<Phase>]) -> Result<Structure> {
    let phases = structure.num_phases();
    let invalid = |reason: String| Eq2pcError::InvalidPhaseGroups {
        groups: groups.to_vec(),
        reason,
    };

    let mut mapping: Vec<Option<Phase>> = vec![None; phases + 1];
    let mut next: Phase = 1;
    for group in groups {
        if group.is_empty() {
            return Err(invalid("empty group".to_string()));
        }
        for &phase in group {
            if phase == 0 || phase as usize > phases {
                return Err(invalid(format!("phase {} not in 1..={}", phase, phases)));
            }
            if mapping[phase as usize].is_some() {
                return Err(invalid(format!("phase {} listed twice", phase)));
            }
            mapping[phase as usize] = Some(next);
        }
        next += 1;
    }
    for slot in mapping.iter_mut().skip(1) {
        if slot.is_none() {
            *slot = Some(next);
            next += 1;
        }
    }

    let cells = structure
        .cells()
        .iter()
        .map(|&label| mapping[label as usize].unwrap_or(label))
        .collect();
    Ok(Structure::from_cells(structure.shape().clone(), cells))
}
