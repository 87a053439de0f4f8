//! Exact Euclidean distance transform of labelled volumes
//!
//! Every voxel of a region (label `> 0`) receives its distance to the nearest
//! voxel carrying a different label. Background voxels are seeds and stay 0.
//! With `edges_are_zero`, the outside of the field of view also counts as
//! background.
//!
//! # Pipeline
//!
//! 1. **Seed**: region voxels start at [`region_seed`] (at least
//!    [`SENTINEL`], and beyond the squared physical diagonal), everything
//!    else at 0.
//! 2. **Separable passes**: a 1D lower-envelope transform along X, then Y,
//!    then Z, accumulating squared distances in physical units.
//! 3. **Finish**: optional square root.
//!
//! # Strategies
//!
//! - [`LineSegmented`]: all labels at once; each lane is cut into equal-label
//!   runs with seeds at the transitions.
//! - [`PerLabel`]: one binary mask per label, transformed without
//!   segmentation and summed. Slower, same result.
//!
//! Author: Moroya Sakamoto

pub mod kernel;
pub mod line_segmented;
pub mod per_label;
pub mod segment;

pub use kernel::{squared_edt_1d, transform_line, Envelope};
pub use line_segmented::LineSegmented;
pub use per_label::PerLabel;
pub use segment::{segment_line, transform_padded, LineScratch};

use glam::Vec3;
use rayon::prelude::*;

use crate::config::DistanceFieldConfig;
use crate::error::FieldError;
use crate::volume::{validate_spacing, Axis, Dims};

/// Smallest initial squared distance of a region voxel
///
/// Volumes whose squared diagonal comes near it get a larger seed from
/// [`region_seed`].
pub const SENTINEL: f32 = 1e10;

/// Initial squared distance of region voxels for a volume
///
/// At least [`SENTINEL`] and four times the squared physical diagonal
/// (padding cells included), so no seed-free parabola ever beats a real
/// seed. The seed plus any parabola offset must stay finite in `f32`.
pub fn region_seed(dims: Dims, spacing: Vec3) -> Result<f32, FieldError> {
    let diagonal_sq: f64 = Axis::ALL
        .iter()
        .map(|&axis| {
            let extent = (dims.len(axis) + 1) as f64 * axis.component(spacing) as f64;
            extent * extent
        })
        .sum();

    let seed = (4.0 * diagonal_sq).max(SENTINEL as f64);
    if seed + diagonal_sq > f32::MAX as f64 {
        return Err(FieldError::ExtentTooLarge {
            diagonal: diagonal_sq.sqrt(),
        });
    }
    Ok(seed as f32)
}

/// Per-pass settings shared by both strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOptions {
    /// Treat the field-of-view boundary as background
    pub edges_are_zero: bool,
    /// Spread lanes over the rayon pool
    pub parallel: bool,
}

/// A way of computing the squared-distance field of a label volume
pub trait EdtStrategy: Send + Sync {
    /// Short identifier
    fn name(&self) -> &'static str;

    /// Squared distances (physical units) for every voxel of `labels`
    ///
    /// Inputs are already validated by [`distance_transform`].
    fn squared_distances(
        &self,
        labels: &[i32],
        dims: Dims,
        spacing: Vec3,
        options: PassOptions,
    ) -> Result<Vec<f32>, FieldError>;
}

/// Set `field` to `region` where `is_region(label)` holds, 0 elsewhere
pub(crate) fn fill_seeds<F>(
    field: &mut [f32],
    labels: &[i32],
    is_region: F,
    region: f32,
    parallel: bool,
) where
    F: Fn(i32) -> bool + Sync,
{
    let seed = |(d, &label): (&mut f32, &i32)| {
        *d = if is_region(label) { region } else { 0.0 };
    };

    if parallel {
        field.par_iter_mut().zip(labels.par_iter()).for_each(seed);
    } else {
        field.iter_mut().zip(labels.iter()).for_each(seed);
    }
}

/// Replace squared distances by distances
fn take_sqrt(field: &mut [f32], parallel: bool) {
    if parallel {
        field.par_iter_mut().for_each(|d| *d = d.sqrt());
    } else {
        field.iter_mut().for_each(|d| *d = d.sqrt());
    }
}

/// Distance field of a label volume
///
/// Validates geometry, buffer length, spacing and physical extent before any
/// allocation, runs
/// the configured strategy and applies the square root if `do_sqrt` is set.
/// The metric field of `config` is not consulted here.
pub fn distance_transform(
    labels: &[i32],
    dims: Dims,
    spacing: Vec3,
    config: &DistanceFieldConfig,
) -> Result<Vec<f32>, FieldError> {
    dims.validate()?;
    if labels.len() != dims.voxel_count() {
        return Err(FieldError::SizeMismatch {
            expected: dims.voxel_count(),
            actual: labels.len(),
        });
    }
    validate_spacing(spacing)?;
    region_seed(dims, spacing)?;

    let options = config.pass_options();
    let mut field = config
        .strategy
        .strategy()
        .squared_distances(labels, dims, spacing, options)?;

    if config.do_sqrt {
        take_sqrt(&mut field, options.parallel);
    }

    Ok(field)
}
