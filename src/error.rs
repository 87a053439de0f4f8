//! Error types for depth-field computation
//!
//! Every failure is fatal to the single call that raised it: no partial
//! field is ever returned alongside an error.
//!
//! Author: Moroya Sakamoto

use thiserror::Error;

use crate::config::Metric;
use crate::volume::{Axis, VoxelKind};

/// Depth-field computation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Volume dimensions below the supported minimum
    #[error("Invalid geometry: {nx}x{ny}x{nz} (need nx >= 2, ny >= 2, nz >= 1)")]
    InvalidGeometry {
        /// Voxels along X
        nx: usize,
        /// Voxels along Y
        ny: usize,
        /// Voxels along Z
        nz: usize,
    },

    /// Voxel buffer length does not match the dimensions
    #[error("Size mismatch: expected {expected} voxels, got {actual}")]
    SizeMismatch {
        /// Voxel count implied by the dimensions
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// Voxel spacing must be finite and strictly positive
    #[error("Invalid spacing along {axis:?}: {value}")]
    InvalidSpacing {
        /// Offending axis
        axis: Axis,
        /// Supplied spacing
        value: f32,
    },

    /// Physical extent too large for squared distances to fit in f32
    #[error("Volume too large: physical diagonal {diagonal} exceeds f32 squared-distance range")]
    ExtentTooLarge {
        /// Physical diagonal of the volume, padding cells included
        diagonal: f64,
    },

    /// The metric cannot run on this voxel representation
    #[error("{metric:?} does not support {found:?} voxels (expected {expected:?})")]
    UnsupportedVoxelType {
        /// Requested metric
        metric: Metric,
        /// Representation of the input volume
        found: VoxelKind,
        /// Representation the metric requires
        expected: VoxelKind,
    },

    /// A working buffer could not be allocated
    #[error("Allocation failed: {elements} elements")]
    Allocation {
        /// Requested element count
        elements: usize,
    },

    /// Metric name not recognized
    #[error("Unknown metric: '{0}'. Expected MARCHING_PARABOLAS or EROSION")]
    UnknownMetric(String),
}

/// Allocate a buffer of `len` copies of `value`, reporting failure instead of aborting
pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, FieldError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| FieldError::Allocation { elements: len })?;
    buffer.resize(len, value);
    Ok(buffer)
}
