//! Voxel volumes
//!
//! Dense 3D grids stored as flat buffers, plus the voxel representations
//! accepted as label input.
//!
//! # Layout
//!
//! Voxels are stored X-fastest:
//! `index = x + y * nx + z * nx * ny`
//!
//! Spacing is the physical distance between neighbouring voxel centres along
//! each axis, so distance outputs are in physical units rather than voxel
//! counts.
//!
//! Author: Moroya Sakamoto

pub mod lanes;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Lane direction through a volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Fastest-varying axis (contiguous lanes)
    X,
    /// Middle axis (lanes strided by `nx`)
    Y,
    /// Slowest axis (lanes strided by `nx * ny`)
    Z,
}

impl Axis {
    /// Separable pass order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Pick this axis' component from a per-axis vector
    #[inline(always)]
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// Voxel counts along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims {
    /// Voxels along X
    pub nx: usize,
    /// Voxels along Y
    pub ny: usize,
    /// Voxels along Z
    pub nz: usize,
}

impl Dims {
    /// Create dimensions (not validated)
    pub const fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Reject grids with `nx < 2`, `ny < 2` or `nz < 1`
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.nx < 2 || self.ny < 2 || self.nz < 1 {
            return Err(FieldError::InvalidGeometry {
                nx: self.nx,
                ny: self.ny,
                nz: self.nz,
            });
        }
        Ok(())
    }

    /// Total number of voxels
    #[inline(always)]
    pub fn voxel_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Voxels in one Z-slice
    #[inline(always)]
    pub fn plane(&self) -> usize {
        self.nx * self.ny
    }

    /// Lane length along `axis`
    #[inline(always)]
    pub fn len(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.nx,
            Axis::Y => self.ny,
            Axis::Z => self.nz,
        }
    }

    /// Flat index from 3D coordinates (bounds-unchecked)
    #[inline(always)]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.nx + z * self.nx * self.ny
    }
}

/// Storage representation of an input voxel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoxelKind {
    /// Unsigned byte (binary masks)
    U8,
    /// Signed 16-bit integer
    I16,
    /// Signed 32-bit integer
    I32,
    /// 32-bit float, rounded to the nearest label
    F32,
}

/// Voxel types accepted as region-label input
///
/// A label `> 0` names a region; anything else is background.
pub trait Voxel: Copy + Send + Sync {
    /// Storage tag for this representation
    const KIND: VoxelKind;

    /// Region label of this voxel
    fn to_label(self) -> i32;

    /// Whether the voxel is set in a binary reading of the volume
    #[inline(always)]
    fn is_set(self) -> bool {
        self.to_label() != 0
    }
}

impl Voxel for u8 {
    const KIND: VoxelKind = VoxelKind::U8;

    #[inline(always)]
    fn to_label(self) -> i32 {
        self as i32
    }
}

impl Voxel for i16 {
    const KIND: VoxelKind = VoxelKind::I16;

    #[inline(always)]
    fn to_label(self) -> i32 {
        self as i32
    }
}

impl Voxel for i32 {
    const KIND: VoxelKind = VoxelKind::I32;

    #[inline(always)]
    fn to_label(self) -> i32 {
        self
    }
}

impl Voxel for f32 {
    const KIND: VoxelKind = VoxelKind::F32;

    /// Adds 0.5 and truncates toward zero (saturating for out-of-range values)
    #[inline(always)]
    fn to_label(self) -> i32 {
        (self + 0.5) as i32
    }
}

/// Dense 3D voxel grid with physical spacing
#[derive(Debug, Clone, PartialEq)]
pub struct Volume<T> {
    /// Flat voxel data, X-fastest
    pub data: Vec<T>,
    /// Voxel counts along each axis
    pub dims: Dims,
    /// Physical distance between voxel centres along X, Y, Z
    pub spacing: Vec3,
}

impl<T: Copy> Volume<T> {
    /// Wrap an existing buffer, checking its length against `dims`
    pub fn from_vec(dims: Dims, spacing: Vec3, data: Vec<T>) -> Result<Self, FieldError> {
        if data.len() != dims.voxel_count() {
            return Err(FieldError::SizeMismatch {
                expected: dims.voxel_count(),
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            dims,
            spacing,
        })
    }

    /// Create a volume filled with `value`
    pub fn filled(dims: Dims, spacing: Vec3, value: T) -> Self {
        Self {
            data: vec![value; dims.voxel_count()],
            dims,
            spacing,
        }
    }

    /// Total number of voxels
    #[inline(always)]
    pub fn voxel_count(&self) -> usize {
        self.dims.voxel_count()
    }

    /// Get flat index from 3D coordinates (bounds-unchecked)
    #[inline(always)]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        self.dims.index(x, y, z)
    }

    /// Get voxel at 3D coordinates
    #[inline(always)]
    pub fn get(&self, x: usize, y: usize, z: usize) -> T {
        self.data[self.index(x, y, z)]
    }

    /// Set voxel at 3D coordinates
    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: T) {
        let idx = self.index(x, y, z);
        self.data[idx] = value;
    }

    /// Physical position of a voxel centre, relative to voxel (0, 0, 0)
    #[inline(always)]
    pub fn voxel_to_physical(&self, x: usize, y: usize, z: usize) -> Vec3 {
        Vec3::new(x as f32, y as f32, z as f32) * self.spacing
    }

    /// Reject non-finite or non-positive spacing
    pub fn validate_spacing(&self) -> Result<(), FieldError> {
        validate_spacing(self.spacing)
    }
}

/// Every spacing component must be finite and strictly positive
pub fn validate_spacing(spacing: Vec3) -> Result<(), FieldError> {
    for axis in Axis::ALL {
        let value = axis.component(spacing);
        if !(value.is_finite() && value > 0.0) {
            return Err(FieldError::InvalidSpacing { axis, value });
        }
    }
    Ok(())
}

/// Distinct region labels (`> 0`) in first-seen order
pub fn unique_labels(labels: &[i32]) -> Vec<i32> {
    let mut seen = std::collections::HashSet::new();
    labels
        .iter()
        .copied()
        .filter(|&label| label > 0 && seen.insert(label))
        .collect()
}
