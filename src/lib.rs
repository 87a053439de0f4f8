//! # depth-field
//!
//! Per-voxel depth of labelled 3D volumes.
//!
//! Given a grid of integer region labels (0 = background) or a binary mask,
//! computes for every voxel how far it sits from the outside of its own
//! region, in physical units.
//!
//! ## Features
//!
//! - **Exact EDT**: separable Felzenszwalb & Huttenlocher lower envelope of
//!   parabolas, with per-axis voxel spacing
//! - **Label aware**: distances never cross a label change; every region is
//!   measured against its own boundary
//! - **Two strategies**: one label-segmented sweep for all labels, or one
//!   isolated transform per label
//! - **Edge policy**: the field-of-view boundary is background or not
//! - **Erosion depth**: cheap integer onion-peel alternative for byte masks
//! - **Parallel**: rayon across lanes and Z-slabs, identical results
//!
//! ## Example
//!
//! ```rust
//! use depth_field::prelude::*;
//!
//! // 5x5x1 region with a single background voxel in the middle
//! let dims = Dims::new(5, 5, 1);
//! let mut labels = vec![1i32; dims.voxel_count()];
//! labels[dims.index(2, 2, 0)] = 0;
//! let volume = Volume::from_vec(dims, Vec3::ONE, labels).unwrap();
//!
//! let config = DistanceFieldConfig::default()
//!     .with_sqrt(false)
//!     .with_edges_are_zero(false);
//! let field = distance_field(&volume, &config).unwrap();
//!
//! assert_eq!(field.get(1, 2, 0), 1.0);
//! assert_eq!(field.get(0, 0, 0), 8.0);
//! ```
//!
//! ## Author
//!
//! Moroya Sakamoto

#![warn(missing_docs)]

pub mod config;
pub mod edt;
pub mod error;
pub mod erosion;
pub mod volume;

pub use config::{DistanceFieldConfig, EdtStrategyKind, Metric};
pub use edt::SENTINEL;
pub use error::FieldError;
pub use volume::{Axis, Dims, Volume, Voxel, VoxelKind};

use crate::error::try_filled;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::config::{DistanceFieldConfig, EdtStrategyKind, Metric};
    pub use crate::distance_field;
    pub use crate::edt::{
        distance_transform, squared_edt_1d, EdtStrategy, LineSegmented, PerLabel, SENTINEL,
    };
    pub use crate::error::FieldError;
    pub use crate::erosion::erosion_depth;
    pub use crate::volume::{unique_labels, Axis, Dims, Volume, Voxel, VoxelKind};
    pub use glam::Vec3;
}

/// Depth of every voxel of `volume` under the configured metric
///
/// # Errors
/// - [`FieldError::InvalidGeometry`] / [`FieldError::SizeMismatch`] for bad
///   dimensions, before any allocation
/// - [`FieldError::InvalidSpacing`] for non-positive spacing (EDT only)
/// - [`FieldError::ExtentTooLarge`] when squared distances across the
///   volume would overflow f32 (EDT only)
/// - [`FieldError::UnsupportedVoxelType`] when erosion gets anything other
///   than byte voxels
/// - [`FieldError::Allocation`] when a working buffer cannot be allocated
pub fn distance_field<T: Voxel>(
    volume: &Volume<T>,
    config: &DistanceFieldConfig,
) -> Result<Volume<f32>, FieldError> {
    volume.dims.validate()?;
    if volume.data.len() != volume.dims.voxel_count() {
        return Err(FieldError::SizeMismatch {
            expected: volume.dims.voxel_count(),
            actual: volume.data.len(),
        });
    }

    let data = match config.metric {
        Metric::MarchingParabolas => {
            volume.validate_spacing()?;
            let mut labels = try_filled(volume.voxel_count(), 0i32)?;
            for (label, &v) in labels.iter_mut().zip(&volume.data) {
                *label = v.to_label();
            }
            edt::distance_transform(&labels, volume.dims, volume.spacing, config)?
        }
        Metric::Erosion => {
            if T::KIND != VoxelKind::U8 {
                return Err(FieldError::UnsupportedVoxelType {
                    metric: Metric::Erosion,
                    found: T::KIND,
                    expected: VoxelKind::U8,
                });
            }
            erosion::erosion_depth_of(&volume.data, volume.dims, config.parallel)?
        }
    };

    Volume::from_vec(volume.dims, volume.spacing, data)
}
