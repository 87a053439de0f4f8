//! Multi-label separable EDT
//!
//! All labels are handled in one sweep per axis: every lane is re-segmented
//! by label (see [`segment_line`]) on every pass, so a run only ever sees
//! distances that belong to its own region.
//!
//! Author: Moroya Sakamoto

use glam::Vec3;

use super::segment::{segment_line, LineScratch};
use super::{fill_seeds, region_seed, EdtStrategy, PassOptions};
use crate::error::{try_filled, FieldError};
use crate::volume::lanes::map_lanes_with;
use crate::volume::{Axis, Dims};

/// Whole-volume strategy: label-run segmentation along X, Y, Z
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSegmented;

impl EdtStrategy for LineSegmented {
    fn name(&self) -> &'static str {
        "line-segmented"
    }

    fn squared_distances(
        &self,
        labels: &[i32],
        dims: Dims,
        spacing: Vec3,
        options: PassOptions,
    ) -> Result<Vec<f32>, FieldError> {
        let seed = region_seed(dims, spacing)?;
        let mut field = try_filled(dims.voxel_count(), 0.0f32)?;
        fill_seeds(&mut field, labels, |label| label > 0, seed, options.parallel);

        for axis in Axis::ALL {
            // a one-voxel-thick axis is a plane, not a slab with two faces
            if dims.len(axis) < 2 {
                continue;
            }
            let delta = axis.component(spacing);
            map_lanes_with(
                &mut field,
                labels,
                dims,
                axis,
                options.parallel,
                |lane_labels, lane, scratch: &mut LineScratch| {
                    segment_line(lane_labels, lane, delta, options.edges_are_zero, scratch)
                },
            )?;
        }

        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SENTINEL;

    fn options(edges_are_zero: bool) -> PassOptions {
        PassOptions {
            edges_are_zero,
            parallel: false,
        }
    }

    #[test]
    fn test_two_regions_share_boundary() {
        // 4x2x1, columns labelled [1, 1, 2, 2]
        let dims = Dims::new(4, 2, 1);
        let labels = [1, 1, 2, 2, 1, 1, 2, 2];

        let field = LineSegmented
            .squared_distances(&labels, dims, Vec3::ONE, options(false))
            .unwrap();
        assert_eq!(field, vec![4.0, 1.0, 1.0, 4.0, 4.0, 1.0, 1.0, 4.0]);

        let field = LineSegmented
            .squared_distances(&labels, dims, Vec3::ONE, options(true))
            .unwrap();
        assert!(field.iter().all(|&d| d == 1.0));
    }

    #[test]
    fn test_anisotropic_spacing() {
        // background column at x = 0; region elsewhere
        let dims = Dims::new(3, 3, 2);
        let labels: Vec<i32> = (0..dims.voxel_count())
            .map(|i| if i % 3 == 0 { 0 } else { 1 })
            .collect();
        let spacing = Vec3::new(2.0, 0.5, 7.0);

        let field = LineSegmented
            .squared_distances(&labels, dims, spacing, options(false))
            .unwrap();

        for z in 0..2 {
            for y in 0..3 {
                assert_eq!(field[dims.index(0, y, z)], 0.0);
                assert_eq!(field[dims.index(1, y, z)], 4.0);
                assert_eq!(field[dims.index(2, y, z)], 16.0);
            }
        }
    }

    #[test]
    fn test_isolated_region_without_edge_seeds() {
        let dims = Dims::new(2, 2, 2);
        let labels = [3; 8];

        let field = LineSegmented
            .squared_distances(&labels, dims, Vec3::ONE, options(false))
            .unwrap();
        assert!(field.iter().all(|&d| d >= SENTINEL));

        let field = LineSegmented
            .squared_distances(&labels, dims, Vec3::ONE, options(true))
            .unwrap();
        assert!(field.iter().all(|&d| d == 1.0));
    }
}
