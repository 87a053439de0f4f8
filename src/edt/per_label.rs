//! Per-label EDT
//!
//! Isolates one region at a time as a binary sentinel mask, transforms that
//! mask with the plain lower-envelope sweep (no segmentation needed once
//! only one label is left) and sums the per-label results. Every voxel
//! belongs to exactly one label and reads 0 in every other label's mask, so
//! the sum is each voxel's distance to the outside of its own region.
//!
//! # Passes per label
//!
//! - **X**: in place, lanes are contiguous.
//! - **Y, Z**: through one transposed scratch volume (lane engine gather /
//!   scatter), allocated once and reused for every label, so each sweep
//!   reads contiguous memory.
//!
//! Cost grows with the number of labels; use [`LineSegmented`] for volumes
//! with many regions.
//!
//! [`LineSegmented`]: super::LineSegmented
//!
//! Author: Moroya Sakamoto

use glam::Vec3;

use super::segment::{transform_padded, LineScratch};
use super::{fill_seeds, region_seed, EdtStrategy, PassOptions};
use crate::error::{try_filled, FieldError};
use crate::volume::lanes::map_lanes;
use crate::volume::{unique_labels, Axis, Dims};

/// Isolation strategy: one binary mask transform per label
#[derive(Debug, Clone, Copy, Default)]
pub struct PerLabel;

/// Transform one lane of a binary mask
///
/// The mask has a single region, so the only extra seeds are the
/// field-of-view edges when they count as background.
#[inline]
fn sweep_lane(lane: &mut [f32], delta: f32, edges_are_zero: bool, scratch: &mut LineScratch) {
    transform_padded(lane, edges_are_zero, edges_are_zero, delta, scratch);
}

impl EdtStrategy for PerLabel {
    fn name(&self) -> &'static str {
        "per-label"
    }

    fn squared_distances(
        &self,
        labels: &[i32],
        dims: Dims,
        spacing: Vec3,
        options: PassOptions,
    ) -> Result<Vec<f32>, FieldError> {
        let seed = region_seed(dims, spacing)?;
        let mut total = try_filled(dims.voxel_count(), 0.0f32)?;
        let mut mask = try_filled(dims.voxel_count(), 0.0f32)?;
        // Y / Z transpose buffer, shared by every label
        let mut lanes = try_filled(dims.voxel_count(), 0.0f32)?;

        for id in unique_labels(labels) {
            fill_seeds(&mut mask, labels, |label| label == id, seed, options.parallel);

            for axis in Axis::ALL {
                if dims.len(axis) < 2 {
                    continue;
                }
                let delta = axis.component(spacing);
                map_lanes(
                    &mut mask,
                    &mut lanes,
                    dims,
                    axis,
                    options.parallel,
                    |lane, scratch: &mut LineScratch| {
                        sweep_lane(lane, delta, options.edges_are_zero, scratch)
                    },
                );
            }

            for ((t, &m), &label) in total.iter_mut().zip(&mask).zip(labels) {
                if label == id {
                    *t += m;
                }
            }
        }

        Ok(total)
    }
}
