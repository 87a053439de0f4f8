//! Common test helpers for depth-field integration tests
//!
//! Author: Moroya Sakamoto

#![allow(dead_code)]

use depth_field::prelude::*;

// ============================================================================
// Standard test volumes
// ============================================================================

/// Three touching regions (labels 1, 2, 4) with scattered background
pub fn mixed_labels(dims: Dims) -> Vec<i32> {
    let mut labels = Vec::with_capacity(dims.voxel_count());
    for z in 0..dims.nz {
        for y in 0..dims.ny {
            for x in 0..dims.nx {
                let label = match (x / 2 + 2 * y + 3 * z) % 9 {
                    0 => 0,
                    1..=4 => 1,
                    5 | 6 => 2,
                    _ => 4,
                };
                labels.push(label);
            }
        }
    }
    labels
}

/// Solid axis-aligned box of label 1 in `[lo, hi)` on every axis
pub fn box_labels(dims: Dims, lo: usize, hi: usize) -> Vec<i32> {
    let mut labels = vec![0; dims.voxel_count()];
    for z in lo..hi.min(dims.nz) {
        for y in lo..hi.min(dims.ny) {
            for x in lo..hi.min(dims.nx) {
                labels[dims.index(x, y, z)] = 1;
            }
        }
    }
    labels
}

/// Wrap labels into a volume
pub fn label_volume(dims: Dims, spacing: Vec3, labels: Vec<i32>) -> Volume<i32> {
    Volume::from_vec(dims, spacing, labels).expect("labels match dims")
}

/// Squared-distance configuration with the given edge policy
pub fn squared(edges_are_zero: bool) -> DistanceFieldConfig {
    DistanceFieldConfig::default()
        .with_sqrt(false)
        .with_edges_are_zero(edges_are_zero)
}

// ============================================================================
// Reference implementation
// ============================================================================

/// O(n^2) squared distance from every region voxel to the nearest voxel of a
/// different label, or to the outside of the volume when `edges_are_zero`
pub fn brute_force_squared(
    labels: &[i32],
    dims: Dims,
    spacing: Vec3,
    edges_are_zero: bool,
) -> Vec<f32> {
    let volume = label_volume(dims, spacing, labels.to_vec());
    let mut out = vec![0.0f32; labels.len()];

    for z in 0..dims.nz {
        for y in 0..dims.ny {
            for x in 0..dims.nx {
                let i = dims.index(x, y, z);
                let label = labels[i];
                if label <= 0 {
                    continue;
                }

                let here = volume.voxel_to_physical(x, y, z);
                let mut best = f32::INFINITY;

                for w in 0..dims.nz {
                    for v in 0..dims.ny {
                        for u in 0..dims.nx {
                            if labels[dims.index(u, v, w)] != label {
                                let d = (volume.voxel_to_physical(u, v, w) - here).length_squared();
                                best = best.min(d);
                            }
                        }
                    }
                }

                if edges_are_zero {
                    for (c, n, axis) in [(x, dims.nx, Axis::X), (y, dims.ny, Axis::Y), (z, dims.nz, Axis::Z)] {
                        if n < 2 {
                            continue;
                        }
                        let delta = axis.component(spacing);
                        let near = (c + 1).min(n - c) as f32 * delta;
                        best = best.min(near * near);
                    }
                }

                out[i] = best;
            }
        }
    }

    out
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Assert two f32 values are close within tolerance
pub fn assert_close(a: f32, b: f32, tol: f32, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff={}, tol={})",
        msg,
        a,
        b,
        (a - b).abs(),
        tol
    );
}

/// Assert two fields agree within a relative tolerance
pub fn assert_fields_close(a: &[f32], b: &[f32], rel: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        let tol = rel * x.abs().max(y.abs()).max(1.0);
        assert!(
            (x - y).abs() <= tol,
            "{}: voxel {}: {} vs {} (diff={})",
            msg,
            i,
            x,
            y,
            (x - y).abs()
        );
    }
}
