//! Label-aware line transform
//!
//! Splits a lane into maximal runs of one region label and transforms each
//! run on its own, so distance never propagates across a label change: the
//! nearest "outside" voxel for region A is the A/B transition, not something
//! buried inside B.
//!
//! A transition is injected as a zero-distance seed in a pad cell right
//! outside the run, which keeps the kernel itself label-agnostic.
//!
//! # Pad rules (per run end)
//!
//! | Run end | Pad seed |
//! |---|---|
//! | next to another label | always |
//! | at the field-of-view edge, region label | only if `edges_are_zero` |
//! | at the field-of-view edge, background | never (already all seeds) |
//!
//! Author: Moroya Sakamoto

use super::kernel::{transform_line, Envelope};

/// Scratch buffers for one worker
#[derive(Debug, Clone, Default)]
pub struct LineScratch {
    padded: Vec<f32>,
    out: Vec<f32>,
    envelope: Envelope,
}

/// Transform `values` with optional zero seeds just before and after it
pub fn transform_padded(
    values: &mut [f32],
    pad_front: bool,
    pad_back: bool,
    delta: f32,
    scratch: &mut LineScratch,
) {
    let LineScratch {
        padded,
        out,
        envelope,
    } = scratch;

    padded.clear();
    if pad_front {
        padded.push(0.0);
    }
    padded.extend_from_slice(values);
    if pad_back {
        padded.push(0.0);
    }

    out.clear();
    out.resize(padded.len(), 0.0);
    transform_line(padded, delta, out, envelope);

    let start = pad_front as usize;
    values.copy_from_slice(&out[start..start + values.len()]);
}

/// Rewrite `dist` in place, one equal-label run at a time
///
/// `labels` and `dist` are parallel lanes. Runs whose label is background
/// (`<= 0`) hold only seeds and are skipped.
pub fn segment_line(
    labels: &[i32],
    dist: &mut [f32],
    delta: f32,
    edges_are_zero: bool,
    scratch: &mut LineScratch,
) {
    debug_assert_eq!(labels.len(), dist.len());
    let n = labels.len();

    let mut start = 0;
    while start < n {
        let label = labels[start];
        let end = labels[start..]
            .iter()
            .position(|&l| l != label)
            .map_or(n, |len| start + len);

        if label > 0 {
            let pad_front = start > 0 || edges_are_zero;
            let pad_back = end < n || edges_are_zero;
            transform_padded(&mut dist[start..end], pad_front, pad_back, delta, scratch);
        }

        start = end;
    }
}
