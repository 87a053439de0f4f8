//! Lane traversal along one axis of a volume
//!
//! A lane is the line of voxels that share two coordinates: an X lane is a
//! row, a Z lane is a column through every slice. Separable transforms run
//! a 1D kernel over every lane of one axis, then move on to the next axis.
//!
//! # Strategy
//!
//! - **X lanes**: already contiguous, processed in place.
//! - **Y / Z lanes**: gathered into a lane-major scratch volume so that every
//!   lane is a contiguous chunk, processed, then scattered back.
//! - **Per-worker scratch**: each rayon worker owns one `S::default()` state
//!   reused across the lanes it visits (`for_each_init`).
//!
//! Lane numbering: X lanes are `y + z * ny`, Y lanes are `x + z * nx`,
//! Z lanes are `x + y * nx`.
//!
//! Author: Moroya Sakamoto

use rayon::prelude::*;

use super::{Axis, Dims};
use crate::error::{try_filled, FieldError};

/// Element stride between neighbours of one lane
#[inline(always)]
fn lane_stride(dims: Dims, axis: Axis) -> usize {
    match axis {
        Axis::X => 1,
        Axis::Y => dims.nx,
        Axis::Z => dims.plane(),
    }
}

/// Flat index of the first voxel of lane `lane`
#[inline(always)]
fn lane_base(dims: Dims, axis: Axis, lane: usize) -> usize {
    match axis {
        Axis::X => lane * dims.nx,
        Axis::Y => (lane / dims.nx) * dims.plane() + lane % dims.nx,
        Axis::Z => lane,
    }
}

/// Copy `src` into lane-major order for `axis`
///
/// Lane `l` occupies `out[l * n..(l + 1) * n]` where `n = dims.len(axis)`.
pub fn gather<T>(src: &[T], dims: Dims, axis: Axis, parallel: bool) -> Result<Vec<T>, FieldError>
where
    T: Copy + Default + Send + Sync,
{
    let mut lanes = try_filled(src.len(), T::default())?;
    gather_into(src, &mut lanes, dims, axis, parallel);
    Ok(lanes)
}

/// [`gather`] into a caller-owned buffer of the same length as `src`
pub fn gather_into<T>(src: &[T], lanes: &mut [T], dims: Dims, axis: Axis, parallel: bool)
where
    T: Copy + Send + Sync,
{
    debug_assert_eq!(src.len(), lanes.len());
    let n = dims.len(axis);
    let stride = lane_stride(dims, axis);

    let fill = |(l, lane): (usize, &mut [T])| {
        let base = lane_base(dims, axis, l);
        for (i, v) in lane.iter_mut().enumerate() {
            *v = src[base + i * stride];
        }
    };

    if parallel {
        lanes.par_chunks_mut(n).enumerate().for_each(fill);
    } else {
        lanes.chunks_mut(n).enumerate().for_each(fill);
    }
}

/// Inverse of [`gather`]: write lane-major `lanes` back into volume order
///
/// Parallelized by destination Z-slab, so every worker writes a disjoint
/// region.
pub fn scatter<T>(lanes: &[T], dst: &mut [T], dims: Dims, axis: Axis, parallel: bool)
where
    T: Copy + Send + Sync,
{
    let (nx, ny, nz) = (dims.nx, dims.ny, dims.nz);
    let plane = dims.plane();

    let fill = |(z, slab): (usize, &mut [T])| match axis {
        Axis::X => slab.copy_from_slice(&lanes[z * plane..(z + 1) * plane]),
        Axis::Y => {
            for y in 0..ny {
                let row = &mut slab[y * nx..(y + 1) * nx];
                for (x, v) in row.iter_mut().enumerate() {
                    *v = lanes[(x + z * nx) * ny + y];
                }
            }
        }
        Axis::Z => {
            for (j, v) in slab.iter_mut().enumerate() {
                *v = lanes[j * nz + z];
            }
        }
    };

    if parallel {
        dst.par_chunks_mut(plane).enumerate().for_each(fill);
    } else {
        dst.chunks_mut(plane).enumerate().for_each(fill);
    }
}

/// Run `f` over matching chunks of `data` and `aux`
fn for_each_chunk<T, A, S, F>(data: &mut [T], aux: &[A], n: usize, parallel: bool, f: &F)
where
    T: Send,
    A: Sync,
    S: Default + Send,
    F: Fn(&[A], &mut [T], &mut S) + Sync,
{
    if parallel {
        data.par_chunks_mut(n)
            .zip(aux.par_chunks(n))
            .for_each_init(S::default, |scratch, (lane, aux_lane)| f(aux_lane, lane, scratch));
    } else {
        let mut scratch = S::default();
        for (lane, aux_lane) in data.chunks_mut(n).zip(aux.chunks(n)) {
            f(aux_lane, lane, &mut scratch);
        }
    }
}

/// Apply `f(aux_lane, lane, scratch)` to every lane along `axis`
///
/// `aux` is a read-only companion volume (e.g. region labels) whose lanes are
/// handed to `f` alongside the matching lanes of `data`.
pub fn map_lanes_with<T, A, S, F>(
    data: &mut [T],
    aux: &[A],
    dims: Dims,
    axis: Axis,
    parallel: bool,
    f: F,
) -> Result<(), FieldError>
where
    T: Copy + Default + Send + Sync,
    A: Copy + Default + Send + Sync,
    S: Default + Send,
    F: Fn(&[A], &mut [T], &mut S) + Sync,
{
    debug_assert_eq!(data.len(), dims.voxel_count());
    debug_assert_eq!(aux.len(), dims.voxel_count());

    let n = dims.len(axis);
    if n == 0 {
        return Ok(());
    }

    match axis {
        Axis::X => for_each_chunk(data, aux, n, parallel, &f),
        Axis::Y | Axis::Z => {
            let mut lanes = gather(data, dims, axis, parallel)?;
            let aux_lanes = gather(aux, dims, axis, parallel)?;
            for_each_chunk(&mut lanes, &aux_lanes, n, parallel, &f);
            scatter(&lanes, data, dims, axis, parallel);
        }
    }

    Ok(())
}

/// Apply `f(lane, scratch)` to every lane along `axis`
///
/// `lanes` is a caller-owned transpose buffer (same length as `data`) for the
/// Y and Z passes, so repeated sweeps over one volume allocate nothing. Its
/// contents on entry are ignored.
pub fn map_lanes<T, S, F>(
    data: &mut [T],
    lanes: &mut [T],
    dims: Dims,
    axis: Axis,
    parallel: bool,
    f: F,
) where
    T: Copy + Send + Sync,
    S: Default + Send,
    F: Fn(&mut [T], &mut S) + Sync,
{
    debug_assert_eq!(data.len(), dims.voxel_count());
    debug_assert_eq!(lanes.len(), data.len());

    let n = dims.len(axis);
    if n == 0 {
        return;
    }

    let run = |chunks: &mut [T]| {
        if parallel {
            chunks
                .par_chunks_mut(n)
                .for_each_init(S::default, |scratch, lane| f(lane, scratch));
        } else {
            let mut scratch = S::default();
            for lane in chunks.chunks_mut(n) {
                f(lane, &mut scratch);
            }
        }
    };

    match axis {
        Axis::X => run(&mut *data),
        Axis::Y | Axis::Z => {
            gather_into(data, lanes, dims, axis, parallel);
            run(&mut *lanes);
            scatter(lanes, data, dims, axis, parallel);
        }
    }
}
