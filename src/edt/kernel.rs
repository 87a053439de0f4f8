//! 1D squared Euclidean distance transform (lower envelope of parabolas)
//!
//! For a sampled function `f` on a line with spacing `delta`, computes
//!
//! `Df[q] = min_p f[p] + (delta * (q - p))^2`
//!
//! in O(n) with the Felzenszwalb & Huttenlocher marching-parabolas method:
//! every sample is the vertex of an upward parabola, the lower envelope of
//! those parabolas is built left to right on a stack, then swept once to read
//! off the minimum at each sample.
//!
//! Breakpoints are kept in physical units (`q * delta`) so non-unit spacing
//! needs no rescaling of `f`. Arithmetic runs in `f64`: seeds near the
//! sentinel would otherwise lose the parabola offsets to rounding.
//!
//! Author: Moroya Sakamoto

/// Reusable envelope state for one line
///
/// `v` holds sample indices of the parabolas on the envelope, `z` the
/// physical coordinate where each one starts to win. Kept between calls so a
/// worker does not reallocate per line.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    v: Vec<usize>,
    z: Vec<f64>,
}

/// Squared-distance transform of `f` into `out` (same length)
///
/// `delta` must be strictly positive.
pub fn transform_line(f: &[f32], delta: f32, out: &mut [f32], env: &mut Envelope) {
    let n = f.len();
    debug_assert_eq!(out.len(), n);
    debug_assert!(delta > 0.0, "spacing must be positive");

    match n {
        0 => return,
        1 => {
            out[0] = f[0];
            return;
        }
        _ => {}
    }

    let delta = delta as f64;
    let pos = |i: usize| i as f64 * delta;
    // parabola height at its own vertex plus the vertex offset term
    let lifted = |i: usize| f[i] as f64 + pos(i) * pos(i);

    env.v.clear();
    env.v.resize(n, 0);
    env.z.clear();
    env.z.resize(n + 1, 0.0);
    let (v, z) = (&mut env.v, &mut env.z);

    let mut k = 0usize;
    v[0] = 0;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;

    for q in 1..n {
        let lifted_q = lifted(q);
        let intersect = |p: usize| (lifted_q - lifted(p)) / (2.0 * (pos(q) - pos(p)));

        let mut s = intersect(v[k]);
        while k > 0 && s <= z[k] {
            k -= 1;
            s = intersect(v[k]);
        }

        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, d) in out.iter_mut().enumerate() {
        let x = pos(q);
        while z[k + 1] < x {
            k += 1;
        }
        let dx = x - pos(v[k]);
        *d = (dx * dx + f[v[k]] as f64) as f32;
    }
}

/// Allocating form of [`transform_line`]
pub fn squared_edt_1d(f: &[f32], delta: f32) -> Vec<f32> {
    let mut out = vec![0.0f32; f.len()];
    transform_line(f, delta, &mut out, &mut Envelope::default());
    out
}
