//! Seeded random point sequences (lattice points + duplicates + signed NaN).
//!
//! Purpose
//! - Deterministic inputs for benchmarks and tests. Draws are reproducible
//!   from a `ReplayToken` `(seed, index)` mixed into a single RNG.
//!
//! Model
//! - Coordinates come from an integer lattice `[-grid, grid]`, so distinct
//!   draws collide often; a fraction of points is re-emitted verbatim and a
//!   fraction gets a NaN coordinate of random sign.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::order::Point;

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SampleCfg {
    /// Number of points emitted (duplicates included).
    pub len: usize,
    /// Lattice half-width; coordinates are integers in `[-grid, grid]`.
    pub grid: i32,
    /// Probability that a point repeats an earlier one. Clamped to [0, 1].
    pub dup_frac: f64,
    /// Probability that a fresh point gets a NaN coordinate. Clamped to [0, 1].
    pub nan_frac: f64,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            len: 256,
            grid: 64,
            dup_frac: 0.2,
            nan_frac: 0.02,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// splitmix-style mix of (seed, index) into one RNG seed.
    pub fn rng(&self) -> StdRng {
        let mut z = self
            .seed
            .wrapping_add(self.index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        StdRng::seed_from_u64(z ^ (z >> 31))
    }
}

fn signed_nan<R: Rng>(rng: &mut R) -> f64 {
    if rng.gen::<bool>() {
        -f64::NAN.abs()
    } else {
        f64::NAN.abs()
    }
}

/// Draw a point sequence according to `cfg`.
pub fn draw_points(cfg: &SampleCfg, token: ReplayToken) -> Vec<Point> {
    let mut rng = token.rng();
    let grid = cfg.grid.max(0);
    let dup = cfg.dup_frac.clamp(0.0, 1.0);
    let nan = cfg.nan_frac.clamp(0.0, 1.0);
    let mut out: Vec<Point> = Vec::with_capacity(cfg.len);
    for _ in 0..cfg.len {
        if !out.is_empty() && rng.gen_bool(dup) {
            let i = rng.gen_range(0..out.len());
            out.push(out[i]);
            continue;
        }
        let mut p = Point::new(
            f64::from(rng.gen_range(-grid..=grid)),
            f64::from(rng.gen_range(-grid..=grid)),
        );
        if rng.gen_bool(nan) {
            if rng.gen::<bool>() {
                p.x = signed_nan(&mut rng);
            } else {
                p.y = signed_nan(&mut rng);
            }
        }
        out.push(p);
    }
    out
}

/// Keep each point of `points` with probability `keep_frac`, then shuffle.
pub fn draw_subset(points: &[Point], keep_frac: f64, token: ReplayToken) -> Vec<Point> {
    let mut rng = token.rng();
    let keep = keep_frac.clamp(0.0, 1.0);
    let mut out: Vec<Point> = points.iter().copied().filter(|_| rng.gen_bool(keep)).collect();
    out.shuffle(&mut rng);
    out
}
