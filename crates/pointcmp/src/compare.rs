//! Set relationship between two point sequences.
//!
//! Purpose
//! - Classify two `PointSequence`s as `Equal`, `ASubsetOfB`, `BSubsetOfA` or
//!   `NotEqual`, treating each as the set of its unique points.
//!
//! Model
//! - Each side is sorted by `point_less` and consecutive `point_eq` runs are
//!   collapsed (`UniquePoints`). Equality is a pairwise scan; containment is a
//!   merge over both sorted sequences in O(n + m), guarded by a strict size
//!   inequality so equal-size different sets always land in `NotEqual`.
//! - `compare` is total: no error channel, no panics, NaN included.
//!
//! Strategies
//! - `SortMerge` is the default implementation. `TreeSet` builds ordered sets
//!   of `TotalPoint` keys instead; it exists to benchmark against and must
//!   agree with `SortMerge` on every input.

use std::collections::BTreeSet;
use std::fmt;

use crate::order::{point_cmp, point_eq, point_less, Point, TotalPoint};

/// Outcome of comparing set A against set B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relationship {
    Equal,
    ASubsetOfB,
    BSubsetOfA,
    NotEqual,
}

impl Relationship {
    pub const ALL: [Relationship; 4] = [
        Relationship::Equal,
        Relationship::ASubsetOfB,
        Relationship::BSubsetOfA,
        Relationship::NotEqual,
    ];

    /// The relationship seen with A and B swapped.
    #[inline]
    pub fn flip(self) -> Relationship {
        match self {
            Relationship::ASubsetOfB => Relationship::BSubsetOfA,
            Relationship::BSubsetOfA => Relationship::ASubsetOfB,
            other => other,
        }
    }

    /// Stable identifier, used in machine-readable output.
    pub fn name(self) -> &'static str {
        match self {
            Relationship::Equal => "Equal",
            Relationship::ASubsetOfB => "ASubsetOfB",
            Relationship::BSubsetOfA => "BSubsetOfA",
            Relationship::NotEqual => "NotEqual",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Relationship::Equal => "sets are equal",
            Relationship::ASubsetOfB => "A is a subset of B",
            Relationship::BSubsetOfA => "B is a subset of A",
            Relationship::NotEqual => "sets are not equal",
        };
        f.write_str(s)
    }
}

/// Sorted, duplicate-free view of a point sequence.
///
/// Invariant: strictly increasing under `point_less` (no two `point_eq` entries).
#[derive(Clone, Debug, Default)]
pub(crate) struct UniquePoints {
    pts: Vec<Point>,
}

impl UniquePoints {
    pub(crate) fn from_points(points: &[Point]) -> Self {
        let mut pts = points.to_vec();
        pts.sort_by(point_cmp);
        pts.dedup_by(|later, kept| point_eq(later, kept));
        Self { pts }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.pts.len()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[Point] {
        &self.pts
    }
}

/// Number of distinct points in `points` under `point_eq`.
pub fn unique_count(points: &[Point]) -> usize {
    UniquePoints::from_points(points).len()
}

/// Classify the relationship between the unique points of `a` and `b`.
pub fn compare(a: &[Point], b: &[Point]) -> Relationship {
    let ua = UniquePoints::from_points(a);
    let ub = UniquePoints::from_points(b);
    tracing::trace!(unique_a = ua.len(), unique_b = ub.len(), "unique sets built");
    classify(ua.as_slice(), ub.as_slice())
}

/// Decision over two sorted, duplicate-free sequences.
fn classify(ua: &[Point], ub: &[Point]) -> Relationship {
    classify_iter(ua.len(), ua.iter(), ub.len(), ub.iter())
}

fn classify_iter<'a, I, J>(len_a: usize, a: I, len_b: usize, b: J) -> Relationship
where
    I: Iterator<Item = &'a Point> + Clone,
    J: Iterator<Item = &'a Point> + Clone,
{
    if len_a == len_b && a.clone().zip(b.clone()).all(|(p, q)| point_eq(p, q)) {
        return Relationship::Equal;
    }
    if len_a > len_b && includes(a.clone(), b.clone()) {
        return Relationship::BSubsetOfA;
    }
    if len_b > len_a && includes(b, a) {
        return Relationship::ASubsetOfB;
    }
    Relationship::NotEqual
}

/// Whether every element of sorted `sub` occurs in sorted `sup` (both duplicate-free).
///
/// Single forward merge: advance `sup` past smaller elements, fail on a gap.
fn includes<'a, I, J>(sup: I, sub: J) -> bool
where
    I: Iterator<Item = &'a Point>,
    J: Iterator<Item = &'a Point>,
{
    let mut sup = sup.peekable();
    for q in sub {
        loop {
            match sup.peek() {
                None => return false,
                Some(p) if point_less(p, q) => {
                    sup.next();
                }
                Some(p) if point_eq(p, q) => {
                    sup.next();
                    break;
                }
                Some(_) => return false,
            }
        }
    }
    true
}

/// A swappable comparison algorithm. All implementations must agree with `compare`.
pub trait SetComparator {
    fn compare(&self, a: &[Point], b: &[Point]) -> Relationship;
    fn name(&self) -> &'static str;
}

/// Sort + dedup + merge (the default).
#[derive(Clone, Copy, Debug, Default)]
pub struct SortMerge;

impl SetComparator for SortMerge {
    fn compare(&self, a: &[Point], b: &[Point]) -> Relationship {
        compare(a, b)
    }
    fn name(&self) -> &'static str {
        "sort-merge"
    }
}

/// Ordered-set insertion (`BTreeSet<TotalPoint>`), then the same decision.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeSet;

impl SetComparator for TreeSet {
    fn compare(&self, a: &[Point], b: &[Point]) -> Relationship {
        let sa: BTreeSet<TotalPoint> = a.iter().copied().map(TotalPoint).collect();
        let sb: BTreeSet<TotalPoint> = b.iter().copied().map(TotalPoint).collect();
        classify_iter(
            sa.len(),
            sa.iter().map(|k| &k.0),
            sb.len(),
            sb.iter().map(|k| &k.0),
        )
    }
    fn name(&self) -> &'static str {
        "tree-set"
    }
}

/// Comparator selection, fixed once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    #[default]
    SortMerge,
    TreeSet,
}

impl Strategy {
    pub fn comparator(self) -> Box<dyn SetComparator + Send + Sync> {
        match self {
            Strategy::SortMerge => Box::new(SortMerge),
            Strategy::TreeSet => Box::new(TreeSet),
        }
    }
}
