//! Total order over `f64` coordinates and 2D points (NaN-aware).
//!
//! Purpose
//! - Supply `coord_eq`/`coord_less` over coordinates and lift them to points,
//!   such that `less` is a strict total order compatible with `eq`.
//! - IEEE `<` leaves NaN unordered, which breaks sorting and dedup. Here NaN
//!   is split into two self-equal values by sign bit, both below `-inf`:
//!   `-NaN < +NaN < -inf < ... < +inf`. Payload bits are ignored.
//!
//! Point order is lexicographic on `(x, y)`.
//!
//! `Point` intentionally has no `PartialEq`/`Ord`: callers pick the predicate
//! explicitly, and `TotalPoint` is the opt-in key for ordered containers.

use std::cmp::Ordering;

/// A point in the plane. Coordinates may be any `f64`, NaN and infinities included.
#[derive(Clone, Copy, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Coordinate equality: IEEE `==` for numbers, sign-bit match for two NaNs.
#[inline]
pub fn coord_eq(a: f64, b: f64) -> bool {
    if a.is_nan() {
        return b.is_nan() && a.is_sign_negative() == b.is_sign_negative();
    }
    a == b
}

/// Strict coordinate order: `-NaN < +NaN <` every non-NaN value, IEEE `<` otherwise.
#[inline]
pub fn coord_less(a: f64, b: f64) -> bool {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => a.is_sign_negative() && !b.is_sign_negative(),
        (true, false) => true,
        (false, true) => false,
        (false, false) => a < b,
    }
}

/// Three-way form of `coord_less`/`coord_eq`, for `sort_by` and friends.
#[inline]
pub fn coord_cmp(a: f64, b: f64) -> Ordering {
    if coord_less(a, b) {
        Ordering::Less
    } else if coord_less(b, a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

#[inline]
pub fn point_eq(p: &Point, q: &Point) -> bool {
    coord_eq(p.x, q.x) && coord_eq(p.y, q.y)
}

/// Lexicographic: x decides unless the x coordinates are equal.
#[inline]
pub fn point_less(p: &Point, q: &Point) -> bool {
    if coord_eq(p.x, q.x) {
        coord_less(p.y, q.y)
    } else {
        coord_less(p.x, q.x)
    }
}

#[inline]
pub fn point_cmp(p: &Point, q: &Point) -> Ordering {
    coord_cmp(p.x, q.x).then_with(|| coord_cmp(p.y, q.y))
}

/// Ordered-container key for `Point` using `point_eq`/`point_cmp`.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct TotalPoint(pub Point);

impl PartialEq for TotalPoint {
    fn eq(&self, other: &Self) -> bool {
        point_eq(&self.0, &other.0)
    }
}

impl Eq for TotalPoint {}

impl PartialOrd for TotalPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        point_cmp(&self.0, &other.0)
    }
}

impl From<Point> for TotalPoint {
    fn from(p: Point) -> Self {
        TotalPoint(p)
    }
}
