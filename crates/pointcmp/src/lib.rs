//! Set relationship between two collections of 2D points.
//!
//! Layout
//! - `order`: NaN-aware total order over `f64` coordinates and points.
//! - `compare`: dedup + classify into `Relationship` (plus comparator strategies).
//! - `input`: text parsing for file-pair and blank-line-terminated stream input.
//! - `sample`: seeded random point sequences for benches and tests.
//!
//! API Policy
//! - `compare` is total: any two point slices yield a `Relationship`.
//! - Parsing is the only fallible surface (`input::InputError`).

pub mod api;
pub mod compare;
pub mod input;
pub mod order;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use compare::{compare, Relationship};
pub use order::Point;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::compare::{compare, unique_count, Relationship, SetComparator, Strategy};
    pub use crate::input::{read_points, read_points_file, read_points_until_blank, InputError};
    pub use crate::order::{point_eq, point_less, Point};
}
