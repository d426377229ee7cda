//! Curated surface for callers that want everything in one place.
//!
//! Grouped by concern; prefer these re-exports over deep module paths.

// Ordering
pub use crate::order::{
    coord_cmp, coord_eq, coord_less, point_cmp, point_eq, point_less, Point, TotalPoint,
};
// Comparison
pub use crate::compare::{
    compare, unique_count, Relationship, SetComparator, SortMerge, Strategy, TreeSet,
};
// Input
pub use crate::input::{
    parse_coord, read_points, read_points_file, read_points_until_blank, ErrorKind, InputError,
};
// Sampling
pub use crate::sample::{draw_points, draw_subset, ReplayToken as SampleReplay, SampleCfg};

/// Compare two point files (file-pair mode).
pub fn compare_files<P: AsRef<std::path::Path>, Q: AsRef<std::path::Path>>(
    a: P,
    b: Q,
) -> Result<Relationship, InputError> {
    let pa = read_points_file(a)?;
    let pb = read_points_file(b)?;
    Ok(compare(&pa, &pb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_files_missing_is_io_failure() {
        let err = compare_files("/nonexistent/a.txt", "/nonexistent/b.txt").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn reexports_are_consistent() {
        let p = Point::new(1.0, 2.0);
        assert!(point_eq(&p, &p));
        assert!(TotalPoint(p) == TotalPoint(p));
        assert_eq!(compare(&[p], &[p, p]), Relationship::Equal);
    }
}
