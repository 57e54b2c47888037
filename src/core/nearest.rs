use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::geometry::{ChartPoint, Geometry};

/// Returns the geometry point horizontally closest to `pixel_x`.
///
/// Coordinates left of the first point (including NaN) resolve to the first
/// point and coordinates right of the last point resolve to the last one.
/// Between points a narrowing binary search finds the bracketing pair; an
/// exact tie between the pair resolves to the left point.
#[must_use]
pub fn nearest_point(geometry: &Geometry, pixel_x: f64) -> &ChartPoint {
    let points = geometry.points();
    nearest_in_sorted(points, pixel_x).unwrap_or(&points[0])
}

/// Slice-level form of [`nearest_point`].
///
/// `points` must be sorted by non-decreasing `x`. Returns `None` only for an
/// empty slice.
#[must_use]
pub fn nearest_in_sorted(points: &[ChartPoint], pixel_x: f64) -> Option<&ChartPoint> {
    let first = points.first()?;
    let last = points.last()?;
    if pixel_x.is_nan() || pixel_x <= first.x {
        return Some(first);
    }
    if pixel_x >= last.x {
        return Some(last);
    }

    // points[lo].x <= pixel_x < points[hi].x
    let mut lo = 0_usize;
    let mut hi = points.len() - 1;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if points[mid].x <= pixel_x {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let candidates: SmallVec<[(OrderedFloat<f64>, &ChartPoint); 2]> = [&points[lo], &points[hi]]
        .into_iter()
        .map(|point| (OrderedFloat((point.x - pixel_x).abs()), point))
        .collect();

    // `min_by_key` keeps the first of equal minima, which is the left point.
    candidates
        .into_iter()
        .min_by_key(|item| item.0)
        .map(|(_, point)| point)
}
