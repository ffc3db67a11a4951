// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exact-duplicate point removal

use nalgebra::Point3;
use rustc_hash::FxHashSet;

/// Hashable identity of a position. `-0.0` and `0.0` map to the same key.
#[inline]
pub fn position_key(p: &Point3<f64>) -> [u64; 3] {
    [
        (p.x + 0.0).to_bits(),
        (p.y + 0.0).to_bits(),
        (p.z + 0.0).to_bits(),
    ]
}

/// Remove points with identical x, y and z, keeping the first occurrence.
/// Relative order of the survivors is unchanged.
pub fn dedup_points(mut points: Vec<Point3<f64>>) -> Vec<Point3<f64>> {
    let mut seen: FxHashSet<[u64; 3]> = FxHashSet::default();
    seen.reserve(points.len());
    points.retain(|p| seen.insert(position_key(p)));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_exact_duplicates_in_order() {
        let points = vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(3.0, 3.0, 3.0),
            Point3::new(2.0, 2.0, 2.0),
        ];
        let unique = dedup_points(points);
        assert_eq!(
            unique,
            vec![
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(2.0, 2.0, 2.0),
                Point3::new(3.0, 3.0, 3.0),
            ]
        );
    }

    #[test]
    fn test_same_xy_different_z_is_kept() {
        let points = vec![Point3::new(1.0, 1.0, 1.0), Point3::new(1.0, 1.0, 2.0)];
        assert_eq!(dedup_points(points).len(), 2);
    }

    #[test]
    fn test_signed_zero_is_one_position() {
        let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(-0.0, 0.0, -0.0)];
        assert_eq!(dedup_points(points).len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let points: Vec<Point3<f64>> = (0..50)
            .map(|i| Point3::new((i % 7) as f64, (i % 3) as f64, 0.0))
            .collect();
        let once = dedup_points(points);
        let twice = dedup_points(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 21);
    }
}
