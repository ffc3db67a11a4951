// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface triangulation
//!
//! Wrapper around delaunator for 2.5D point-set triangulation: points are
//! deduplicated, projected onto XY, triangulated in the plane, and keep their
//! Z as surface elevation.

use lidar_lite_core::{Progress, Stage};
use nalgebra::{Point2, Point3};

use crate::dedup::dedup_points;
use crate::error::{Error, Result};

/// Planar triangulation of a 2D point set.
///
/// Returns a flat list of vertex indices, three per triangle, referencing
/// `coords`. An empty list means no triangulation exists (fewer than three
/// points, or all collinear).
pub trait Triangulator {
    fn triangulate(&self, coords: &[Point2<f64>], progress: &mut dyn Progress) -> Vec<usize>;
}

/// Delaunay triangulation via the delaunator crate
#[derive(Debug, Default, Clone, Copy)]
pub struct DelaunayTriangulator;

impl Triangulator for DelaunayTriangulator {
    fn triangulate(&self, coords: &[Point2<f64>], progress: &mut dyn Progress) -> Vec<usize> {
        let points: Vec<delaunator::Point> = coords
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();

        progress.set_sub_progress(0.0, "Triangulating Faces, Please wait");
        let triangulation = delaunator::triangulate(&points);
        progress.set_sub_progress(100.0, "Triangulating Faces, Done");

        triangulation.triangles
    }
}

/// Deduplicated points plus the triangles built over them
#[derive(Debug, Clone, Default)]
pub struct SurfaceTriangulation {
    pub points: Vec<Point3<f64>>,
    pub triangles: Vec<usize>,
}

impl SurfaceTriangulation {
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// True when no surface could be produced
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Project 3D points onto the XY plane, index for index
#[inline]
pub fn project_to_xy(points: &[Point3<f64>]) -> Vec<Point2<f64>> {
    points.iter().map(|p| Point2::new(p.x, p.y)).collect()
}

/// Check a triangle list against the number of points it references
pub fn validate_triangles(triangles: &[usize], point_count: usize) -> Result<()> {
    if triangles.len() % 3 != 0 {
        return Err(Error::InvalidTriangulation(format!(
            "index list length {} is not a multiple of 3",
            triangles.len()
        )));
    }
    if let Some((position, &index)) = triangles
        .iter()
        .enumerate()
        .find(|&(_, &index)| index >= point_count)
    {
        return Err(Error::InvalidTriangulation(format!(
            "index {} at position {} is out of range for {} points",
            index, position, point_count
        )));
    }
    Ok(())
}

/// Triangulate a point set as a surface.
///
/// The input is deduplicated first; the returned points supersede it and the
/// triangle indices reference them.
pub fn triangulate_surface(
    points: Vec<Point3<f64>>,
    triangulator: &dyn Triangulator,
    progress: &mut dyn Progress,
) -> Result<SurfaceTriangulation> {
    progress.set_stage(Stage::Triangulating, "Total Progress");
    progress.set_sub_progress(0.0, "Triangulating Faces, Please wait");

    let input_len = points.len();
    let points = dedup_points(points);
    if points.len() != input_len {
        tracing::debug!(
            removed = input_len - points.len(),
            remaining = points.len(),
            "Removed duplicate points"
        );
    }

    if points.len() < 3 {
        tracing::debug!(points = points.len(), "Too few distinct points to triangulate");
        return Ok(SurfaceTriangulation {
            points,
            triangles: Vec::new(),
        });
    }

    let coords = project_to_xy(&points);
    let triangles = triangulator.triangulate(&coords, progress);
    validate_triangles(&triangles, points.len())?;

    tracing::debug!(
        points = points.len(),
        triangles = triangles.len() / 3,
        "Triangulation complete"
    );

    Ok(SurfaceTriangulation { points, triangles })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidar_lite_core::NullProgress;
    use std::cell::Cell;

    struct FixedTriangulator {
        result: Vec<usize>,
        calls: Cell<usize>,
    }

    impl FixedTriangulator {
        fn new(result: Vec<usize>) -> Self {
            Self {
                result,
                calls: Cell::new(0),
            }
        }
    }

    impl Triangulator for FixedTriangulator {
        fn triangulate(&self, _coords: &[Point2<f64>], _progress: &mut dyn Progress) -> Vec<usize> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    fn square() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(10.0, 0.0, 2.0),
            Point3::new(10.0, 10.0, 3.0),
            Point3::new(0.0, 10.0, 4.0),
        ]
    }

    #[test]
    fn test_triangulate_square() {
        let surface =
            triangulate_surface(square(), &DelaunayTriangulator, &mut NullProgress).unwrap();

        // Square should be split into 2 triangles = 6 indices
        assert_eq!(surface.triangles.len(), 6);
        assert_eq!(surface.triangle_count(), 2);
        assert!(surface.triangles.iter().all(|&i| i < surface.points.len()));
    }

    #[test]
    fn test_elevation_is_carried_through() {
        let surface =
            triangulate_surface(square(), &DelaunayTriangulator, &mut NullProgress).unwrap();
        let zs: Vec<f64> = surface.points.iter().map(|p| p.z).collect();
        assert_eq!(zs, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_duplicates_removed_before_triangulating() {
        let mut points = square();
        points.push(Point3::new(10.0, 10.0, 3.0));
        points.insert(0, Point3::new(0.0, 10.0, 4.0));

        let surface =
            triangulate_surface(points, &DelaunayTriangulator, &mut NullProgress).unwrap();
        assert_eq!(surface.points.len(), 4);
        assert!(surface.triangles.iter().all(|&i| i < 4));
    }

    #[test]
    fn test_collinear_points_give_empty_surface() {
        let points: Vec<Point3<f64>> = (0..5).map(|i| Point3::new(i as f64, i as f64, 0.0)).collect();
        let surface =
            triangulate_surface(points, &DelaunayTriangulator, &mut NullProgress).unwrap();
        assert!(surface.is_empty());
        assert_eq!(surface.points.len(), 5);
    }

    #[test]
    fn test_too_few_points_skip_triangulator() {
        let triangulator = FixedTriangulator::new(vec![0, 1, 2]);
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];
        let surface = triangulate_surface(points, &triangulator, &mut NullProgress).unwrap();
        assert!(surface.is_empty());
        assert_eq!(triangulator.calls.get(), 0);
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let triangulator = FixedTriangulator::new(vec![0, 1, 4]);
        let result = triangulate_surface(square(), &triangulator, &mut NullProgress);
        assert!(matches!(result, Err(Error::InvalidTriangulation(_))));
    }

    #[test]
    fn test_ragged_index_list_is_rejected() {
        assert!(validate_triangles(&[0, 1], 3).is_err());
        assert!(validate_triangles(&[0, 1, 2], 3).is_ok());
        assert!(validate_triangles(&[], 0).is_ok());
    }

    #[test]
    fn test_project_to_xy() {
        let projected = project_to_xy(&square());
        assert_eq!(projected.len(), 4);
        assert_eq!(projected[2], Point2::new(10.0, 10.0));
    }
}
