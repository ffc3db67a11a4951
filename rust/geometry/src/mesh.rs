// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use std::fmt;
use std::str::FromStr;

use nalgebra::Point3;

use crate::error::Error;

/// Vertex order applied to each triangle before it reaches the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winding {
    /// Keep the triangulator's order (a, b, c)
    Preserve,
    /// Emit (c, b, a); matches hosts whose front faces are the other way round
    #[default]
    Reversed,
}

impl Winding {
    #[inline]
    pub fn apply(self, triangle: [usize; 3]) -> [usize; 3] {
        match self {
            Winding::Preserve => triangle,
            Winding::Reversed => [triangle[2], triangle[1], triangle[0]],
        }
    }
}

impl fmt::Display for Winding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winding::Preserve => write!(f, "preserve"),
            Winding::Reversed => write!(f, "reversed"),
        }
    }
}

impl FromStr for Winding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" | "ccw" => Ok(Winding::Preserve),
            "reversed" | "reverse" | "cw" => Ok(Winding::Reversed),
            other => Err(Error::InvalidWinding(other.to_string())),
        }
    }
}

/// One host submission: the full point buffer plus a slice of triangles.
///
/// Indices are global positions in `points`, so consecutive batches over the
/// same buffer can be submitted independently.
#[derive(Debug, Clone)]
pub struct MeshBatch<'a> {
    points: &'a [Point3<f64>],
    /// Triangle indices (i0, i1, i2)
    indices: Vec<usize>,
}

impl<'a> MeshBatch<'a> {
    /// Create an empty batch over `points` with room for `triangle_capacity` triangles
    pub fn new(points: &'a [Point3<f64>], triangle_capacity: usize) -> Self {
        Self {
            points,
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: usize, i1: usize, i2: usize) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    #[inline]
    pub fn points(&self) -> &'a [Point3<f64>] {
        self.points
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if the batch has no triangles
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_creation() {
        let points = vec![Point3::origin(); 4];
        let batch = MeshBatch::new(&points, 10);
        assert!(batch.is_empty());
        assert_eq!(batch.vertex_count(), 4);
        assert_eq!(batch.triangle_count(), 0);
    }

    #[test]
    fn test_add_triangle() {
        let points = vec![Point3::origin(); 4];
        let mut batch = MeshBatch::new(&points, 2);
        batch.add_triangle(0, 1, 2);
        batch.add_triangle(2, 3, 0);
        assert_eq!(batch.triangle_count(), 2);
        assert_eq!(batch.indices(), &[0, 1, 2, 2, 3, 0]);
        assert_eq!(batch.triangles().last(), Some([2, 3, 0]));
    }

    #[test]
    fn test_winding() {
        assert_eq!(Winding::Preserve.apply([1, 2, 3]), [1, 2, 3]);
        assert_eq!(Winding::Reversed.apply([1, 2, 3]), [3, 2, 1]);
        assert_eq!(Winding::default(), Winding::Reversed);
        assert_eq!("CW".parse::<Winding>().unwrap(), Winding::Reversed);
        assert_eq!("preserve".parse::<Winding>().unwrap(), Winding::Preserve);
        assert!("sideways".parse::<Winding>().is_err());
    }
}
