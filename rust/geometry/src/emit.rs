// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batched emission to the host scene
//!
//! Triangles go out in chunks of at most `batch_size`. Every chunk carries
//! the full point buffer so indices stay global across chunks.

use lidar_lite_core::{Progress, Stage};
use nalgebra::Point3;

use crate::error::{Error, Result};
use crate::mesh::{MeshBatch, Winding};
use crate::scene::{GroupId, SceneSink};

/// Default number of triangles per host call
pub const DEFAULT_BATCH_SIZE: usize = 2000;

/// What an emission pass sent to the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    /// Number of host calls made
    pub calls: usize,
    pub triangles: usize,
    pub points: usize,
}

/// Sends points and triangles to a [`SceneSink`]
#[derive(Debug, Clone, Copy)]
pub struct MeshEmitter {
    batch_size: usize,
    winding: Winding,
}

impl Default for MeshEmitter {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            winding: Winding::default(),
        }
    }
}

impl MeshEmitter {
    pub fn new(batch_size: usize, winding: Winding) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::InvalidBatchSize(batch_size));
        }
        Ok(Self {
            batch_size,
            winding,
        })
    }

    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    #[inline]
    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Number of host calls needed for `triangle_count` triangles
    #[inline]
    pub fn batch_count(&self, triangle_count: usize) -> usize {
        triangle_count.div_ceil(self.batch_size)
    }

    /// Emit a triangulated surface in batches.
    ///
    /// `triangles` must be a flat list of index triples into `points`. A
    /// rejected batch stops emission and the sink's error is returned.
    pub fn emit_surface<S: SceneSink + ?Sized>(
        &self,
        sink: &mut S,
        group: GroupId,
        points: &[Point3<f64>],
        triangles: &[usize],
        progress: &mut dyn Progress,
    ) -> Result<EmitStats> {
        progress.set_stage(Stage::AddingFaces, "Total Progress");

        let total = triangles.len() / 3;
        let mut stats = EmitStats::default();
        if total == 0 {
            progress.set_sub_progress(100.0, "Adding Faces, nothing to add");
            return Ok(stats);
        }

        for chunk in triangles.chunks(self.batch_size * 3) {
            let mut batch = MeshBatch::new(points, chunk.len() / 3);
            for tri in chunk.chunks_exact(3) {
                let [a, b, c] = self.winding.apply([tri[0], tri[1], tri[2]]);
                batch.add_triangle(a, b, c);
            }

            sink.add_faces_from_mesh(group, &batch)?;
            stats.calls += 1;
            stats.triangles += batch.triangle_count();

            let percent = stats.triangles as f64 * 100.0 / total as f64;
            progress.set_sub_progress(
                percent,
                &format!("Adding Faces, Remaining faces: {}", total - stats.triangles),
            );
        }

        tracing::debug!(
            calls = stats.calls,
            triangles = stats.triangles,
            batch_size = self.batch_size,
            "Emitted surface"
        );
        Ok(stats)
    }

    /// Emit every point as a construction point
    pub fn emit_points<S: SceneSink + ?Sized>(
        &self,
        sink: &mut S,
        group: GroupId,
        points: &[Point3<f64>],
        progress: &mut dyn Progress,
    ) -> Result<EmitStats> {
        progress.set_stage(Stage::AddingPoints, "Total Progress");

        let total = points.len();
        let mut stats = EmitStats::default();
        for (i, point) in points.iter().enumerate() {
            sink.add_construction_point(group, *point)?;
            stats.calls += 1;
            stats.points += 1;

            if progress.should_render() {
                let done = i + 1;
                progress.set_sub_progress(
                    done as f64 * 100.0 / total as f64,
                    &format!("Adding Points, Remaining points: {}", total - done),
                );
            }
        }
        progress.set_sub_progress(100.0, "Adding Points, Done");

        tracing::debug!(points = stats.points, "Emitted construction points");
        Ok(stats)
    }
}
