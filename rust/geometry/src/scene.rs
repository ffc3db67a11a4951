// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host scene interface
//!
//! [`SceneSink`] is what the importer writes to. All changes happen inside a
//! begin/commit/abort bracket; [`MemoryScene`] is an in-memory host that
//! honours the bracket and welds vertices the way a modelling host would.

use nalgebra::Point3;
use rustc_hash::FxHashMap;

use crate::dedup::position_key;
use crate::error::{Error, Result};
use crate::mesh::MeshBatch;

/// Handle of a group created in the scene
pub type GroupId = usize;

/// Geometry sink provided by the host application
pub trait SceneSink {
    /// Open the transactional bracket around one import
    fn begin_operation(&mut self, name: &str) -> Result<()>;

    /// Make every change since `begin_operation` visible
    fn commit_operation(&mut self) -> Result<()>;

    /// Discard every change since `begin_operation`
    fn abort_operation(&mut self);

    /// Add a named group/container
    fn add_group(&mut self, name: &str) -> Result<GroupId>;

    /// Add one construction point to a group
    fn add_construction_point(&mut self, group: GroupId, point: Point3<f64>) -> Result<()>;

    /// Add the triangles of a batch as faces of a group
    fn add_faces_from_mesh(&mut self, group: GroupId, mesh: &MeshBatch<'_>) -> Result<()>;

    /// Whether a group ended up with no geometry
    fn is_group_empty(&self, group: GroupId) -> bool;
}

/// A group stored by [`MemoryScene`]
#[derive(Debug, Clone, Default)]
pub struct SceneGroup {
    pub name: String,
    pub construction_points: Vec<Point3<f64>>,
    /// Welded face vertices
    pub vertices: Vec<Point3<f64>>,
    /// Faces as indices into `vertices`
    pub faces: Vec<[usize; 3]>,
    vertex_lookup: FxHashMap<[u64; 3], usize>,
}

impl SceneGroup {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.construction_points.is_empty() && self.faces.is_empty()
    }

    fn weld(&mut self, point: &Point3<f64>) -> usize {
        let next = self.vertices.len();
        let index = *self.vertex_lookup.entry(position_key(point)).or_insert(next);
        if index == next {
            self.vertices.push(*point);
        }
        index
    }
}

/// Counters of calls made against a [`MemoryScene`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneCalls {
    pub begin: usize,
    pub commit: usize,
    pub abort: usize,
    pub construction_points: usize,
    pub meshes: usize,
}

/// In-memory scene with transactional staging
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    committed: Vec<SceneGroup>,
    staged: Option<Vec<SceneGroup>>,
    max_faces_per_call: Option<usize>,
    calls: SceneCalls,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any single mesh call carrying more than `limit` triangles
    pub fn with_face_limit(mut self, limit: usize) -> Self {
        self.max_faces_per_call = Some(limit);
        self
    }

    /// Groups visible after the last commit
    pub fn groups(&self) -> &[SceneGroup] {
        &self.committed
    }

    pub fn calls(&self) -> SceneCalls {
        self.calls
    }

    /// Whether a begin/commit bracket is currently open
    pub fn in_operation(&self) -> bool {
        self.staged.is_some()
    }

    fn staged_group(&mut self, group: GroupId) -> Result<&mut SceneGroup> {
        let staged = self.staged.as_mut().ok_or(Error::NoActiveOperation)?;
        staged.get_mut(group).ok_or(Error::UnknownGroup(group))
    }
}

impl SceneSink for MemoryScene {
    fn begin_operation(&mut self, name: &str) -> Result<()> {
        if self.staged.is_some() {
            return Err(Error::sink(format!(
                "cannot start '{}': an operation is already open",
                name
            )));
        }
        self.calls.begin += 1;
        self.staged = Some(self.committed.clone());
        Ok(())
    }

    fn commit_operation(&mut self) -> Result<()> {
        let staged = self.staged.take().ok_or(Error::NoActiveOperation)?;
        self.calls.commit += 1;
        self.committed = staged;
        Ok(())
    }

    fn abort_operation(&mut self) {
        self.calls.abort += 1;
        self.staged = None;
    }

    fn add_group(&mut self, name: &str) -> Result<GroupId> {
        let staged = self.staged.as_mut().ok_or(Error::NoActiveOperation)?;
        staged.push(SceneGroup::new(name));
        Ok(staged.len() - 1)
    }

    fn add_construction_point(&mut self, group: GroupId, point: Point3<f64>) -> Result<()> {
        self.staged_group(group)?.construction_points.push(point);
        self.calls.construction_points += 1;
        Ok(())
    }

    fn add_faces_from_mesh(&mut self, group: GroupId, mesh: &MeshBatch<'_>) -> Result<()> {
        if let Some(limit) = self.max_faces_per_call {
            if mesh.triangle_count() > limit {
                return Err(Error::sink(format!(
                    "mesh of {} faces exceeds the limit of {} per call",
                    mesh.triangle_count(),
                    limit
                )));
            }
        }

        let points = mesh.points();
        if let Some(bad) = mesh.indices().iter().find(|&&i| i >= points.len()) {
            return Err(Error::sink(format!(
                "face index {} outside of {} mesh points",
                bad,
                points.len()
            )));
        }

        let target = self.staged_group(group)?;
        for [a, b, c] in mesh.triangles() {
            let face = [
                target.weld(&points[a]),
                target.weld(&points[b]),
                target.weld(&points[c]),
            ];
            target.faces.push(face);
        }
        self.calls.meshes += 1;
        Ok(())
    }

    fn is_group_empty(&self, group: GroupId) -> bool {
        let groups = self.staged.as_ref().unwrap_or(&self.committed);
        groups.get(group).map_or(true, SceneGroup::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_points() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_commit_makes_changes_visible() {
        let mut scene = MemoryScene::new();
        scene.begin_operation("import").unwrap();
        let group = scene.add_group("LAS_import").unwrap();
        scene
            .add_construction_point(group, Point3::new(1.0, 2.0, 3.0))
            .unwrap();
        assert!(scene.groups().is_empty());
        assert!(!scene.is_group_empty(group));

        scene.commit_operation().unwrap();
        assert_eq!(scene.groups().len(), 1);
        assert_eq!(scene.groups()[0].name, "LAS_import");
        assert_eq!(scene.groups()[0].construction_points.len(), 1);
        assert!(!scene.in_operation());
    }

    #[test]
    fn test_abort_discards_changes() {
        let mut scene = MemoryScene::new();
        scene.begin_operation("import").unwrap();
        let group = scene.add_group("LAS_import").unwrap();
        scene
            .add_construction_point(group, Point3::new(1.0, 2.0, 3.0))
            .unwrap();
        scene.abort_operation();

        assert!(scene.groups().is_empty());
        assert_eq!(scene.calls().abort, 1);
        assert!(scene.add_group("late").is_err());
    }

    #[test]
    fn test_mutation_outside_operation_fails() {
        let mut scene = MemoryScene::new();
        assert!(matches!(scene.add_group("g"), Err(Error::NoActiveOperation)));
        assert!(scene.commit_operation().is_err());
    }

    #[test]
    fn test_faces_weld_shared_vertices() {
        let points = triangle_points();
        let mut scene = MemoryScene::new();
        scene.begin_operation("import").unwrap();
        let group = scene.add_group("g").unwrap();

        let mut first = MeshBatch::new(&points, 1);
        first.add_triangle(0, 1, 2);
        let mut second = MeshBatch::new(&points, 1);
        second.add_triangle(1, 3, 2);
        scene.add_faces_from_mesh(group, &first).unwrap();
        scene.add_faces_from_mesh(group, &second).unwrap();
        scene.commit_operation().unwrap();

        let stored = &scene.groups()[0];
        assert_eq!(stored.faces.len(), 2);
        assert_eq!(stored.vertices.len(), 4);
        assert_eq!(scene.calls().meshes, 2);
    }

    #[test]
    fn test_face_limit_rejects_large_batches() {
        let points = triangle_points();
        let mut scene = MemoryScene::new().with_face_limit(1);
        scene.begin_operation("import").unwrap();
        let group = scene.add_group("g").unwrap();

        let mut batch = MeshBatch::new(&points, 2);
        batch.add_triangle(0, 1, 2);
        batch.add_triangle(1, 3, 2);
        assert!(matches!(
            scene.add_faces_from_mesh(group, &batch),
            Err(Error::Sink(_))
        ));
    }

    #[test]
    fn test_empty_group_detection() {
        let mut scene = MemoryScene::new();
        scene.begin_operation("import").unwrap();
        let group = scene.add_group("g").unwrap();
        scene.commit_operation().unwrap();
        assert!(scene.is_group_empty(group));
        assert!(scene.is_group_empty(42));
    }
}
