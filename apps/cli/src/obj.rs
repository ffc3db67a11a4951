// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ output for committed scene groups.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use lidar_lite_geometry::MemoryScene;

use crate::error::CliError;

/// Counts of what was written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjStats {
    pub vertices: usize,
    pub faces: usize,
    pub points: usize,
}

/// Write every committed group. Faces and construction points share one
/// 1-based vertex list; construction points become `p` elements.
pub fn write_obj<W: Write>(scene: &MemoryScene, mut out: W) -> io::Result<ObjStats> {
    let mut stats = ObjStats::default();
    writeln!(out, "# {}", lidar_lite_processing::IMPORTER_DESCRIPTION)?;

    for group in scene.groups() {
        writeln!(out, "g {}", group.name)?;

        let base = stats.vertices + 1;
        for v in &group.vertices {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }
        stats.vertices += group.vertices.len();

        for [a, b, c] in &group.faces {
            writeln!(out, "f {} {} {}", base + a, base + b, base + c)?;
        }
        stats.faces += group.faces.len();

        for p in &group.construction_points {
            writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
            stats.vertices += 1;
            writeln!(out, "p {}", stats.vertices)?;
        }
        stats.points += group.construction_points.len();
    }

    out.flush()?;
    Ok(stats)
}

pub fn write_obj_file(scene: &MemoryScene, path: &Path) -> Result<ObjStats, CliError> {
    let to_error = |source| CliError::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    write_obj(scene, BufWriter::new(file)).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidar_lite_geometry::{MeshBatch, Point3, SceneSink};

    #[test]
    fn test_faces_are_one_based() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(12.0, 0.0, 0.0),
            Point3::new(0.0, 12.0, 6.0),
        ];
        let mut scene = MemoryScene::new();
        scene.begin_operation("import").unwrap();
        let group = scene.add_group("LAS_import").unwrap();
        let mut batch = MeshBatch::new(&points, 1);
        batch.add_triangle(2, 1, 0);
        scene.add_faces_from_mesh(group, &batch).unwrap();
        scene.commit_operation().unwrap();

        let mut out = Vec::new();
        let stats = write_obj(&scene, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(stats, ObjStats { vertices: 3, faces: 1, points: 0 });
        assert!(text.contains("g LAS_import\n"));
        assert!(text.contains("v 0 12 6\n"));
        assert!(text.contains("f 1 2 3\n"));
    }

    #[test]
    fn test_construction_points() {
        let mut scene = MemoryScene::new();
        scene.begin_operation("import").unwrap();
        let group = scene.add_group("LAS_import").unwrap();
        scene
            .add_construction_point(group, Point3::new(1.5, 2.0, 3.0))
            .unwrap();
        scene
            .add_construction_point(group, Point3::new(4.0, 5.0, 6.0))
            .unwrap();
        scene.commit_operation().unwrap();

        let mut out = Vec::new();
        let stats = write_obj(&scene, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(stats.points, 2);
        assert!(text.contains("v 1.5 2 3\np 1\n"));
        assert!(text.contains("v 4 5 6\np 2\n"));
    }

    #[test]
    fn test_uncommitted_changes_are_not_written() {
        let mut scene = MemoryScene::new();
        scene.begin_operation("import").unwrap();
        scene.add_group("LAS_import").unwrap();

        let mut out = Vec::new();
        let stats = write_obj(&scene, &mut out).unwrap();
        assert_eq!(stats, ObjStats::default());
    }
}
