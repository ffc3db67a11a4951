// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LiDAR-Lite Geometry Processing
//!
//! Turns a filtered point set into host geometry: thinning, deduplication,
//! Delaunay triangulation over the XY projection (via delaunator), and
//! batched emission to a transactional [`SceneSink`].

pub mod dedup;
pub mod emit;
pub mod error;
pub mod mesh;
pub mod scene;
pub mod thin;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3};

pub use dedup::{dedup_points, position_key};
pub use emit::{EmitStats, MeshEmitter, DEFAULT_BATCH_SIZE};
pub use error::{Error, Result, SinkError};
pub use mesh::{MeshBatch, Winding};
pub use scene::{GroupId, MemoryScene, SceneCalls, SceneGroup, SceneSink};
pub use thin::{sampling_step, thin_points, thinned_len};
pub use triangulation::{
    project_to_xy, triangulate_surface, validate_triangles, DelaunayTriangulator,
    SurfaceTriangulation, Triangulator,
};
