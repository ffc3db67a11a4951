// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LiDAR-Lite Processing
//!
//! The LAS import pipeline shared by the CLI and embedding hosts:
//! classification filter and unit conversion, optional thinning, surface
//! triangulation and batched emission, all inside one host operation.
//!
//! ```rust,ignore
//! use lidar_lite_geometry::MemoryScene;
//! use lidar_lite_processing::{FixedPrompt, ImportOptions, Importer, PipelineConfig, TracingProgress};
//!
//! let importer = Importer::new(PipelineConfig::from_env())?;
//! let mut scene = MemoryScene::new();
//! let mut prompt = FixedPrompt::new(ImportOptions::default());
//! let mut progress = TracingProgress::new(importer.config().progress_interval());
//! let outcome = importer.import_las_file("site.las", &mut prompt, &mut scene, &mut progress)?;
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod import;
pub mod options;
pub mod progress;
pub mod prompt;
pub mod report;

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use filter::{filter_records, log_classification_counts, FilteredPoints};
pub use import::Importer;
pub use options::{ImportOptions, ImportType, SelectionOptions, ThinOption};
pub use progress::TracingProgress;
pub use prompt::{FixedPrompt, ImportPrompt};
pub use report::{ImportOutcome, ImportReport};

/// Importer registration details
pub const IMPORTER_ID: &str = "LiDARLite::LasImporter";
pub const IMPORTER_DESCRIPTION: &str = "Lidar las Importer (*.las)";
pub const IMPORTER_EXTENSION: &str = "las";
pub const IMPORTER_VERSION: &str = env!("CARGO_PKG_VERSION");
