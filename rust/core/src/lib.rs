// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # LiDAR-Lite Core
//!
//! Point records and their selection for the LiDAR-Lite import pipeline.
//!
//! ## Overview
//!
//! - **Records**: [`PointRecord`] and the lazy [`RecordSource`] stream
//! - **LAS input**: [`LasSource`] reads `.las` files through the [las](https://docs.rs/las) crate
//! - **Classification**: [`ClassificationMask`] selects point classes, [`ClassificationCounts`] tallies them
//! - **Units**: [`LinearUnit`] and per-axis [`UnitSettings`] convert coordinates to host inches
//! - **Progress**: the two-level [`Progress`] capability shared by every stage
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lidar_lite_core::{ClassificationMask, LasSource, RecordSource};
//!
//! let mask = ClassificationMask::from_codes([2, 9])?; // Ground + Water
//! let mut source = LasSource::open("survey.las")?;
//! println!("{} records", source.record_count());
//!
//! while let Some(record) = source.next_record() {
//!     let record = record?;
//!     if mask.is_selected(record.classification) {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization of masks, counts and unit types

pub mod classification;
pub mod error;
pub mod las_source;
pub mod progress;
pub mod record;
pub mod units;

pub use classification::{
    classification_name, ClassificationCounts, ClassificationMask, CLASSIFICATION_COUNT,
};
pub use error::{Error, Result};
pub use las_source::LasSource;
pub use progress::{NullProgress, Progress, ProgressScope, RenderThrottle, Stage};
pub use record::{MemorySource, PointRecord, RecordSource};
pub use units::{LinearUnit, UnitFactors, UnitMetadata, UnitSettings};
