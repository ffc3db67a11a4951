// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Import results.

use lidar_lite_core::{ClassificationCounts, UnitSettings};
use serde::{Deserialize, Serialize};

use crate::options::{ImportType, ThinOption};

/// What one import read and produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    /// Source label (file name).
    pub source: String,
    pub import_type: ImportType,
    pub thin: ThinOption,
    /// Units the coordinates were converted from.
    pub units: UnitSettings,
    /// Records declared by the source.
    pub record_count: u64,
    /// Records actually read.
    pub records_read: u64,
    /// Points matching the selected classifications.
    pub selected_points: usize,
    pub classification_counts: ClassificationCounts,
    /// Points left after thinning.
    pub thinned_points: usize,
    /// Distinct points handed to the emitter.
    pub unique_points: usize,
    pub triangles: usize,
    /// Geometry calls made against the host.
    pub sink_calls: usize,
    /// Total processing time (ms).
    pub elapsed_ms: u64,
}

/// How an import ended when it did not fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "report", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// Geometry was committed to the host.
    Imported(ImportReport),
    /// The operation committed but the group is empty.
    NothingImported(ImportReport),
    /// A prompt was cancelled before the host was touched.
    Cancelled,
}

impl ImportOutcome {
    pub fn report(&self) -> Option<&ImportReport> {
        match self {
            ImportOutcome::Imported(report) | ImportOutcome::NothingImported(report) => {
                Some(report)
            }
            ImportOutcome::Cancelled => None,
        }
    }

    pub fn is_imported(&self) -> bool {
        matches!(self, ImportOutcome::Imported(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ImportOutcome::Cancelled)
    }
}
