// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use lidar_lite_geometry::{MeshEmitter, Winding, DEFAULT_BATCH_SIZE};

use crate::error::{Error, Result};

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Maximum triangles per host call.
    pub batch_size: usize,
    /// Vertex order of emitted triangles.
    pub winding: Winding,
    /// Name of the group that receives the imported geometry.
    pub group_name: String,
    /// Name of the host operation bracketing the import.
    pub operation_name: String,
    /// Minimum time between progress refreshes, in milliseconds.
    pub progress_interval_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            winding: Winding::Reversed,
            group_name: "LAS_import".into(),
            operation_name: "LAS import".into(),
            progress_interval_ms: 100,
        }
    }
}

/// Read and parse an environment variable, falling back on absence or parse failure
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl PipelineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            batch_size: env_or("LIDAR_BATCH_SIZE", defaults.batch_size),
            winding: env_or("LIDAR_WINDING", defaults.winding),
            group_name: std::env::var("LIDAR_GROUP_NAME").unwrap_or(defaults.group_name),
            operation_name: defaults.operation_name,
            progress_interval_ms: env_or(
                "LIDAR_PROGRESS_INTERVAL_MS",
                defaults.progress_interval_ms,
            ),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".into()));
        }
        if self.group_name.trim().is_empty() {
            return Err(Error::Config("group_name must not be empty".into()));
        }
        Ok(())
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    /// Emitter configured with this batch size and winding
    pub fn emitter(&self) -> Result<MeshEmitter> {
        Ok(MeshEmitter::new(self.batch_size, self.winding)?)
    }
}
