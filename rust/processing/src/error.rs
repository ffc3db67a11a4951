// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for the import pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an import
#[derive(Error, Debug)]
pub enum Error {
    #[error("Point data error: {0}")]
    Core(#[from] lidar_lite_core::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] lidar_lite_geometry::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Options error: {0}")]
    Options(#[from] serde_json::Error),
}
