// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the command line.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid value '{value}' for --{flag}: {reason}")]
    InvalidArgument {
        flag: &'static str,
        value: String,
        reason: String,
    },

    #[error("Could not read options file {path}: {source}")]
    OptionsFile {
        path: PathBuf,
        #[source]
        source: lidar_lite_processing::Error,
    },

    #[error("Import error: {0}")]
    Import(#[from] lidar_lite_processing::Error),

    #[error("Could not write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn invalid(flag: &'static str, value: &str, reason: impl ToString) -> Self {
        CliError::InvalidArgument {
            flag,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
