// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause of a scene sink failure
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while building or emitting geometry
#[derive(Error, Debug)]
pub enum Error {
    /// The triangulator broke its contract (bad length or index)
    #[error("Invalid triangulation: {0}")]
    InvalidTriangulation(String),

    #[error("Invalid thin fraction {0} (expected 0 < f <= 1)")]
    InvalidThinFraction(f64),

    #[error("Invalid batch size {0} (expected at least 1)")]
    InvalidBatchSize(usize),

    #[error("Unknown winding '{0}' (expected preserve or reversed)")]
    InvalidWinding(String),

    /// The host scene rejected a request
    #[error("Scene sink error: {0}")]
    Sink(#[source] SinkError),

    #[error("No scene operation is open")]
    NoActiveOperation,

    #[error("Unknown group {0}")]
    UnknownGroup(usize),
}

impl Error {
    /// Wrap any host failure as a sink error
    pub fn sink<E>(err: E) -> Self
    where
        E: Into<SinkError>,
    {
        Error::Sink(err.into())
    }
}
