// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for record reading and selection
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading or selecting point records
#[derive(Error, Debug)]
pub enum Error {
    /// A record carried a classification code outside 0..=31
    #[error("Invalid classification code {code} at record {index} (expected 0-31)")]
    InvalidClassification { code: u8, index: u64 },

    /// A classification code that cannot be part of a selection
    #[error("Classification code {0} is out of range (expected 0-31)")]
    ClassificationOutOfRange(u8),

    #[error("LAS error: {0}")]
    Las(#[from] las::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),
}
