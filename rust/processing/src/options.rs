// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User-facing import choices.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use lidar_lite_core::{ClassificationMask, UnitMetadata};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What the import produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportType {
    /// Triangulated surface over the XY projection.
    #[default]
    Surface,
    /// One construction point per point, no triangulation.
    ConstructionPoints,
}

impl fmt::Display for ImportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportType::Surface => write!(f, "Surface"),
            ImportType::ConstructionPoints => write!(f, "CPoints"),
        }
    }
}

impl FromStr for ImportType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "surface" => Ok(ImportType::Surface),
            "cpoints" | "points" | "construction_points" | "construction-points" => {
                Ok(ImportType::ConstructionPoints)
            }
            other => Err(Error::Config(format!("unknown import type '{}'", other))),
        }
    }
}

/// Thinning choices offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThinOption {
    #[default]
    #[serde(rename = "full", alias = "Full Size")]
    Full,
    #[serde(rename = "50%")]
    Half,
    #[serde(rename = "20%")]
    Fifth,
    #[serde(rename = "10%")]
    Tenth,
    #[serde(rename = "1%")]
    Hundredth,
    #[serde(rename = "0.1%")]
    Thousandth,
}

impl ThinOption {
    /// Menu order
    pub const ALL: [ThinOption; 6] = [
        ThinOption::Full,
        ThinOption::Half,
        ThinOption::Fifth,
        ThinOption::Tenth,
        ThinOption::Hundredth,
        ThinOption::Thousandth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ThinOption::Full => "Full Size",
            ThinOption::Half => "50%",
            ThinOption::Fifth => "20%",
            ThinOption::Tenth => "10%",
            ThinOption::Hundredth => "1%",
            ThinOption::Thousandth => "0.1%",
        }
    }

    /// Fraction of points to keep; `None` means no thinning
    pub fn fraction(self) -> Option<f64> {
        match self {
            ThinOption::Full => None,
            ThinOption::Half => Some(0.5),
            ThinOption::Fifth => Some(0.2),
            ThinOption::Tenth => Some(0.1),
            ThinOption::Hundredth => Some(0.01),
            ThinOption::Thousandth => Some(0.001),
        }
    }
}

impl fmt::Display for ThinOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ThinOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("full") || wanted.eq_ignore_ascii_case("none") {
            return Ok(ThinOption::Full);
        }
        Self::ALL
            .into_iter()
            .find(|option| {
                let label = option.label();
                label.eq_ignore_ascii_case(wanted) || label.trim_end_matches('%') == wanted
            })
            .ok_or_else(|| {
                Error::Config(format!(
                    "unknown thinning '{}' (expected one of: {})",
                    wanted,
                    Self::ALL.map(ThinOption::label).join(", ")
                ))
            })
    }
}

/// Result of the options prompt: which classes to import and unit overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionOptions {
    pub classifications: ClassificationMask,
    /// Explicit units; an unset axis falls back to the file's metadata
    pub units: UnitMetadata,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            classifications: ClassificationMask::all(),
            units: UnitMetadata::default(),
        }
    }
}

/// Every import choice, as stored in an options file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    #[serde(flatten)]
    pub selection: SelectionOptions,
    pub import_type: ImportType,
    pub thin: ThinOption,
}

impl ImportOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(lidar_lite_core::Error::from)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
