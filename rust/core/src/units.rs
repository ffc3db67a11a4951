// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Linear unit handling for point coordinates
//!
//! LAS coordinates are stored in the linear unit of the file's coordinate
//! reference system. The host works in inches, so every coordinate is scaled
//! by an inches-per-unit factor, chosen per axis.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Inches per meter
pub const INCHES_PER_METER: f64 = 39.3701;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// EPSG unit-of-measure codes used by GeoTIFF keys
const EPSG_METRE: u16 = 9001;
const EPSG_FOOT: u16 = 9002;
const EPSG_US_SURVEY_FOOT: u16 = 9003;

/// Linear unit of a coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LinearUnit {
    Meters,
    #[default]
    Feet,
}

impl LinearUnit {
    /// Scale factor from this unit to host inches
    #[inline]
    pub fn inches_per_unit(self) -> f64 {
        match self {
            LinearUnit::Meters => INCHES_PER_METER,
            LinearUnit::Feet => INCHES_PER_FOOT,
        }
    }

    /// Map an EPSG linear unit code to a supported unit.
    /// US survey feet are treated as feet.
    pub fn from_epsg(code: u16) -> Option<Self> {
        match code {
            EPSG_METRE => Some(LinearUnit::Meters),
            EPSG_FOOT | EPSG_US_SURVEY_FOOT => Some(LinearUnit::Feet),
            _ => None,
        }
    }
}

impl fmt::Display for LinearUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinearUnit::Meters => write!(f, "Meters"),
            LinearUnit::Feet => write!(f, "Feet"),
        }
    }
}

impl FromStr for LinearUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(LinearUnit::Meters),
            "ft" | "foot" | "feet" => Ok(LinearUnit::Feet),
            other => Err(Error::UnsupportedInput(format!(
                "unknown linear unit '{}'",
                other
            ))),
        }
    }
}

/// Resolved units for the horizontal (x, y) and vertical (z) axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSettings {
    pub horizontal: LinearUnit,
    pub vertical: LinearUnit,
}

impl UnitSettings {
    pub fn new(horizontal: LinearUnit, vertical: LinearUnit) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Conversion factors to host inches
    #[inline]
    pub fn factors(&self) -> UnitFactors {
        UnitFactors {
            horizontal: self.horizontal.inches_per_unit(),
            vertical: self.vertical.inches_per_unit(),
        }
    }
}

/// Per-axis scale factors applied to each selected record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitFactors {
    pub horizontal: f64,
    pub vertical: f64,
}

/// Units declared by a record source, either axis may be unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitMetadata {
    pub horizontal: Option<LinearUnit>,
    pub vertical: Option<LinearUnit>,
}

impl UnitMetadata {
    /// Resolve units per axis: explicit choice first, then this metadata,
    /// then feet.
    pub fn resolve(&self, overrides: &UnitMetadata) -> UnitSettings {
        UnitSettings {
            horizontal: overrides
                .horizontal
                .or(self.horizontal)
                .unwrap_or_default(),
            vertical: overrides.vertical.or(self.vertical).unwrap_or_default(),
        }
    }
}
