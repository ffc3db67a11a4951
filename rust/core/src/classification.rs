// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classification selection
//!
//! LAS point classes are small integer codes. The importer lets the user pick
//! a subset of them (Ground, Water, ...) and keeps only matching records.

use crate::error::{Error, Result};

/// Number of classification codes a mask can hold
pub const CLASSIFICATION_COUNT: usize = 32;

/// ASPRS standard class names for codes 0-18
const STANDARD_NAMES: [&str; 19] = [
    "Created, never classified",
    "Unclassified",
    "Ground",
    "Low Vegetation",
    "Medium Vegetation",
    "High Vegetation",
    "Building",
    "Low Point (noise)",
    "Model Key-point",
    "Water",
    "Rail",
    "Road Surface",
    "Overlap",
    "Wire - Guard (Shield)",
    "Wire - Conductor (Phase)",
    "Transmission Tower",
    "Wire-structure Connector",
    "Bridge Deck",
    "High Noise",
];

/// Human readable name of a classification code
pub fn classification_name(code: u8) -> &'static str {
    match code as usize {
        c if c < STANDARD_NAMES.len() => STANDARD_NAMES[c],
        c if c < 64 => "Reserved",
        _ => "User definable",
    }
}

/// Set of selected classification codes (bit `code` set = selected)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u8>", into = "Vec<u8>"))]
pub struct ClassificationMask(u32);

impl ClassificationMask {
    /// Mask with nothing selected
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Mask with every code selected
    pub const fn all() -> Self {
        Self(u32::MAX)
    }

    /// Raw 32-bit representation
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build a mask from a list of codes
    pub fn from_codes<I: IntoIterator<Item = u8>>(codes: I) -> Result<Self> {
        let mut mask = Self::empty();
        for code in codes {
            mask.select(code)?;
        }
        Ok(mask)
    }

    /// Add a code to the selection
    pub fn select(&mut self, code: u8) -> Result<()> {
        if code as usize >= CLASSIFICATION_COUNT {
            return Err(Error::ClassificationOutOfRange(code));
        }
        self.0 |= 1 << code;
        Ok(())
    }

    /// Remove a code from the selection; unknown codes are ignored
    pub fn deselect(&mut self, code: u8) {
        if (code as usize) < CLASSIFICATION_COUNT {
            self.0 &= !(1 << code);
        }
    }

    /// True when records of this class should be imported.
    /// Codes that do not fit the mask are never selected.
    #[inline]
    pub fn is_selected(self, code: u8) -> bool {
        (code as usize) < CLASSIFICATION_COUNT && self.0 & (1 << code) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Selected codes in ascending order
    pub fn codes(self) -> impl Iterator<Item = u8> {
        (0..CLASSIFICATION_COUNT as u8).filter(move |&c| self.is_selected(c))
    }
}

impl TryFrom<Vec<u8>> for ClassificationMask {
    type Error = Error;

    fn try_from(codes: Vec<u8>) -> Result<Self> {
        Self::from_codes(codes)
    }
}

impl From<ClassificationMask> for Vec<u8> {
    fn from(mask: ClassificationMask) -> Self {
        mask.codes().collect()
    }
}

/// Running totals of imported points per classification code
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassificationCounts {
    counts: [u64; CLASSIFICATION_COUNT],
}

impl ClassificationCounts {
    pub fn new() -> Self {
        Self {
            counts: [0; CLASSIFICATION_COUNT],
        }
    }

    /// Count one point of `code`.
    /// Callers validate the code first; out-of-range codes are ignored here.
    #[inline]
    pub fn record(&mut self, code: u8) {
        if let Some(slot) = self.counts.get_mut(code as usize) {
            *slot += 1;
        }
    }

    #[inline]
    pub fn get(&self, code: u8) -> u64 {
        self.counts.get(code as usize).copied().unwrap_or(0)
    }

    /// Sum over all classes
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(code, count)` pairs for every code, including zero counts
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().enumerate().map(|(i, &n)| (i as u8, n))
    }
}

impl Default for ClassificationCounts {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_selects_only_chosen_codes() {
        let mask = ClassificationMask::from_codes([2, 9]).unwrap();
        assert_eq!(mask.bits(), (1 << 2) | (1 << 9));
        assert!(mask.is_selected(2));
        assert!(mask.is_selected(9));
        assert!(!mask.is_selected(0));
        assert!(!mask.is_selected(3));
    }

    #[test]
    fn test_mask_rejects_out_of_range_codes() {
        let mut mask = ClassificationMask::empty();
        assert!(mask.select(32).is_err());
        assert!(mask.select(255).is_err());
        assert!(mask.is_empty());
    }

    #[test]
    fn test_wide_codes_never_selected() {
        // A full mask must not wrap around for codes >= 32
        let mask = ClassificationMask::all();
        assert!(mask.is_selected(31));
        assert!(!mask.is_selected(32));
        assert!(!mask.is_selected(34));
    }

    #[test]
    fn test_deselect_and_codes() {
        let mut mask = ClassificationMask::from_codes([1, 2, 5]).unwrap();
        mask.deselect(2);
        mask.deselect(40);
        assert_eq!(mask.codes().collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(Vec::<u8>::from(mask), vec![1, 5]);
    }

    #[test]
    fn test_counts() {
        let mut counts = ClassificationCounts::new();
        counts.record(2);
        counts.record(2);
        counts.record(9);
        counts.record(40);
        assert_eq!(counts.get(2), 2);
        assert_eq!(counts.get(9), 1);
        assert_eq!(counts.get(40), 0);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.iter().count(), CLASSIFICATION_COUNT);
    }

    #[test]
    fn test_classification_names() {
        assert_eq!(classification_name(2), "Ground");
        assert_eq!(classification_name(9), "Water");
        assert_eq!(classification_name(25), "Reserved");
        assert_eq!(classification_name(200), "User definable");
    }
}
