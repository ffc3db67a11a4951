// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LAS file record source
//!
//! Binary decoding is delegated to the `las` crate. This module only exposes
//! the header count, the coordinate units found in the GeoTIFF key directory,
//! and a lazy stream of [`PointRecord`]s.

use std::path::Path;

use las::{Read, Reader};

use crate::error::Result;
use crate::record::{PointRecord, RecordSource};
use crate::units::{LinearUnit, UnitMetadata};

/// VLR user id holding projection records
const PROJECTION_USER_ID: &str = "LASF_Projection";
/// GeoKeyDirectoryTag record id
const GEO_KEY_DIRECTORY_RECORD: u16 = 34735;
/// ProjLinearUnitsGeoKey
const PROJ_LINEAR_UNITS_KEY: u16 = 3076;
/// VerticalUnitsGeoKey
const VERTICAL_UNITS_KEY: u16 = 4099;

type PointStream = Box<dyn Iterator<Item = las::Result<las::Point>>>;

/// Record source reading a `.las` file
pub struct LasSource {
    label: String,
    record_count: u64,
    units: UnitMetadata,
    points: PointStream,
}

impl LasSource {
    /// Open a LAS file and read its header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = Reader::from_path(path)?;

        let header = reader.header();
        let record_count = header.number_of_points();
        let units = header
            .vlrs()
            .iter()
            .find(|vlr| {
                vlr.user_id == PROJECTION_USER_ID && vlr.record_id == GEO_KEY_DIRECTORY_RECORD
            })
            .map(|vlr| units_from_geo_keys(&vlr.data))
            .unwrap_or_default();

        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        // The reader moves into the stream so records stay lazy
        let points: PointStream = Box::new(std::iter::from_fn(move || reader.points().next()));

        Ok(Self {
            label,
            record_count,
            units,
            points,
        })
    }
}

impl RecordSource for LasSource {
    fn record_count(&self) -> u64 {
        self.record_count
    }

    fn units(&self) -> UnitMetadata {
        self.units
    }

    fn next_record(&mut self) -> Option<Result<PointRecord>> {
        let point = self.points.next()?;
        Some(point.map_err(Into::into).map(|p| PointRecord {
            x: p.x,
            y: p.y,
            z: p.z,
            classification: u8::from(p.classification),
        }))
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Debug for LasSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LasSource")
            .field("label", &self.label)
            .field("record_count", &self.record_count)
            .field("units", &self.units)
            .finish()
    }
}

/// Read horizontal and vertical units from a GeoKeyDirectoryTag payload.
///
/// The payload is a little-endian `u16` array: a 4-entry header whose last
/// entry is the key count, then one `(key id, location, count, value)` entry
/// per key. Only keys stored inline (location 0) are read.
pub fn units_from_geo_keys(data: &[u8]) -> UnitMetadata {
    let word = |entry: &[u8], i: usize| u16::from_le_bytes([entry[2 * i], entry[2 * i + 1]]);

    let mut units = UnitMetadata::default();
    if data.len() < 8 {
        return units;
    }
    let (header, keys) = data.split_at(8);

    let key_count = word(header, 3) as usize;
    for entry in keys.chunks_exact(8).take(key_count) {
        let (key_id, location, value) = (word(entry, 0), word(entry, 1), word(entry, 3));
        if location != 0 {
            continue;
        }
        match key_id {
            PROJ_LINEAR_UNITS_KEY => units.horizontal = LinearUnit::from_epsg(value),
            VERTICAL_UNITS_KEY => units.vertical = LinearUnit::from_epsg(value),
            _ => {}
        }
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo_key_bytes(keys: &[[u16; 4]]) -> Vec<u8> {
        let mut words = vec![1u16, 1, 0, keys.len() as u16];
        for key in keys {
            words.extend_from_slice(key);
        }
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn test_units_from_geo_keys() {
        let data = geo_key_bytes(&[
            [1024, 0, 1, 1],       // GTModelTypeGeoKey, ignored
            [3076, 0, 1, 9001],    // metres horizontally
            [4099, 0, 1, 9003],    // US survey feet vertically
        ]);
        let units = units_from_geo_keys(&data);
        assert_eq!(units.horizontal, Some(LinearUnit::Meters));
        assert_eq!(units.vertical, Some(LinearUnit::Feet));
    }

    #[test]
    fn test_units_from_geo_keys_skips_indirect_values() {
        // Location 34736 means the value lives in the double params record
        let data = geo_key_bytes(&[[3076, 34736, 1, 0]]);
        let units = units_from_geo_keys(&data);
        assert_eq!(units.horizontal, None);
    }

    #[test]
    fn test_units_from_truncated_geo_keys() {
        assert_eq!(units_from_geo_keys(&[1, 0, 1]), UnitMetadata::default());
        // Declared key count larger than the payload
        let mut data = geo_key_bytes(&[[3076, 0, 1, 9002]]);
        data[6] = 9;
        let units = units_from_geo_keys(&data);
        assert_eq!(units.horizontal, Some(LinearUnit::Feet));
    }

    #[test]
    fn test_units_from_geo_keys_ignores_partial_entry() {
        let mut data = geo_key_bytes(&[[4099, 0, 1, 9001], [3076, 0, 1, 9001]]);
        // Leave an odd 5 bytes of the second entry
        data.truncate(data.len() - 3);
        let units = units_from_geo_keys(&data);
        assert_eq!(units.vertical, Some(LinearUnit::Meters));
        assert_eq!(units.horizontal, None);
    }

    #[test]
    fn test_open_missing_file_fails() {
        assert!(LasSource::open("does/not/exist.las").is_err());
    }

    #[test]
    fn test_open_sample_file() {
        let path = "tests/data/sample.las";
        if !Path::new(path).exists() {
            println!("{} not found, skipping", path);
            return;
        }

        let mut source = LasSource::open(path).expect("open sample");
        let declared = source.record_count();
        let mut read = 0u64;
        while let Some(record) = source.next_record() {
            record.expect("valid record");
            read += 1;
        }
        assert_eq!(read, declared);
    }
}
