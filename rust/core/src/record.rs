// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point records and the sources that produce them

use std::collections::VecDeque;

use crate::error::Result;
use crate::units::UnitMetadata;

/// One stored point: position in source units and its classification code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub classification: u8,
}

impl PointRecord {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64, classification: u8) -> Self {
        Self {
            x,
            y,
            z,
            classification,
        }
    }
}

/// A lazy, single-pass stream of point records.
///
/// Reading restarts only by opening the source again.
pub trait RecordSource {
    /// Total number of records declared by the source
    fn record_count(&self) -> u64;

    /// Coordinate units declared by the source
    fn units(&self) -> UnitMetadata;

    /// Next record, or `None` once the stream is exhausted
    fn next_record(&mut self) -> Option<Result<PointRecord>>;

    /// Short label for log output (usually the file name)
    fn label(&self) -> &str {
        "points"
    }
}

/// Record source backed by an in-memory list, for embedding hosts and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: VecDeque<PointRecord>,
    declared_count: u64,
    units: UnitMetadata,
}

impl MemorySource {
    pub fn new(records: Vec<PointRecord>) -> Self {
        let declared_count = records.len() as u64;
        Self {
            records: records.into(),
            declared_count,
            units: UnitMetadata::default(),
        }
    }

    /// Declare coordinate units for the records
    pub fn with_units(mut self, units: UnitMetadata) -> Self {
        self.units = units;
        self
    }

    /// Records not yet consumed
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl RecordSource for MemorySource {
    fn record_count(&self) -> u64 {
        self.declared_count
    }

    fn units(&self) -> UnitMetadata {
        self.units
    }

    fn next_record(&mut self) -> Option<Result<PointRecord>> {
        self.records.pop_front().map(Ok)
    }

    fn label(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::LinearUnit;

    #[test]
    fn test_memory_source_streams_in_order() {
        let mut source = MemorySource::new(vec![
            PointRecord::new(1.0, 2.0, 3.0, 2),
            PointRecord::new(4.0, 5.0, 6.0, 9),
        ]);
        assert_eq!(source.record_count(), 2);

        let first = source.next_record().unwrap().unwrap();
        assert_eq!(first.classification, 2);
        assert_eq!(source.remaining(), 1);

        let second = source.next_record().unwrap().unwrap();
        assert_eq!(second.x, 4.0);
        assert!(source.next_record().is_none());
        // Declared count does not shrink while reading
        assert_eq!(source.record_count(), 2);
    }

    #[test]
    fn test_memory_source_units() {
        let source = MemorySource::new(Vec::new()).with_units(UnitMetadata {
            horizontal: Some(LinearUnit::Meters),
            vertical: None,
        });
        assert_eq!(source.units().horizontal, Some(LinearUnit::Meters));
        assert_eq!(source.units().vertical, None);
    }
}
