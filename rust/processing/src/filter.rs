// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classification filter and unit converter.
//!
//! Single pass over the record stream: records whose class is in the mask
//! are scaled to host inches and collected, every other record is skipped.

use lidar_lite_core::{
    classification_name, ClassificationCounts, ClassificationMask, Error as CoreError, Progress,
    RecordSource, Stage, UnitFactors, CLASSIFICATION_COUNT,
};
use lidar_lite_geometry::Point3;

use crate::error::Result;

/// Points selected from a record stream
#[derive(Debug, Clone, Default)]
pub struct FilteredPoints {
    /// Selected positions in host inches, in stream order
    pub points: Vec<Point3<f64>>,
    /// Selected points per classification
    pub counts: ClassificationCounts,
    pub records_read: u64,
}

/// Read every record, keeping those whose classification is selected.
///
/// A record with a code outside 0..=31 aborts the pass.
pub fn filter_records<S: RecordSource + ?Sized>(
    source: &mut S,
    mask: ClassificationMask,
    factors: UnitFactors,
    progress: &mut dyn Progress,
) -> Result<FilteredPoints> {
    let total = source.record_count();
    progress.set_stage(Stage::Reading, "Total Progress");
    progress.set_sub_progress(0.0, &format!("Reading Point Data, Remaining points: {}", total));

    let mut filtered = FilteredPoints::default();
    let mut index = 0u64;

    while let Some(record) = source.next_record() {
        let record = record?;
        if record.classification as usize >= CLASSIFICATION_COUNT {
            return Err(CoreError::InvalidClassification {
                code: record.classification,
                index,
            }
            .into());
        }

        if mask.is_selected(record.classification) {
            filtered.points.push(Point3::new(
                record.x * factors.horizontal,
                record.y * factors.horizontal,
                record.z * factors.vertical,
            ));
            filtered.counts.record(record.classification);
        }

        index += 1;
        if progress.should_render() && total > 0 {
            let percent = (index as f64 * 100.0 / total as f64).min(100.0);
            progress.set_sub_progress(
                percent,
                &format!(
                    "Reading Point Data, Remaining points: {}",
                    total.saturating_sub(index)
                ),
            );
        }
    }

    filtered.records_read = index;
    if index != total {
        tracing::warn!(
            declared = total,
            read = index,
            "Record count differs from the declared count"
        );
    }
    Ok(filtered)
}

/// Log selected points per classification; non-zero classes at info, all at debug
pub fn log_classification_counts(counts: &ClassificationCounts) {
    for (code, count) in counts.iter() {
        if count > 0 {
            tracing::info!(code, class = classification_name(code), count, "Points by classification");
        } else {
            tracing::debug!(code, class = classification_name(code), count, "Points by classification");
        }
    }
    tracing::info!(total = counts.total(), "Total points matching classifications");
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lidar_lite_core::{LinearUnit, MemorySource, NullProgress, PointRecord, UnitSettings};

    use crate::error::Error;

    fn records() -> Vec<PointRecord> {
        vec![
            PointRecord::new(1.0, 2.0, 3.0, 2),
            PointRecord::new(4.0, 5.0, 6.0, 5),
            PointRecord::new(7.0, 8.0, 9.0, 2),
            PointRecord::new(1.5, 2.5, 3.5, 9),
        ]
    }

    fn feet() -> UnitFactors {
        UnitSettings::default().factors()
    }

    #[test]
    fn test_keeps_only_selected_classes() {
        let mut source = MemorySource::new(records());
        let mask = ClassificationMask::from_codes([2]).unwrap();
        let filtered = filter_records(&mut source, mask, feet(), &mut NullProgress).unwrap();

        assert_eq!(filtered.points.len(), 2);
        assert_eq!(filtered.counts.get(2), 2);
        assert_eq!(filtered.counts.get(5), 0);
        assert_eq!(filtered.counts.total(), 2);
        assert_eq!(filtered.records_read, 4);
    }

    #[test]
    fn test_scales_each_axis() {
        let mut source = MemorySource::new(vec![PointRecord::new(1.0, 2.0, 3.0, 2)]);
        let factors = UnitSettings::new(LinearUnit::Meters, LinearUnit::Feet).factors();
        let filtered =
            filter_records(&mut source, ClassificationMask::all(), factors, &mut NullProgress)
                .unwrap();

        let p = filtered.points[0];
        assert_relative_eq!(p.x, 39.3701);
        assert_relative_eq!(p.y, 78.7402);
        assert_relative_eq!(p.z, 36.0);
    }

    #[test]
    fn test_empty_mask_selects_nothing() {
        let mut source = MemorySource::new(records());
        let filtered = filter_records(
            &mut source,
            ClassificationMask::empty(),
            feet(),
            &mut NullProgress,
        )
        .unwrap();
        assert!(filtered.points.is_empty());
        assert_eq!(filtered.records_read, 4);
    }

    #[test]
    fn test_keeps_stream_order() {
        let mut source = MemorySource::new(records());
        let filtered =
            filter_records(&mut source, ClassificationMask::all(), feet(), &mut NullProgress)
                .unwrap();
        let xs: Vec<f64> = filtered.points.iter().map(|p| p.x / 12.0).collect();
        assert_eq!(xs, vec![1.0, 4.0, 7.0, 1.5]);
    }

    #[test]
    fn test_invalid_classification_aborts() {
        let mut data = records();
        data.insert(2, PointRecord::new(0.0, 0.0, 0.0, 40));
        let mut source = MemorySource::new(data);

        let result =
            filter_records(&mut source, ClassificationMask::all(), feet(), &mut NullProgress);
        assert!(matches!(
            result,
            Err(Error::Core(CoreError::InvalidClassification { code: 40, index: 2 }))
        ));
    }
}
