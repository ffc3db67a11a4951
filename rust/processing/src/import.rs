// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LAS import entry point.
//!
//! Order of events for one import:
//!
//! 1. options prompt (cancel: nothing opened, nothing touched)
//! 2. open the record source
//! 3. import type prompt with the record count (cancel: host untouched)
//! 4. `begin_operation`, add the group, run the pipeline
//! 5. `commit_operation`, or `abort_operation` once on any error

use std::path::Path;
use std::time::Instant;

use lidar_lite_core::{LasSource, Progress, ProgressScope, RecordSource, Stage, UnitSettings};
use lidar_lite_geometry::{
    thin_points, triangulate_surface, DelaunayTriangulator, GroupId, SceneSink, Triangulator,
};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::filter::{filter_records, log_classification_counts};
use crate::options::{ImportType, SelectionOptions, ThinOption};
use crate::prompt::ImportPrompt;
use crate::report::{ImportOutcome, ImportReport};

/// Runs the filter, thin, triangulate and emit pipeline against a host scene
pub struct Importer {
    config: PipelineConfig,
    triangulator: Box<dyn Triangulator>,
    dispatch: Option<tracing::Dispatch>,
}

impl std::fmt::Debug for Importer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Importer")
            .field("config", &self.config)
            .field("scoped_logging", &self.dispatch.is_some())
            .finish()
    }
}

impl Importer {
    /// Create an importer using Delaunay triangulation
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            triangulator: Box::new(DelaunayTriangulator),
            dispatch: None,
        })
    }

    /// Replace the triangulation backend
    pub fn with_triangulator<T: Triangulator + 'static>(mut self, triangulator: T) -> Self {
        self.triangulator = Box::new(triangulator);
        self
    }

    /// Route this importer's log events to `dispatch` instead of the global subscriber
    pub fn with_dispatch(mut self, dispatch: tracing::Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Import a `.las` file
    pub fn import_las_file<P: AsRef<Path>>(
        &self,
        path: P,
        prompt: &mut dyn ImportPrompt,
        sink: &mut dyn SceneSink,
        progress: &mut dyn Progress,
    ) -> Result<ImportOutcome> {
        let path = path.as_ref();
        self.run(|| LasSource::open(path), prompt, sink, progress)
    }

    /// Import from any record source.
    ///
    /// `open_source` is only called once the options prompt has been
    /// answered. Errors are returned unchanged after the host operation has
    /// been aborted.
    pub fn run<S, F>(
        &self,
        open_source: F,
        prompt: &mut dyn ImportPrompt,
        sink: &mut dyn SceneSink,
        progress: &mut dyn Progress,
    ) -> Result<ImportOutcome>
    where
        S: RecordSource,
        F: FnOnce() -> lidar_lite_core::Result<S>,
    {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, || {
                self.run_prompted(open_source, prompt, sink, progress)
            }),
            None => self.run_prompted(open_source, prompt, sink, progress),
        }
    }

    fn run_prompted<S, F>(
        &self,
        open_source: F,
        prompt: &mut dyn ImportPrompt,
        sink: &mut dyn SceneSink,
        progress: &mut dyn Progress,
    ) -> Result<ImportOutcome>
    where
        S: RecordSource,
        F: FnOnce() -> lidar_lite_core::Result<S>,
    {
        let Some(selection) = prompt.import_options() else {
            tracing::info!("Import cancelled");
            return Ok(ImportOutcome::Cancelled);
        };

        let mut source = open_source()?;
        let record_count = source.record_count();
        tracing::info!(
            source = source.label(),
            records = record_count,
            "Found point data records"
        );

        let Some((import_type, thin)) = prompt.import_type(record_count) else {
            tracing::info!("Import cancelled");
            return Ok(ImportOutcome::Cancelled);
        };

        self.run_bracketed(&mut source, &selection, import_type, thin, sink, progress)
    }

    /// Everything that touches the host happens inside this bracket
    fn run_bracketed<S: RecordSource + ?Sized>(
        &self,
        source: &mut S,
        selection: &SelectionOptions,
        import_type: ImportType,
        thin: ThinOption,
        sink: &mut dyn SceneSink,
        progress: &mut dyn Progress,
    ) -> Result<ImportOutcome> {
        sink.begin_operation(&self.config.operation_name)?;

        let (group, report) =
            match self.import_points(source, selection, import_type, thin, sink, progress) {
                Ok(done) => done,
                Err(e) => {
                    tracing::error!(error = %e, "Import failed, aborting operation");
                    sink.abort_operation();
                    return Err(e);
                }
            };

        if let Err(e) = sink.commit_operation() {
            tracing::error!(error = %e, "Commit failed, aborting operation");
            sink.abort_operation();
            return Err(e.into());
        }

        if sink.is_group_empty(group) {
            tracing::info!("No points imported");
            Ok(ImportOutcome::NothingImported(report))
        } else {
            tracing::info!(
                points = report.unique_points,
                triangles = report.triangles,
                sink_calls = report.sink_calls,
                elapsed_ms = report.elapsed_ms,
                "Import complete"
            );
            Ok(ImportOutcome::Imported(report))
        }
    }

    fn import_points<S: RecordSource + ?Sized>(
        &self,
        source: &mut S,
        selection: &SelectionOptions,
        import_type: ImportType,
        thin: ThinOption,
        sink: &mut dyn SceneSink,
        progress: &mut dyn Progress,
    ) -> Result<(GroupId, ImportReport)> {
        let start = Instant::now();
        let group = sink.add_group(&self.config.group_name)?;

        let units: UnitSettings = source.units().resolve(&selection.units);
        tracing::debug!(
            horizontal = %units.horizontal,
            vertical = %units.vertical,
            "Resolved coordinate units"
        );

        let mut report = ImportReport {
            source: source.label().to_string(),
            import_type,
            thin,
            units,
            record_count: source.record_count(),
            ..Default::default()
        };

        let mut progress = ProgressScope::new(progress);
        progress.set_stage(Stage::Start, "Total Progress");

        let filtered = filter_records(
            source,
            selection.classifications,
            units.factors(),
            &mut *progress,
        )?;
        log_classification_counts(&filtered.counts);

        report.records_read = filtered.records_read;
        report.selected_points = filtered.points.len();
        report.classification_counts = filtered.counts;

        if filtered.points.is_empty() {
            report.elapsed_ms = start.elapsed().as_millis() as u64;
            return Ok((group, report));
        }

        let points = thin_points(filtered.points, thin.fraction(), &mut *progress)?;
        report.thinned_points = points.len();

        let emitter = self.config.emitter()?;
        match import_type {
            ImportType::Surface => {
                let surface =
                    triangulate_surface(points, self.triangulator.as_ref(), &mut *progress)?;
                report.unique_points = surface.points.len();
                report.triangles = surface.triangle_count();

                let stats = emitter.emit_surface(
                    &mut *sink,
                    group,
                    &surface.points,
                    &surface.triangles,
                    &mut *progress,
                )?;
                report.sink_calls = stats.calls;
            }
            ImportType::ConstructionPoints => {
                report.unique_points = points.len();
                let stats = emitter.emit_points(&mut *sink, group, &points, &mut *progress)?;
                report.sink_calls = stats.calls;
            }
        }

        report.elapsed_ms = start.elapsed().as_millis() as u64;
        Ok((group, report))
    }
}
