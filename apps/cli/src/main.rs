// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LiDAR-Lite command line importer.
//!
//! Reads a `.las` file, keeps the selected classifications, optionally thins
//! the points, and builds either a triangulated surface or a set of
//! construction points. The result can be written as Wavefront OBJ.
//!
//! # Examples
//!
//! - `las-import site.las --classes 2,9 -o ground.obj` - ground and water surface
//! - `las-import site.las --type cpoints --thin 1%` - every hundredth point
//! - `las-import site.las --interactive --report` - ask for every choice, print a JSON report

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use lidar_lite_core::Progress;
use lidar_lite_geometry::MemoryScene;
use lidar_lite_processing::{
    FixedPrompt, ImportOutcome, ImportPrompt, Importer, TracingProgress, IMPORTER_DESCRIPTION,
    IMPORTER_ID, IMPORTER_VERSION,
};

mod config;
mod error;
mod obj;
mod progress;
mod prompt;

use progress::BarProgress;
use prompt::InteractivePrompt;

/// Import LiDAR point clouds as a surface or construction points
#[derive(Debug, Parser)]
#[command(name = "las-import")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// LAS file to import
    #[arg(name = "INPUT")]
    pub input: PathBuf,

    /// Import type: surface or cpoints
    #[arg(long = "type", value_name = "TYPE")]
    pub import_type: Option<String>,

    /// Thin to: full, 50%, 20%, 10%, 1% or 0.1%
    #[arg(long)]
    pub thin: Option<String>,

    /// Classification codes to import, e.g. 2,9 (default: all)
    #[arg(long, value_delimiter = ',')]
    pub classes: Vec<u8>,

    /// Horizontal units (feet or meters), overrides the file
    #[arg(long, value_name = "UNIT")]
    pub horizontal_units: Option<String>,

    /// Vertical units (feet or meters), overrides the file
    #[arg(long, value_name = "UNIT")]
    pub vertical_units: Option<String>,

    /// JSON options file; command line flags take precedence
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Write the imported geometry as Wavefront OBJ
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Triangles per host call
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Triangle winding: preserve or reversed
    #[arg(long)]
    pub winding: Option<String>,

    /// Print the import report as JSON on stdout
    #[arg(long)]
    pub report: bool,

    /// Ask for options on the terminal
    #[arg(short, long)]
    pub interactive: bool,

    /// Log progress instead of drawing bars
    #[arg(long)]
    pub no_progress: bool,

    /// Print the merged import options as JSON and exit, for use with --options
    #[arg(long)]
    pub dump_options: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let pipeline = config::pipeline_config(&cli)?;
    let options = config::import_options(&cli)?;

    if cli.dump_options {
        println!("{}", options.to_json()?);
        return Ok(());
    }

    if !config::has_las_extension(&cli.input) {
        tracing::warn!(
            input = %cli.input.display(),
            "Input does not have a .las extension, trying anyway"
        );
    }

    tracing::info!(
        importer = IMPORTER_ID,
        version = IMPORTER_VERSION,
        input = %cli.input.display(),
        batch_size = pipeline.batch_size,
        winding = %pipeline.winding,
        "Starting {}",
        IMPORTER_DESCRIPTION
    );

    let interval = pipeline.progress_interval();
    let importer = Importer::new(pipeline)?;
    let mut scene = MemoryScene::new();

    let mut progress: Box<dyn Progress> = if cli.no_progress || !io::stderr().is_terminal() {
        Box::new(TracingProgress::new(interval))
    } else {
        Box::new(BarProgress::new(interval))
    };

    let outcome = if cli.interactive {
        let mut prompt = InteractivePrompt::new(options, io::stdin().lock(), io::stderr());
        import_file(&importer, &cli.input, &mut prompt, &mut scene, progress.as_mut())
    } else {
        let mut prompt = FixedPrompt::new(options);
        import_file(&importer, &cli.input, &mut prompt, &mut scene, progress.as_mut())
    }
    .with_context(|| format!("Failed to import {}", cli.input.display()))?;

    match &outcome {
        ImportOutcome::Cancelled => tracing::info!("Import cancelled"),
        ImportOutcome::NothingImported(_) => tracing::warn!("No points imported"),
        ImportOutcome::Imported(_) => {
            if let Some(path) = &cli.output {
                let stats = obj::write_obj_file(&scene, path)?;
                tracing::info!(
                    output = %path.display(),
                    vertices = stats.vertices,
                    faces = stats.faces,
                    points = stats.points,
                    "Wrote OBJ"
                );
            }
        }
    }

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}

/// Import one file. The progress display is closed on every outcome,
/// including a cancel before the pipeline starts.
fn import_file(
    importer: &Importer,
    input: &Path,
    prompt: &mut dyn ImportPrompt,
    scene: &mut MemoryScene,
    progress: &mut dyn Progress,
) -> lidar_lite_processing::Result<ImportOutcome> {
    let result = importer.import_las_file(input, prompt, scene, progress);
    progress.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use indicatif::ProgressDrawTarget;
    use lidar_lite_processing::{ImportOptions, PipelineConfig};

    fn hidden_bars() -> BarProgress {
        BarProgress::with_draw_target(ProgressDrawTarget::hidden(), Duration::from_secs(3600))
    }

    #[test]
    fn test_bars_closed_on_cancel() {
        let importer = Importer::new(PipelineConfig::default()).unwrap();
        let mut prompt = FixedPrompt::new(ImportOptions::default()).cancel_at_options();
        let mut scene = MemoryScene::new();
        let mut progress = hidden_bars();

        let outcome = import_file(
            &importer,
            Path::new("site.las"),
            &mut prompt,
            &mut scene,
            &mut progress,
        )
        .unwrap();

        assert!(outcome.is_cancelled());
        assert!(progress.is_finished());
    }

    #[test]
    fn test_bars_closed_on_open_failure() {
        let importer = Importer::new(PipelineConfig::default()).unwrap();
        let mut prompt = FixedPrompt::new(ImportOptions::default());
        let mut scene = MemoryScene::new();
        let mut progress = hidden_bars();

        let result = import_file(
            &importer,
            Path::new("does/not/exist.las"),
            &mut prompt,
            &mut scene,
            &mut progress,
        );

        assert!(result.is_err());
        assert!(progress.is_finished());
    }
}
