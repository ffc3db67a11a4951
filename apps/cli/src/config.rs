// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command line flags merged over the environment and the options file.

use std::path::Path;

use lidar_lite_core::{ClassificationMask, LinearUnit};
use lidar_lite_geometry::Winding;
use lidar_lite_processing::{
    ImportOptions, ImportType, PipelineConfig, ThinOption, IMPORTER_EXTENSION,
};

use crate::error::CliError;
use crate::Cli;

/// Pipeline settings: environment first, then flags.
pub fn pipeline_config(cli: &Cli) -> Result<PipelineConfig, CliError> {
    let mut config = PipelineConfig::from_env();
    if let Some(batch_size) = cli.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(winding) = &cli.winding {
        config.winding = winding
            .parse::<Winding>()
            .map_err(|e| CliError::invalid("winding", winding, e))?;
    }
    config.validate()?;
    Ok(config)
}

/// Import choices: defaults, then the options file, then flags.
pub fn import_options(cli: &Cli) -> Result<ImportOptions, CliError> {
    let mut options = match &cli.options {
        Some(path) => ImportOptions::from_file(path).map_err(|source| CliError::OptionsFile {
            path: path.clone(),
            source,
        })?,
        None => ImportOptions::default(),
    };

    if !cli.classes.is_empty() {
        options.selection.classifications =
            ClassificationMask::from_codes(cli.classes.iter().copied()).map_err(|e| {
                let listed: Vec<String> = cli.classes.iter().map(u8::to_string).collect();
                CliError::invalid("classes", &listed.join(","), e)
            })?;
    }
    if let Some(unit) = &cli.horizontal_units {
        options.selection.units.horizontal = Some(parse_unit("horizontal-units", unit)?);
    }
    if let Some(unit) = &cli.vertical_units {
        options.selection.units.vertical = Some(parse_unit("vertical-units", unit)?);
    }
    if let Some(import_type) = &cli.import_type {
        options.import_type = import_type
            .parse::<ImportType>()
            .map_err(|e| CliError::invalid("type", import_type, e))?;
    }
    if let Some(thin) = &cli.thin {
        options.thin = thin
            .parse::<ThinOption>()
            .map_err(|e| CliError::invalid("thin", thin, e))?;
    }

    Ok(options)
}

fn parse_unit(flag: &'static str, value: &str) -> Result<LinearUnit, CliError> {
    value
        .parse::<LinearUnit>()
        .map_err(|e| CliError::invalid(flag, value, e))
}

pub fn has_las_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(IMPORTER_EXTENSION))
}
