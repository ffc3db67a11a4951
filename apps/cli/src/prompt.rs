// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Terminal prompts.
//!
//! Empty input keeps the shown default, `q` or end of input cancels.

use std::io::{BufRead, Write};

use lidar_lite_core::{classification_name, ClassificationMask, LinearUnit};
use lidar_lite_processing::{ImportOptions, ImportPrompt, ImportType, SelectionOptions, ThinOption};

/// Asks for each choice on a line-based terminal
pub struct InteractivePrompt<R, W> {
    defaults: ImportOptions,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractivePrompt<R, W> {
    pub fn new(defaults: ImportOptions, input: R, output: W) -> Self {
        Self {
            defaults,
            input,
            output,
        }
    }

    /// Ask until `parse` accepts the answer. `None` on cancel.
    fn ask<T>(
        &mut self,
        question: &str,
        default: &str,
        mut parse: impl FnMut(&str) -> Result<T, String>,
    ) -> Option<T> {
        loop {
            // A broken terminal counts as a cancel
            write!(self.output, "{} [{}]: ", question, default).ok()?;
            self.output.flush().ok()?;

            let mut line = String::new();
            if self.input.read_line(&mut line).ok()? == 0 {
                return None;
            }
            let answer = line.trim();
            if answer.eq_ignore_ascii_case("q") {
                return None;
            }

            match parse(if answer.is_empty() { default } else { answer }) {
                Ok(value) => return Some(value),
                Err(reason) => {
                    writeln!(self.output, "  {}", reason).ok()?;
                }
            }
        }
    }

    fn ask_unit(&mut self, axis: &str, default: Option<LinearUnit>) -> Option<Option<LinearUnit>> {
        let shown = default.map_or_else(|| "file".to_string(), |u| u.to_string());
        self.ask(
            &format!("{} units (feet, meters, or file)", axis),
            &shown,
            |answer| {
                if answer.eq_ignore_ascii_case("file") {
                    Ok(None)
                } else {
                    answer.parse().map(Some).map_err(|e| format!("{}", e))
                }
            },
        )
    }
}

fn parse_classes(answer: &str) -> Result<ClassificationMask, String> {
    if answer.eq_ignore_ascii_case("all") {
        return Ok(ClassificationMask::all());
    }
    let codes = answer
        .split(',')
        .map(|code| code.trim().parse::<u8>().map_err(|e| format!("'{}': {}", code.trim(), e)))
        .collect::<Result<Vec<u8>, String>>()?;
    ClassificationMask::from_codes(codes).map_err(|e| e.to_string())
}

fn describe_classes(mask: ClassificationMask) -> String {
    if mask == ClassificationMask::all() {
        return "all".into();
    }
    mask.codes()
        .map(|code| code.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl<R: BufRead, W: Write> ImportPrompt for InteractivePrompt<R, W> {
    fn import_options(&mut self) -> Option<SelectionOptions> {
        let defaults = self.defaults.selection;

        writeln!(self.output, "Classifications:").ok()?;
        for code in 0..=18u8 {
            writeln!(self.output, "  {:>2} {}", code, classification_name(code)).ok()?;
        }

        let classifications = self.ask(
            "Classifications to import",
            &describe_classes(defaults.classifications),
            parse_classes,
        )?;
        let horizontal = self.ask_unit("Horizontal", defaults.units.horizontal)?;
        let vertical = self.ask_unit("Vertical", defaults.units.vertical)?;

        let mut selection = defaults;
        selection.classifications = classifications;
        selection.units.horizontal = horizontal;
        selection.units.vertical = vertical;
        Some(selection)
    }

    fn import_type(&mut self, record_count: u64) -> Option<(ImportType, ThinOption)> {
        writeln!(self.output, "Found {} points", record_count).ok()?;

        let import_type = self.ask(
            "Import Type (Surface|CPoints)",
            &self.defaults.import_type.to_string(),
            |answer| answer.parse::<ImportType>().map_err(|e| e.to_string()),
        )?;
        let menu = ThinOption::ALL.map(ThinOption::label).join("|");
        let thin = self.ask(
            &format!("Thin to ({})", menu),
            self.defaults.thin.label(),
            |answer| answer.parse::<ThinOption>().map_err(|e| e.to_string()),
        )?;
        Some((import_type, thin))
    }
}
