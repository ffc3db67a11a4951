// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User interaction contract.
//!
//! A `None` from either prompt is a cancellation: the import stops before
//! touching the host scene.

use crate::options::{ImportOptions, ImportType, SelectionOptions, ThinOption};

pub trait ImportPrompt {
    /// Classes to import and unit overrides
    fn import_options(&mut self) -> Option<SelectionOptions>;

    /// Import type and thinning, shown with the number of records found
    fn import_type(&mut self, record_count: u64) -> Option<(ImportType, ThinOption)>;
}

/// Prompt that answers with preset choices
#[derive(Debug, Clone, Default)]
pub struct FixedPrompt {
    options: ImportOptions,
    cancel_options: bool,
    cancel_type: bool,
    offered_record_count: Option<u64>,
}

impl FixedPrompt {
    pub fn new(options: ImportOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Cancel at the options prompt
    pub fn cancel_at_options(mut self) -> Self {
        self.cancel_options = true;
        self
    }

    /// Cancel at the import type prompt
    pub fn cancel_at_type(mut self) -> Self {
        self.cancel_type = true;
        self
    }

    /// Record count passed to the import type prompt, if it was shown
    pub fn offered_record_count(&self) -> Option<u64> {
        self.offered_record_count
    }
}

impl From<ImportOptions> for FixedPrompt {
    fn from(options: ImportOptions) -> Self {
        Self::new(options)
    }
}

impl ImportPrompt for FixedPrompt {
    fn import_options(&mut self) -> Option<SelectionOptions> {
        (!self.cancel_options).then_some(self.options.selection)
    }

    fn import_type(&mut self, record_count: u64) -> Option<(ImportType, ThinOption)> {
        self.offered_record_count = Some(record_count);
        (!self.cancel_type).then_some((self.options.import_type, self.options.thin))
    }
}
