// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-level progress reporting
//!
//! Every pipeline stage receives a `&mut dyn Progress`. The overall bar moves
//! once per stage; the stage bar is refreshed from inside long loops, but only
//! when the reporter says a refresh is due:
//!
//! ```rust,ignore
//! for (i, record) in records.enumerate() {
//!     // ... work ...
//!     if progress.should_render() {
//!         progress.set_sub_progress(i as f64 * 100.0 / total as f64, "Reading");
//!     }
//! }
//! ```

use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

/// Overall pipeline milestones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Start,
    Reading,
    Thinning,
    Triangulating,
    AddingPoints,
    AddingFaces,
}

impl Stage {
    /// Position of the overall bar for this stage (0-100)
    pub fn overall_percent(self) -> f64 {
        match self {
            Stage::Start | Stage::Reading => 0.0,
            Stage::Thinning => 25.0,
            Stage::Triangulating => 33.0,
            Stage::AddingPoints => 50.0,
            Stage::AddingFaces => 66.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Start => "Starting",
            Stage::Reading => "Reading Point Data",
            Stage::Thinning => "Thinning Points",
            Stage::Triangulating => "Triangulating Faces",
            Stage::AddingPoints => "Adding Construction Points",
            Stage::AddingFaces => "Adding Faces",
        }
    }
}

/// Progress capability passed into every stage
pub trait Progress {
    /// Move the overall bar to a stage and reset the stage bar
    fn set_stage(&mut self, stage: Stage, label: &str);

    /// Update the stage bar (0-100)
    fn set_sub_progress(&mut self, percent: f64, label: &str);

    /// Whether a refresh is worth rendering now
    fn should_render(&mut self) -> bool;

    /// Release the rendering resource. Called once when the pipeline exits.
    fn close(&mut self) {}
}

/// Reporter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn set_stage(&mut self, _stage: Stage, _label: &str) {}

    fn set_sub_progress(&mut self, _percent: f64, _label: &str) {}

    fn should_render(&mut self) -> bool {
        false
    }
}

/// Scoped use of a reporter; closes it on drop, on every exit path
pub struct ProgressScope<'a, P: Progress + ?Sized> {
    inner: &'a mut P,
}

impl<'a, P: Progress + ?Sized> ProgressScope<'a, P> {
    pub fn new(inner: &'a mut P) -> Self {
        Self { inner }
    }
}

impl<P: Progress + ?Sized> Deref for ProgressScope<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.inner
    }
}

impl<P: Progress + ?Sized> DerefMut for ProgressScope<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.inner
    }
}

impl<P: Progress + ?Sized> Drop for ProgressScope<'_, P> {
    fn drop(&mut self) {
        self.inner.close();
    }
}

/// Time-based refresh throttle shared by concrete reporters
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl RenderThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True at most once per interval; the first call is always ready
    pub fn ready(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last refresh so the next call renders
    pub fn reset(&mut self) {
        self.last = None;
    }
}
