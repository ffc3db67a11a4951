// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Progress reporter that renders to the log.

use std::time::Duration;

use lidar_lite_core::{Progress, RenderThrottle, Stage};

/// Emits stage changes at info and throttled stage progress at debug
#[derive(Debug, Clone)]
pub struct TracingProgress {
    throttle: RenderThrottle,
    stage: Stage,
    closed: bool,
}

impl TracingProgress {
    pub fn new(interval: Duration) -> Self {
        Self {
            throttle: RenderThrottle::new(interval),
            stage: Stage::Start,
            closed: false,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Progress for TracingProgress {
    fn set_stage(&mut self, stage: Stage, label: &str) {
        self.stage = stage;
        self.throttle.reset();
        tracing::info!(
            stage = stage.name(),
            overall = stage.overall_percent(),
            "{}",
            label
        );
    }

    fn set_sub_progress(&mut self, percent: f64, label: &str) {
        tracing::debug!(
            stage = self.stage.name(),
            percent,
            "{}",
            label
        );
    }

    fn should_render(&mut self) -> bool {
        self.throttle.ready()
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            tracing::debug!(stage = self.stage.name(), "Progress closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttles_refreshes() {
        let mut progress = TracingProgress::new(Duration::from_secs(3600));
        assert!(progress.should_render());
        assert!(!progress.should_render());

        progress.set_stage(Stage::Thinning, "Total Progress");
        assert_eq!(progress.stage(), Stage::Thinning);
        assert!(progress.should_render());
    }

    #[test]
    fn test_close_is_recorded() {
        let mut progress = TracingProgress::new(Duration::ZERO);
        progress.close();
        progress.close();
        assert!(progress.is_closed());
    }
}
