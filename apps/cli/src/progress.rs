// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-bar terminal progress.

use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use lidar_lite_core::{Progress, RenderThrottle, Stage};

const TEMPLATE: &str = "{prefix:>8} [{bar:40.cyan/blue}] {pos:>3}% {msg}";

/// Overall bar on top, stage bar below
pub struct BarProgress {
    bars: MultiProgress,
    overall: ProgressBar,
    stage: ProgressBar,
    throttle: RenderThrottle,
}

impl BarProgress {
    pub fn new(interval: Duration) -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr(), interval)
    }

    pub fn with_draw_target(target: ProgressDrawTarget, interval: Duration) -> Self {
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");

        let bars = MultiProgress::with_draw_target(target);
        let overall = bars.add(ProgressBar::new(100).with_style(style.clone()));
        overall.set_prefix("Total");
        let stage = bars.add(ProgressBar::new(100).with_style(style));
        stage.set_prefix("Stage");

        Self {
            bars,
            overall,
            stage,
            throttle: RenderThrottle::new(interval),
        }
    }

    /// Position of the overall and stage bars
    pub fn positions(&self) -> (u64, u64) {
        (self.overall.position(), self.stage.position())
    }

    /// True once both bars have been closed
    pub fn is_finished(&self) -> bool {
        self.overall.is_finished() && self.stage.is_finished()
    }
}

fn to_position(percent: f64) -> u64 {
    percent.clamp(0.0, 100.0).round() as u64
}

impl Progress for BarProgress {
    fn set_stage(&mut self, stage: Stage, label: &str) {
        self.overall.set_position(to_position(stage.overall_percent()));
        self.overall.set_message(format!("{} - {}", label, stage.name()));
        self.stage.set_position(0);
        self.stage.set_message(stage.name());
        self.throttle.reset();
    }

    fn set_sub_progress(&mut self, percent: f64, label: &str) {
        self.stage.set_position(to_position(percent));
        self.stage.set_message(label.to_string());
    }

    fn should_render(&mut self) -> bool {
        self.throttle.ready()
    }

    fn close(&mut self) {
        self.overall.finish_and_clear();
        self.stage.finish_and_clear();
        if let Err(e) = self.bars.clear() {
            tracing::debug!(error = %e, "Could not clear progress bars");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden() -> BarProgress {
        BarProgress::with_draw_target(ProgressDrawTarget::hidden(), Duration::from_secs(3600))
    }

    #[test]
    fn test_stage_moves_overall_bar() {
        let mut progress = hidden();
        progress.set_sub_progress(40.0, "Reading");
        progress.set_stage(Stage::Triangulating, "Total Progress");
        assert_eq!(progress.positions(), (33, 0));

        progress.set_sub_progress(250.0, "Triangulating");
        assert_eq!(progress.positions(), (33, 100));
    }

    #[test]
    fn test_refresh_is_throttled() {
        let mut progress = hidden();
        assert!(progress.should_render());
        assert!(!progress.should_render());
        progress.set_stage(Stage::AddingFaces, "Total Progress");
        assert!(progress.should_render());
        assert!(!progress.is_finished());
        progress.close();
        assert!(progress.is_finished());
    }
}
