// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Engine-side telemetry: rolling statistics plus the timing log.

use std::time::Duration;

use cadence_core::{EngineConfig, StatsReport};

use crate::frame_stats::FrameStatsAggregator;
use crate::timing_log::{FrameSpan, FrameTimingLog};

/// Service that records every rendered frame into the stats window and the
/// timing log.
#[derive(Debug, Clone)]
pub struct TelemetryService {
    stats: FrameStatsAggregator,
    timing: FrameTimingLog,
    frames_total: u64,
}

impl TelemetryService {
    /// Creates a service reporting every `report_interval`, keeping
    /// `timing_window` of frames for the overlay.
    pub fn new(report_interval: Duration, timing_window: Duration, now: Duration) -> Self {
        Self {
            stats: FrameStatsAggregator::new(report_interval, now),
            timing: FrameTimingLog::new(timing_window),
            frames_total: 0,
        }
    }

    /// Creates a service from the engine configuration.
    pub fn from_config(config: &EngineConfig, now: Duration) -> Self {
        Self::new(config.report_interval(), config.timing_window(), now)
    }

    /// Records a finished frame.
    ///
    /// ## Returns
    /// The statistics report due at the end of this frame, if any.
    pub fn record_frame(&mut self, span: FrameSpan) -> Option<StatsReport> {
        self.timing.push(span);
        self.frames_total += 1;
        let report = self.stats.record(span.duration(), span.end);
        if let Some(report) = &report {
            log::trace!(
                "Stats report: {:.1} fps, avg {:.2} ms over {} frames",
                report.fps,
                report.avg_render_time,
                report.frames_rendered
            );
        }
        report
    }

    /// Drops all samples and restarts the report window at `now`.
    pub fn reset(&mut self, now: Duration) {
        self.stats.reset(now);
        self.timing.clear();
    }

    /// The timing log feeding the overlay.
    pub fn timing_log(&self) -> &FrameTimingLog {
        &self.timing
    }

    /// The rolling statistics aggregator.
    pub fn stats(&self) -> &FrameStatsAggregator {
        &self.stats
    }

    /// Frames recorded since construction, across resets.
    pub fn frames_total(&self) -> u64 {
        self.frames_total
    }
}

impl Default for TelemetryService {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default(), Duration::ZERO)
    }
}
