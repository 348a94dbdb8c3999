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

//! Rolling frame statistics and the periodic report they produce.

use std::time::Duration;

use cadence_core::clock::as_millis_f64;
use cadence_core::telemetry::{round_to, StatsReport, DURATION_DECIMALS, RATE_DECIMALS};

use crate::window::RingBuffer;

/// Number of recent frame durations averaged in each report.
pub const FRAME_WINDOW: usize = 60;

/// Accumulates per-frame durations and emits a [`StatsReport`] whenever the
/// report interval has elapsed.
///
/// The average is always taken over the last [`FRAME_WINDOW`] frames. The
/// maximum and the frame counter cover only the frames since the previous
/// report and are zeroed right after each one.
#[derive(Debug, Clone)]
pub struct FrameStatsAggregator {
    durations_ms: RingBuffer<f64, FRAME_WINDOW>,
    max_since_report_ms: f64,
    frames_since_report: u32,
    last_report_at: Duration,
    report_interval: Duration,
}

impl FrameStatsAggregator {
    /// Creates an aggregator whose first report window starts at `now`.
    pub fn new(report_interval: Duration, now: Duration) -> Self {
        Self {
            durations_ms: RingBuffer::new(),
            max_since_report_ms: 0.0,
            frames_since_report: 0,
            last_report_at: now,
            report_interval,
        }
    }

    /// Forgets every sample and restarts the report window at `now`.
    pub fn reset(&mut self, now: Duration) {
        self.durations_ms.clear();
        self.max_since_report_ms = 0.0;
        self.frames_since_report = 0;
        self.last_report_at = now;
    }

    /// Records one frame that took `duration` and finished at `frame_end`.
    ///
    /// ## Returns
    /// A report if at least one report interval has passed since the previous
    /// report. Frames per second are computed from the real elapsed time, which
    /// may exceed the nominal interval when frames are sparse.
    pub fn record(&mut self, duration: Duration, frame_end: Duration) -> Option<StatsReport> {
        let frame_ms = as_millis_f64(duration);
        self.durations_ms.push(frame_ms);
        self.max_since_report_ms = self.max_since_report_ms.max(frame_ms);
        self.frames_since_report = self.frames_since_report.saturating_add(1);

        let since_report = frame_end.saturating_sub(self.last_report_at);
        if since_report < self.report_interval {
            return None;
        }

        let elapsed_secs = since_report.as_secs_f64();
        let fps = if elapsed_secs > 0.0 {
            self.frames_since_report as f64 / elapsed_secs
        } else {
            0.0
        };

        let report = StatsReport {
            fps: round_to(fps, RATE_DECIMALS),
            render_time: round_to(frame_ms, DURATION_DECIMALS),
            avg_render_time: round_to(self.durations_ms.average(), DURATION_DECIMALS),
            max_render_time: round_to(self.max_since_report_ms, DURATION_DECIMALS),
            frames_rendered: self.frames_since_report,
        };

        self.frames_since_report = 0;
        self.max_since_report_ms = 0.0;
        self.last_report_at = frame_end;

        Some(report)
    }

    /// Number of durations currently in the rolling window.
    pub fn window_len(&self) -> usize {
        self.durations_ms.len()
    }

    /// Frames recorded since the previous report.
    pub fn frames_since_report(&self) -> u32 {
        self.frames_since_report
    }

    /// Longest frame since the previous report, in milliseconds.
    pub fn max_since_report_ms(&self) -> f64 {
        self.max_since_report_ms
    }

    /// Clock reading of the previous report (or of the window start).
    pub fn last_report_at(&self) -> Duration {
        self.last_report_at
    }

    /// Mean over the rolling window, unrounded.
    pub fn average_ms(&self) -> f64 {
        self.durations_ms.average()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const INTERVAL: Duration = Duration::from_millis(100);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn no_report_before_interval() {
        let mut agg = FrameStatsAggregator::new(INTERVAL, Duration::ZERO);
        for i in 1..=5 {
            assert!(agg.record(ms(1), ms(i * 16)).is_none());
        }
        assert_eq!(agg.frames_since_report(), 5);
    }

    #[test]
    fn report_at_interval_boundary_resets_counters() {
        let mut agg = FrameStatsAggregator::new(INTERVAL, Duration::ZERO);
        agg.record(ms(2), ms(50));
        let report = agg.record(ms(4), ms(100)).expect("boundary reached");

        assert_eq!(report.frames_rendered, 2);
        assert_relative_eq!(report.fps, 20.0);
        assert_relative_eq!(report.render_time, 4.0);
        assert_relative_eq!(report.avg_render_time, 3.0);
        assert_relative_eq!(report.max_render_time, 4.0);

        assert_eq!(agg.frames_since_report(), 0);
        assert_eq!(agg.max_since_report_ms(), 0.0);
        assert_eq!(agg.last_report_at(), ms(100));
        // The rolling window survives the report.
        assert_eq!(agg.window_len(), 2);
    }

    #[test]
    fn fps_uses_actual_elapsed_time() {
        // One frame every 500 ms: each frame crosses the 100 ms boundary.
        let mut agg = FrameStatsAggregator::new(INTERVAL, Duration::ZERO);
        for i in 1..=4 {
            let report = agg.record(ms(1), ms(i * 500)).expect("sparse frames report");
            assert_eq!(report.frames_rendered, 1);
            assert_relative_eq!(report.fps, 2.0);
        }
    }

    #[test]
    fn max_covers_only_the_current_report_window() {
        let mut agg = FrameStatsAggregator::new(INTERVAL, Duration::ZERO);
        agg.record(ms(30), ms(40));
        let first = agg.record(ms(1), ms(120)).unwrap();
        assert_relative_eq!(first.max_render_time, 30.0);

        agg.record(ms(2), ms(150));
        let second = agg.record(ms(3), ms(230)).unwrap();
        assert_relative_eq!(second.max_render_time, 3.0);
        // Average still spans all four retained frames.
        assert_relative_eq!(second.avg_render_time, 9.0);
    }

    #[test]
    fn window_is_bounded() {
        let mut agg = FrameStatsAggregator::new(INTERVAL, Duration::ZERO);
        for i in 0..1_000u64 {
            agg.record(Duration::from_micros(500), Duration::from_micros(i * 700));
            assert!(agg.window_len() <= FRAME_WINDOW);
        }
        assert_eq!(agg.window_len(), FRAME_WINDOW);
    }

    #[test]
    fn zero_interval_never_divides_by_zero() {
        let mut agg = FrameStatsAggregator::new(Duration::ZERO, ms(10));
        let report = agg.record(ms(1), ms(10)).expect("zero interval reports every frame");
        assert_eq!(report.fps, 0.0);
        assert!(report.avg_render_time.is_finite());
    }

    #[test]
    fn values_are_rounded() {
        let mut agg = FrameStatsAggregator::new(INTERVAL, Duration::ZERO);
        let report = agg
            .record(Duration::from_nanos(1_234_567), Duration::from_millis(300))
            .unwrap();
        assert_eq!(report.render_time, 1.23);
        assert_eq!(report.fps, 3.3);
    }
}
