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

//! Responsiveness monitor for the host's own loop.
//!
//! The host calls [`MainLoopMonitor::sample`] once per iteration of its
//! loop. Gaps between samples are kept for the last second; once a second of
//! wall time has elapsed a [`MainLoopReport`] is produced. Comparing it with
//! the engine's [`StatsReport`](cadence_core::StatsReport) shows whether a
//! starved host also starves the engine.

use std::collections::VecDeque;
use std::time::Duration;

use cadence_core::clock::as_millis_f64;
use cadence_core::telemetry::{round_to, DURATION_DECIMALS, RATE_DECIMALS};
use cadence_core::MainLoopReport;

/// Length of the gap window and the reporting period.
pub const REPORT_PERIOD: Duration = Duration::from_secs(1);
/// Iteration rate the frame-drop estimate is measured against.
pub const TARGET_RATE_HZ: f64 = 60.0;
/// Average gap reported when no gap survived in the window, in ms.
pub const DEFAULT_GAP_MS: f64 = 16.67;

/// Samples loop iterations and reports once per second.
#[derive(Debug, Clone)]
pub struct MainLoopMonitor {
    gaps_ms: VecDeque<f64>,
    gap_sum_ms: f64,
    max_gap_ms: f64,
    samples: u32,
    last_sample: Duration,
    last_report: Duration,
}

impl MainLoopMonitor {
    /// Starts monitoring with `now` as the previous iteration.
    pub fn new(now: Duration) -> Self {
        Self {
            gaps_ms: VecDeque::new(),
            gap_sum_ms: 0.0,
            max_gap_ms: 0.0,
            samples: 0,
            last_sample: now,
            last_report: now,
        }
    }

    /// Records one loop iteration at `now`.
    ///
    /// ## Returns
    /// A report when at least [`REPORT_PERIOD`] has passed since the last one.
    pub fn sample(&mut self, now: Duration) -> Option<MainLoopReport> {
        let gap = as_millis_f64(now.saturating_sub(self.last_sample));
        self.last_sample = now;

        self.gaps_ms.push_back(gap);
        self.gap_sum_ms += gap;
        self.max_gap_ms = self.max_gap_ms.max(gap);
        self.samples += 1;

        let window_ms = as_millis_f64(REPORT_PERIOD);
        while self.gap_sum_ms > window_ms {
            match self.gaps_ms.pop_front() {
                Some(evicted) => self.gap_sum_ms -= evicted,
                None => {
                    self.gap_sum_ms = 0.0;
                    break;
                }
            }
        }
        if self.gaps_ms.is_empty() {
            self.gap_sum_ms = 0.0;
        }

        let since_report = now.saturating_sub(self.last_report);
        if since_report < REPORT_PERIOD {
            return None;
        }

        let elapsed_secs = since_report.as_secs_f64();
        let fps = f64::from(self.samples) / elapsed_secs;
        let avg_gap = if self.gaps_ms.is_empty() {
            DEFAULT_GAP_MS
        } else {
            self.gap_sum_ms / self.gaps_ms.len() as f64
        };
        let drops = (TARGET_RATE_HZ * elapsed_secs - f64::from(self.samples)).round();

        let report = MainLoopReport {
            fps: round_to(fps, RATE_DECIMALS),
            samples: self.samples,
            max_gap: round_to(self.max_gap_ms, DURATION_DECIMALS),
            frame_drops: drops.max(0.0) as u32,
            avg_gap: round_to(avg_gap, DURATION_DECIMALS),
        };

        self.samples = 0;
        self.max_gap_ms = 0.0;
        self.last_report = now;
        Some(report)
    }

    /// Gaps currently inside the one-second window.
    pub fn window_len(&self) -> usize {
        self.gaps_ms.len()
    }

    /// Iterations counted since the last report.
    pub fn samples_since_report(&self) -> u32 {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn steady_loop_reports_no_drops() {
        let mut monitor = MainLoopMonitor::new(Duration::ZERO);
        let mut report = None;
        // 16ms gaps: the 63rd sample lands at 1008ms.
        for i in 1..=63u64 {
            report = monitor.sample(ms(i * 16));
            if i < 63 {
                assert!(report.is_none(), "early report at sample {i}");
            }
        }
        let report = report.expect("report after one second");
        assert_eq!(report.samples, 63);
        assert_eq!(report.frame_drops, 0);
        assert_relative_eq!(report.avg_gap, 16.0);
        assert_relative_eq!(report.max_gap, 16.0);
        assert_relative_eq!(report.fps, 62.5);
    }

    #[test]
    fn frozen_loop_reports_drops_and_default_gap() {
        let mut monitor = MainLoopMonitor::new(Duration::ZERO);
        // A single two-second stall.
        let report = monitor.sample(ms(2000)).unwrap();

        assert_eq!(report.samples, 1);
        assert_eq!(report.frame_drops, 119);
        assert_relative_eq!(report.max_gap, 2000.0);
        assert_relative_eq!(report.avg_gap, DEFAULT_GAP_MS);
        assert_relative_eq!(report.fps, 0.5);
        assert_eq!(monitor.window_len(), 0);
    }

    #[test]
    fn window_holds_at_most_one_second_of_gaps() {
        let mut monitor = MainLoopMonitor::new(Duration::ZERO);
        for i in 1..=200u64 {
            monitor.sample(ms(i * 10));
        }
        // 100 gaps of 10ms fill the window exactly.
        assert_eq!(monitor.window_len(), 100);
    }

    #[test]
    fn max_gap_resets_after_each_report() {
        let mut monitor = MainLoopMonitor::new(Duration::ZERO);
        monitor.sample(ms(500));
        let first = monitor.sample(ms(1000)).unwrap();
        assert_relative_eq!(first.max_gap, 500.0);

        monitor.sample(ms(1100));
        let second = monitor.sample(ms(2000)).unwrap();
        assert_relative_eq!(second.max_gap, 900.0);
        assert_eq!(second.samples, 2);
    }
}
