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

use std::time::Duration;

use approx::assert_relative_eq;
use cadence_telemetry::{FrameClass, FrameSpan, TelemetryService, FRAME_WINDOW};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn steady_sixty_hz_reports_ten_times_a_second() {
    let mut service = TelemetryService::new(ms(100), ms(1000), Duration::ZERO);
    let mut reports = Vec::new();

    // 2ms frames every 10ms for one second.
    for i in 0..100u64 {
        let start = ms(i * 10 + 8);
        if let Some(report) = service.record_frame(FrameSpan::new(start, start + ms(2))) {
            reports.push(report);
        }
    }

    assert_eq!(reports.len(), 10);
    for report in &reports {
        assert_relative_eq!(report.fps, 100.0);
        assert_relative_eq!(report.render_time, 2.0);
        assert_relative_eq!(report.avg_render_time, 2.0);
        assert_eq!(report.frames_rendered, 10);
    }
    assert_eq!(service.frames_total(), 100);
    assert_eq!(service.stats().window_len(), FRAME_WINDOW);
}

#[test]
fn sparse_frames_use_real_elapsed_time() {
    let mut service = TelemetryService::new(ms(100), ms(1000), Duration::ZERO);
    assert!(service.record_frame(FrameSpan::new(ms(0), ms(1))).is_none());

    // Next frame arrives long after the interval.
    let report = service
        .record_frame(FrameSpan::new(ms(999), ms(1000)))
        .expect("report");
    assert_relative_eq!(report.fps, 2.0);
    assert_eq!(report.frames_rendered, 2);
}

#[test]
fn reset_clears_timing_log_but_keeps_total() {
    let mut service = TelemetryService::new(ms(100), ms(1000), Duration::ZERO);
    service.record_frame(FrameSpan::new(ms(0), ms(40)));
    assert_eq!(service.timing_log().len(), 1);
    assert_eq!(
        service.timing_log().iter().next().map(FrameSpan::class),
        Some(FrameClass::Dropped)
    );

    service.reset(ms(50));
    assert!(service.timing_log().is_empty());
    assert_eq!(service.stats().window_len(), 0);
    assert_eq!(service.frames_total(), 1);
}
