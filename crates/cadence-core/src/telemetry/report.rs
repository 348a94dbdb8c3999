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

//! Statistics reports and their rounding rules.

use serde::{Deserialize, Serialize};

/// Decimal places kept for rates (frames per second).
pub const RATE_DECIMALS: u32 = 1;
/// Decimal places kept for durations (milliseconds).
pub const DURATION_DECIMALS: u32 = 2;

/// Rounds `value` to `decimals` decimal places, half away from zero.
///
/// ```
/// use cadence_core::telemetry::round_to;
/// assert_eq!(round_to(59.96, 1), 60.0);
/// assert_eq!(round_to(3.14159, 2), 3.14);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// A periodic report of the engine's own rendering performance.
///
/// Durations are in milliseconds. Every value is already rounded
/// ([`RATE_DECIMALS`] for `fps`, [`DURATION_DECIMALS`] for durations).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    /// Frames rendered since the previous report divided by the real elapsed time.
    pub fps: f64,
    /// Duration of the most recently rendered frame.
    pub render_time: f64,
    /// Mean duration over the rolling sample window.
    pub avg_render_time: f64,
    /// Longest frame since the previous report.
    pub max_render_time: f64,
    /// Frames rendered since the previous report.
    pub frames_rendered: u32,
}

/// A once-per-second report of the host loop's own responsiveness.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainLoopReport {
    /// Observed loop iterations per second.
    pub fps: f64,
    /// Loop iterations counted since the previous report.
    pub samples: u32,
    /// Largest gap between two iterations since the previous report, in ms.
    pub max_gap: f64,
    /// Shortfall against an ideal 60 iterations per second, floored at zero.
    pub frame_drops: u32,
    /// Mean gap over the last second of iterations, in ms.
    pub avg_gap: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_rules() {
        assert_eq!(round_to(16.666_666, DURATION_DECIMALS), 16.67);
        assert_eq!(round_to(2.04, RATE_DECIMALS), 2.0);
        assert_eq!(round_to(f64::INFINITY, 1), 0.0);
        assert_eq!(round_to(f64::NAN, 2), 0.0);
    }

    #[test]
    fn stats_report_uses_camel_case_on_the_wire() {
        let report = StatsReport {
            fps: 60.0,
            render_time: 1.25,
            avg_render_time: 1.5,
            max_render_time: 3.0,
            frames_rendered: 6,
        };
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["renderTime"], 1.25);
        assert_eq!(json["avgRenderTime"], 1.5);
        assert_eq!(json["maxRenderTime"], 3.0);
        assert_eq!(json["framesRendered"], 6);
    }
}
