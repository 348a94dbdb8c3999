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

//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::millis_to_duration;
use crate::schedule::SchedulingStrategy;

/// Tunables fixed at engine construction.
///
/// Workload parameters (`complexity`, `speed`) are only initial values; the
/// host changes them at runtime with protocol messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Strategy started by `init`.
    pub strategy: SchedulingStrategy,
    /// Initial synthetic workload level.
    pub complexity: u32,
    /// Initial animation speed multiplier.
    pub speed: f32,
    /// Number of particles seeded per surface.
    pub particle_count: usize,
    /// Display refresh rate assumed by the frame-callback primitive.
    pub refresh_rate_hz: f64,
    /// Delay used by the interval-capped strategy.
    pub interval_ms: f64,
    /// Minimum time between two statistics reports.
    pub report_interval_ms: f64,
    /// Age beyond which frames leave the timing overlay.
    pub timing_window_ms: f64,
    /// Draw the frame-timing strip at the top of the surface.
    pub timing_overlay: bool,
    /// Seed for particle placement; random when absent.
    pub seed: Option<u64>,
}

const DEFAULT_REFRESH_RATE_HZ: f64 = 60.0;
const DEFAULT_INTERVAL_MS: f64 = 16.67;
const DEFAULT_REPORT_INTERVAL_MS: f64 = 100.0;
const DEFAULT_TIMING_WINDOW_MS: f64 = 1000.0;

/// Longest period any timing parameter may describe.
pub const MAX_PERIOD: Duration = Duration::from_secs(3600);

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: SchedulingStrategy::FrameCallback,
            complexity: 10,
            speed: 3.0,
            particle_count: 50,
            refresh_rate_hz: DEFAULT_REFRESH_RATE_HZ,
            interval_ms: DEFAULT_INTERVAL_MS,
            report_interval_ms: DEFAULT_REPORT_INTERVAL_MS,
            timing_window_ms: DEFAULT_TIMING_WINDOW_MS,
            timing_overlay: true,
            seed: None,
        }
    }
}

fn bounded(period: Duration) -> Option<Duration> {
    (!period.is_zero() && period <= MAX_PERIOD).then_some(period)
}

fn refresh_period(rate_hz: f64) -> Option<Duration> {
    if !(rate_hz.is_finite() && rate_hz > 0.0) {
        return None;
    }
    Duration::try_from_secs_f64(1.0 / rate_hz)
        .ok()
        .and_then(bounded)
}

fn millis_period(millis: f64) -> Option<Duration> {
    bounded(millis_to_duration(millis))
}

fn millis_period_or(name: &str, millis: f64, fallback_ms: f64) -> Duration {
    millis_period(millis).unwrap_or_else(|| {
        log::warn!("Invalid {name} {millis}; using {fallback_ms}.");
        millis_to_duration(fallback_ms)
    })
}

impl EngineConfig {
    /// Replaces out-of-range values with their defaults, logging each fix.
    ///
    /// Timing values must describe a non-zero period no longer than
    /// [`MAX_PERIOD`].
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.speed.is_finite() && self.speed > 0.0) {
            log::warn!(
                "Invalid animation speed {}; using {}.",
                self.speed,
                defaults.speed
            );
            self.speed = defaults.speed;
        }
        if refresh_period(self.refresh_rate_hz).is_none() {
            log::warn!(
                "Invalid refresh rate {}; using {}.",
                self.refresh_rate_hz,
                defaults.refresh_rate_hz
            );
            self.refresh_rate_hz = defaults.refresh_rate_hz;
        }
        for (name, value, fallback) in [
            ("interval_ms", &mut self.interval_ms, defaults.interval_ms),
            (
                "report_interval_ms",
                &mut self.report_interval_ms,
                defaults.report_interval_ms,
            ),
            (
                "timing_window_ms",
                &mut self.timing_window_ms,
                defaults.timing_window_ms,
            ),
        ] {
            if millis_period(*value).is_none() {
                log::warn!("Invalid {name} {value}; using {fallback}.");
                *value = fallback;
            }
        }
        self
    }

    /// Period between two display refresh opportunities.
    ///
    /// An unusable rate falls back to the default 60Hz.
    pub fn refresh_interval(&self) -> Duration {
        refresh_period(self.refresh_rate_hz).unwrap_or_else(|| {
            log::warn!(
                "Invalid refresh rate {}; using {DEFAULT_REFRESH_RATE_HZ}.",
                self.refresh_rate_hz
            );
            Duration::from_secs_f64(1.0 / DEFAULT_REFRESH_RATE_HZ)
        })
    }

    /// Delay re-armed by the interval-capped strategy.
    pub fn interval(&self) -> Duration {
        millis_period_or("interval_ms", self.interval_ms, DEFAULT_INTERVAL_MS)
    }

    /// Minimum time between two statistics reports.
    pub fn report_interval(&self) -> Duration {
        millis_period_or(
            "report_interval_ms",
            self.report_interval_ms,
            DEFAULT_REPORT_INTERVAL_MS,
        )
    }

    /// Sliding window of the frame timing log.
    pub fn timing_window(&self) -> Duration {
        millis_period_or(
            "timing_window_ms",
            self.timing_window_ms,
            DEFAULT_TIMING_WINDOW_MS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_setup() {
        let config = EngineConfig::default();
        assert_eq!(config.strategy, SchedulingStrategy::FrameCallback);
        assert_eq!(config.complexity, 10);
        assert_eq!(config.speed, 3.0);
        assert_eq!(config.particle_count, 50);
        assert_eq!(config.report_interval(), Duration::from_millis(100));
        assert!((config.interval().as_secs_f64() * 1000.0 - 16.67).abs() < 1e-6);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"strategy":"timeout","complexity":40}"#).unwrap();
        assert_eq!(config.strategy, SchedulingStrategy::IntervalCapped);
        assert_eq!(config.complexity, 40);
        assert_eq!(config.speed, 3.0);
        assert!(config.timing_overlay);
    }

    #[test]
    fn sanitize_repairs_invalid_values() {
        let config = EngineConfig {
            speed: -1.0,
            refresh_rate_hz: 0.0,
            report_interval_ms: f64::NAN,
            ..EngineConfig::default()
        }
        .sanitized();

        assert_eq!(config.speed, 3.0);
        assert_eq!(config.refresh_rate_hz, 60.0);
        assert_eq!(config.report_interval_ms, 100.0);
    }

    #[test]
    fn sanitize_rejects_periods_too_large_for_a_duration() {
        let config = EngineConfig {
            refresh_rate_hz: 1e-300,
            interval_ms: 1e300,
            report_interval_ms: f64::INFINITY,
            timing_window_ms: 1e-12,
            ..EngineConfig::default()
        }
        .sanitized();

        assert_eq!(config.refresh_rate_hz, 60.0);
        assert_eq!(config.interval_ms, 16.67);
        assert_eq!(config.report_interval_ms, 100.0);
        assert_eq!(config.timing_window_ms, 1000.0);
    }

    #[test]
    fn accessors_fall_back_on_unsanitized_values() {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            refresh_rate_hz: 0.0,
            interval_ms: 1e300,
            report_interval_ms: -5.0,
            timing_window_ms: f64::NAN,
            ..EngineConfig::default()
        };

        assert_eq!(config.refresh_interval(), defaults.refresh_interval());
        assert_eq!(config.interval(), defaults.interval());
        assert_eq!(config.report_interval(), defaults.report_interval());
        assert_eq!(config.timing_window(), defaults.timing_window());
        assert!(defaults.refresh_interval() <= MAX_PERIOD);
    }
}
