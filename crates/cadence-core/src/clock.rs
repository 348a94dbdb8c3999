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

//! Monotonic time sources.
//!
//! Every timestamp handled by the engine is a [`Duration`] measured from the
//! origin of the clock that produced it. The engine never reads the wall clock
//! directly; it is handed a [`Clock`] at construction time, which lets tests
//! drive time forward in controlled steps with a [`ManualClock`].

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic source of time.
pub trait Clock: Send + Sync + Debug {
    /// Returns the time elapsed since this clock's origin.
    ///
    /// Successive calls never return a smaller value.
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// A [`Clock`] backed by [`Instant`], with its origin at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose origin is the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A [`Clock`] that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one clone and
/// advance it while the engine reads another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a manual clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manual clock reading `start`.
    pub fn starting_at(start: Duration) -> Self {
        let clock = Self::new();
        clock.set(start);
        clock
    }

    /// Moves the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.nanos.fetch_add(duration_to_nanos(step), Ordering::SeqCst);
    }

    /// Moves the clock to `time`. Requests to go backwards are ignored.
    pub fn set(&self, time: Duration) {
        self.nanos.fetch_max(duration_to_nanos(time), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

fn duration_to_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

/// Converts a duration to fractional milliseconds.
#[inline]
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

/// Converts fractional milliseconds to a duration.
///
/// Negative and NaN input gives zero; input too large for a [`Duration`]
/// saturates to [`Duration::MAX`].
#[inline]
pub fn millis_to_duration(millis: f64) -> Duration {
    if millis.is_nan() || millis <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(millis / 1000.0).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn manual_clock_starts_at_zero_and_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(4));
        assert_eq!(clock.now(), Duration::from_millis(20));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let observer = clock.clone();

        clock.advance(Duration::from_millis(250));
        assert_eq!(observer.now(), Duration::from_millis(250));
    }

    #[test]
    fn manual_clock_never_goes_backwards() {
        let clock = ManualClock::starting_at(Duration::from_secs(2));
        clock.set(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(2));
    }

    #[test]
    fn monotonic_clock_is_non_decreasing() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn arc_clock_delegates() {
        let clock = Arc::new(ManualClock::starting_at(Duration::from_millis(5)));
        assert_eq!(Clock::now(&clock), Duration::from_millis(5));
    }

    #[test]
    fn millisecond_conversions() {
        assert_relative_eq!(
            as_millis_f64(Duration::from_micros(16_670)),
            16.67,
            epsilon = 1e-9
        );
        assert_eq!(millis_to_duration(-3.0), Duration::ZERO);
        assert_eq!(millis_to_duration(f64::NAN), Duration::ZERO);
        assert_eq!(millis_to_duration(100.0), Duration::from_millis(100));
        assert_eq!(millis_to_duration(1e300), Duration::MAX);
        assert_eq!(millis_to_duration(f64::INFINITY), Duration::MAX);
    }
}
