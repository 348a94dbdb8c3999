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

//! A stopwatch driven by an injected [`Clock`].

use std::time::Duration;

use crate::clock::{as_millis_f64, Clock};

/// Measures the time elapsed since it was started on a given clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stopwatch {
    started_at: Duration,
}

impl Stopwatch {
    /// Starts a stopwatch at the clock's current time.
    #[inline]
    pub fn start<C: Clock + ?Sized>(clock: &C) -> Self {
        Self {
            started_at: clock.now(),
        }
    }

    /// The clock reading at start.
    #[inline]
    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    /// Returns the time elapsed since start.
    #[inline]
    pub fn elapsed<C: Clock + ?Sized>(&self, clock: &C) -> Duration {
        clock.now().saturating_sub(self.started_at)
    }

    /// Returns the time elapsed since start in fractional milliseconds.
    #[inline]
    pub fn elapsed_ms_f64<C: Clock + ?Sized>(&self, clock: &C) -> f64 {
        as_millis_f64(self.elapsed(clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, MonotonicClock};

    #[test]
    fn stopwatch_measures_manual_steps() {
        let clock = ManualClock::starting_at(Duration::from_millis(100));
        let watch = Stopwatch::start(&clock);
        assert_eq!(watch.started_at(), Duration::from_millis(100));
        assert_eq!(watch.elapsed(&clock), Duration::ZERO);

        clock.advance(Duration::from_micros(2_500));
        assert_eq!(watch.elapsed(&clock), Duration::from_micros(2_500));
        assert_eq!(watch.elapsed_ms_f64(&clock), 2.5);
    }

    #[test]
    fn stopwatch_on_real_clock_is_small_initially() {
        let clock = MonotonicClock::new();
        let watch = Stopwatch::start(&clock);
        assert!(watch.elapsed(&clock) < Duration::from_millis(15));
    }
}
