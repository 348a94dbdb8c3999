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

//! A single-threaded cooperative event loop.
//!
//! The loop never runs callbacks itself. Its owner asks for the next
//! deadline, waits for it (on a real clock) or jumps to it (on a
//! [`ManualClock`]), then collects the primitives that are due with
//! [`CooperativeLoop::pop_due`] and dispatches them.

use std::collections::BTreeMap;
use std::time::Duration;

use cadence_core::{Clock, ManualClock, PrimitiveKind, ScheduleHandle, Scheduler};

const FALLBACK_REFRESH: Duration = Duration::from_nanos(16_666_667);

/// A primitive whose deadline has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    /// The handle returned when the primitive was armed.
    pub handle: ScheduleHandle,
    /// What kind of primitive fired.
    pub kind: PrimitiveKind,
    /// The deadline it was due at.
    pub due: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    kind: PrimitiveKind,
    due: Duration,
}

/// Frame callbacks and timers over an injected [`Clock`].
///
/// Frame callbacks are due at the next refresh boundary strictly after the
/// request, boundaries being whole multiples of the refresh interval on the
/// clock. Timers are due `delay` after the request. While the loop is
/// hidden, frame callbacks are held back and timers keep firing.
#[derive(Debug)]
pub struct CooperativeLoop<C: Clock> {
    clock: C,
    refresh_interval: Duration,
    next_id: u64,
    pending: BTreeMap<ScheduleHandle, Pending>,
    visible: bool,
}

impl<C: Clock> CooperativeLoop<C> {
    /// Creates a visible loop with the given refresh interval.
    pub fn new(clock: C, refresh_interval: Duration) -> Self {
        let refresh_interval = if refresh_interval.is_zero() {
            log::warn!("Zero refresh interval; falling back to 60Hz.");
            FALLBACK_REFRESH
        } else {
            refresh_interval
        };
        Self {
            clock,
            refresh_interval,
            next_id: 0,
            pending: BTreeMap::new(),
            visible: true,
        }
    }

    /// The loop's clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Period between two refresh boundaries.
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Shows or hides the surface. Hidden loops hold back frame callbacks.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            log::debug!("Surface visibility changed: {visible}");
        }
        self.visible = visible;
    }

    /// Whether frame callbacks are currently delivered.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of armed primitives, held-back frame callbacks included.
    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    /// Whether `handle` is still armed.
    pub fn is_pending(&self, handle: ScheduleHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    /// Earliest deadline among deliverable primitives.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending
            .values()
            .filter(|p| self.deliverable(p))
            .map(|p| p.due)
            .min()
    }

    /// Removes and returns every deliverable primitive due at or before
    /// `now`, ordered by deadline then by arming order.
    pub fn pop_due(&mut self, now: Duration) -> Vec<Fired> {
        let mut due: Vec<Fired> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= now && self.deliverable(p))
            .map(|(&handle, p)| Fired {
                handle,
                kind: p.kind,
                due: p.due,
            })
            .collect();
        due.sort_by_key(|fired| (fired.due, fired.handle));
        for fired in &due {
            self.pending.remove(&fired.handle);
        }
        due
    }

    fn deliverable(&self, pending: &Pending) -> bool {
        self.visible || pending.kind != PrimitiveKind::FrameCallback
    }

    fn next_boundary(&self, now: Duration) -> Duration {
        let period = self.refresh_interval.as_nanos();
        let ticks = now.as_nanos() / period + 1;
        let nanos = ticks.saturating_mul(period);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    fn arm(&mut self, kind: PrimitiveKind, due: Duration) -> ScheduleHandle {
        self.next_id += 1;
        let handle = ScheduleHandle::from_raw(self.next_id);
        self.pending.insert(handle, Pending { kind, due });
        handle
    }
}

impl<C: Clock> Scheduler for CooperativeLoop<C> {
    fn request_frame(&mut self) -> ScheduleHandle {
        let due = self.next_boundary(self.clock.now());
        self.arm(PrimitiveKind::FrameCallback, due)
    }

    fn set_timeout(&mut self, delay: Duration) -> ScheduleHandle {
        let due = self.clock.now().saturating_add(delay);
        self.arm(PrimitiveKind::Timer, due)
    }

    fn cancel(&mut self, handle: ScheduleHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }
}

impl CooperativeLoop<ManualClock> {
    /// Jumps the manual clock from deadline to deadline up to `until`,
    /// handing each fired primitive to `on_fire`.
    ///
    /// The callback receives the loop so it can arm or cancel primitives;
    /// anything it arms before `until` fires in the same run. The clock
    /// finishes at `until` (or where it was, if that is later).
    ///
    /// ## Returns
    /// The number of primitives fired.
    pub fn run_until<F>(&mut self, until: Duration, mut on_fire: F) -> usize
    where
        F: FnMut(&mut Self, Fired),
    {
        let mut fired = 0;
        while let Some(deadline) = self.next_deadline() {
            if deadline > until {
                break;
            }
            self.clock.set(deadline);
            let now = self.clock.now();
            for primitive in self.pop_due(now) {
                on_fire(self, primitive);
                fired += 1;
            }
        }
        self.clock.set(until);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFRESH: Duration = Duration::from_millis(16);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn frame_callbacks_land_on_the_next_boundary() {
        let clock = ManualClock::starting_at(ms(5));
        let mut event_loop = CooperativeLoop::new(clock.clone(), REFRESH);

        let handle = event_loop.request_frame();
        assert_eq!(event_loop.next_deadline(), Some(ms(16)));

        clock.set(ms(16));
        let fired = event_loop.pop_due(clock.now());
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].handle, handle);
        assert_eq!(fired[0].kind, PrimitiveKind::FrameCallback);

        // Requested exactly on a boundary: runs on the following one.
        event_loop.request_frame();
        assert_eq!(event_loop.next_deadline(), Some(ms(32)));
    }

    #[test]
    fn timers_fire_after_their_delay() {
        let clock = ManualClock::starting_at(ms(5));
        let mut event_loop = CooperativeLoop::new(clock.clone(), REFRESH);
        event_loop.set_timeout(ms(10));

        assert!(event_loop.pop_due(ms(14)).is_empty());
        assert_eq!(event_loop.pop_due(ms(15)).len(), 1);
        assert_eq!(event_loop.outstanding(), 0);
    }

    #[test]
    fn cancelled_primitives_never_fire() {
        let clock = ManualClock::new();
        let mut event_loop = CooperativeLoop::new(clock, REFRESH);
        let frame = event_loop.request_frame();
        let timer = event_loop.set_timeout(ms(1));

        assert!(event_loop.cancel(frame));
        assert!(!event_loop.cancel(frame));
        assert!(event_loop.cancel(timer));
        assert_eq!(event_loop.next_deadline(), None);
        assert!(event_loop.pop_due(ms(1_000)).is_empty());
    }

    #[test]
    fn hidden_loop_holds_back_frame_callbacks_only() {
        let clock = ManualClock::new();
        let mut event_loop = CooperativeLoop::new(clock, REFRESH);
        event_loop.set_visible(false);
        event_loop.request_frame();
        let timer = event_loop.set_timeout(ms(40));

        assert_eq!(event_loop.next_deadline(), Some(ms(40)));
        let fired = event_loop.pop_due(ms(100));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].handle, timer);
        assert_eq!(event_loop.outstanding(), 1);

        event_loop.set_visible(true);
        assert_eq!(event_loop.pop_due(ms(100)).len(), 1);
    }

    #[test]
    fn fired_order_follows_deadlines() {
        let clock = ManualClock::new();
        let mut event_loop = CooperativeLoop::new(clock, REFRESH);
        let late = event_loop.set_timeout(ms(30));
        let early = event_loop.set_timeout(ms(10));

        let order: Vec<_> = event_loop
            .pop_due(ms(50))
            .into_iter()
            .map(|f| f.handle)
            .collect();
        assert_eq!(order, vec![early, late]);
    }

    #[test]
    fn run_until_drives_a_self_rearming_callback() {
        let clock = ManualClock::new();
        let mut event_loop = CooperativeLoop::new(clock.clone(), REFRESH);
        event_loop.request_frame();

        let fired = event_loop.run_until(ms(160), |event_loop, _| {
            event_loop.request_frame();
        });

        assert_eq!(fired, 10);
        assert_eq!(clock.now(), ms(160));
        assert_eq!(event_loop.outstanding(), 1);
    }

    #[test]
    fn zero_refresh_interval_falls_back() {
        let event_loop = CooperativeLoop::new(ManualClock::new(), Duration::ZERO);
        assert_eq!(event_loop.refresh_interval(), FALLBACK_REFRESH);
    }
}
