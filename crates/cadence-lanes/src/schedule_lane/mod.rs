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

//! Scheduling lanes - decide when the next frame runs.
//!
//! Every strategy exposes the same capability set: arm the next frame,
//! cancel an armed frame, and say whether it renders on external triggers.
//! The engine dispatches over the active variant of [`ScheduleLane`].

use std::time::Duration;

use cadence_core::{EngineConfig, PrimitiveKind, ScheduleHandle, Scheduler, SchedulingStrategy};

/// The active scheduling strategy with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleLane {
    /// Re-arms on the next display refresh.
    FrameCallback,
    /// Re-arms with a fixed-delay timer.
    IntervalCapped {
        /// Delay between the end of one frame and the next firing.
        interval: Duration,
    },
    /// Never re-arms; renders on pointer movement and explicit triggers.
    EventDriven,
}

impl ScheduleLane {
    /// Builds the lane for `strategy` using the delays in `config`.
    pub fn for_strategy(strategy: SchedulingStrategy, config: &EngineConfig) -> Self {
        match strategy {
            SchedulingStrategy::FrameCallback => ScheduleLane::FrameCallback,
            SchedulingStrategy::IntervalCapped => ScheduleLane::IntervalCapped {
                interval: config.interval(),
            },
            SchedulingStrategy::EventDriven => ScheduleLane::EventDriven,
        }
    }

    /// The strategy this lane implements.
    pub fn strategy(&self) -> SchedulingStrategy {
        match self {
            ScheduleLane::FrameCallback => SchedulingStrategy::FrameCallback,
            ScheduleLane::IntervalCapped { .. } => SchedulingStrategy::IntervalCapped,
            ScheduleLane::EventDriven => SchedulingStrategy::EventDriven,
        }
    }

    /// Returns a human-readable identifier for this strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy().name()
    }

    /// The primitive this lane arms, if any.
    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match self {
            ScheduleLane::FrameCallback => Some(PrimitiveKind::FrameCallback),
            ScheduleLane::IntervalCapped { .. } => Some(PrimitiveKind::Timer),
            ScheduleLane::EventDriven => None,
        }
    }

    /// Arms the next frame.
    ///
    /// ## Arguments
    /// * `scheduler`: the execution context's scheduling primitives.
    ///
    /// ## Returns
    /// The handle of the armed primitive, or `None` for the event-driven lane.
    pub fn arm(&self, scheduler: &mut dyn Scheduler) -> Option<ScheduleHandle> {
        let handle = match self {
            ScheduleLane::FrameCallback => scheduler.request_frame(),
            ScheduleLane::IntervalCapped { interval } => scheduler.set_timeout(*interval),
            ScheduleLane::EventDriven => return None,
        };
        log::trace!("{} armed {}", self.strategy_name(), handle);
        Some(handle)
    }

    /// Cancels the primitive held in `pending`, leaving it empty.
    ///
    /// ## Returns
    /// `true` if a primitive was still outstanding.
    pub fn disarm(pending: &mut Option<ScheduleHandle>, scheduler: &mut dyn Scheduler) -> bool {
        match pending.take() {
            Some(handle) => {
                let cancelled = scheduler.cancel(handle);
                log::trace!("Cancelled {handle} (outstanding: {cancelled})");
                cancelled
            }
            None => false,
        }
    }

    /// Whether pointer movement and explicit triggers render a frame.
    pub fn renders_on_trigger(&self) -> bool {
        matches!(self, ScheduleLane::EventDriven)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingScheduler {
        next: u64,
        frames: u32,
        timers: Vec<Duration>,
        cancelled: Vec<ScheduleHandle>,
    }

    impl Scheduler for CountingScheduler {
        fn request_frame(&mut self) -> ScheduleHandle {
            self.next += 1;
            self.frames += 1;
            ScheduleHandle::from_raw(self.next)
        }

        fn set_timeout(&mut self, delay: Duration) -> ScheduleHandle {
            self.next += 1;
            self.timers.push(delay);
            ScheduleHandle::from_raw(self.next)
        }

        fn cancel(&mut self, handle: ScheduleHandle) -> bool {
            self.cancelled.push(handle);
            true
        }
    }

    #[test]
    fn lanes_follow_their_strategy() {
        let config = EngineConfig::default();
        for strategy in SchedulingStrategy::ALL {
            let lane = ScheduleLane::for_strategy(strategy, &config);
            assert_eq!(lane.strategy(), strategy);
            assert_eq!(lane.primitive().is_some(), strategy.is_self_driving());
        }
    }

    #[test]
    fn each_lane_arms_its_own_primitive() {
        let config = EngineConfig::default();
        let mut scheduler = CountingScheduler::default();

        let frame = ScheduleLane::FrameCallback.arm(&mut scheduler);
        let timer = ScheduleLane::for_strategy(SchedulingStrategy::IntervalCapped, &config)
            .arm(&mut scheduler);
        let event = ScheduleLane::EventDriven.arm(&mut scheduler);

        assert_eq!(frame, Some(ScheduleHandle::from_raw(1)));
        assert_eq!(timer, Some(ScheduleHandle::from_raw(2)));
        assert_eq!(event, None);
        assert_eq!(scheduler.frames, 1);
        assert_eq!(scheduler.timers, vec![config.interval()]);
    }

    #[test]
    fn disarm_empties_the_slot_once() {
        let mut scheduler = CountingScheduler::default();
        let mut pending = ScheduleLane::FrameCallback.arm(&mut scheduler);

        assert!(ScheduleLane::disarm(&mut pending, &mut scheduler));
        assert!(pending.is_none());
        assert!(!ScheduleLane::disarm(&mut pending, &mut scheduler));
        assert_eq!(scheduler.cancelled.len(), 1);
    }

    #[test]
    fn only_event_driven_renders_on_trigger() {
        assert!(ScheduleLane::EventDriven.renders_on_trigger());
        assert!(!ScheduleLane::FrameCallback.renders_on_trigger());
        assert!(!ScheduleLane::IntervalCapped {
            interval: Duration::from_millis(16)
        }
        .renders_on_trigger());
    }
}
