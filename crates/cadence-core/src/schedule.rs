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

//! Scheduling strategies and the contract for the primitives that drive them.
//!
//! A strategy decides *when* the next frame is produced. The two self-driving
//! strategies re-arm a [`Scheduler`] primitive after every frame; the engine
//! holds the returned [`ScheduleHandle`] so it can cancel it before switching
//! or stopping.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::protocol::ProtocolError;

/// The policy governing when the next frame is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchedulingStrategy {
    /// Re-arms on the next display refresh opportunity.
    #[default]
    #[serde(alias = "raf")]
    FrameCallback,
    /// Re-arms with a fixed-delay timer targeting 60Hz.
    #[serde(alias = "timeout")]
    IntervalCapped,
    /// Never re-arms; renders only in response to external triggers.
    #[serde(alias = "event")]
    EventDriven,
}

impl SchedulingStrategy {
    /// Every strategy, in presentation order.
    pub const ALL: [SchedulingStrategy; 3] = [
        SchedulingStrategy::FrameCallback,
        SchedulingStrategy::IntervalCapped,
        SchedulingStrategy::EventDriven,
    ];

    /// The canonical wire name of the strategy.
    pub const fn name(self) -> &'static str {
        match self {
            SchedulingStrategy::FrameCallback => "frame-callback",
            SchedulingStrategy::IntervalCapped => "interval-capped",
            SchedulingStrategy::EventDriven => "event-driven",
        }
    }

    /// Whether the strategy keeps producing frames on its own once started.
    pub const fn is_self_driving(self) -> bool {
        !matches!(self, SchedulingStrategy::EventDriven)
    }
}

impl fmt::Display for SchedulingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchedulingStrategy {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frame-callback" | "raf" => Ok(SchedulingStrategy::FrameCallback),
            "interval-capped" | "timeout" => Ok(SchedulingStrategy::IntervalCapped),
            "event-driven" | "event" => Ok(SchedulingStrategy::EventDriven),
            _ => Err(ProtocolError::UnknownStrategy(s.to_owned())),
        }
    }
}

/// An opaque, cancellable reference to an armed scheduling primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleHandle(u64);

impl ScheduleHandle {
    /// Wraps a raw identifier. Schedulers are responsible for uniqueness.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScheduleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of primitive behind a [`ScheduleHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Fires on the next display refresh opportunity.
    FrameCallback,
    /// Fires once a fixed delay has elapsed.
    Timer,
}

/// The scheduling primitives offered by an execution context.
///
/// Implementations live in `cadence-infra`. Every primitive fires at most once;
/// self-driving strategies re-arm after each frame.
pub trait Scheduler {
    /// Requests a callback on the next display refresh opportunity.
    fn request_frame(&mut self) -> ScheduleHandle;

    /// Requests a callback once `delay` has elapsed.
    fn set_timeout(&mut self, delay: Duration) -> ScheduleHandle;

    /// Cancels a pending primitive.
    ///
    /// ## Returns
    /// `true` if the primitive was still pending, `false` if it had already
    /// fired or was never issued by this scheduler.
    fn cancel(&mut self, handle: ScheduleHandle) -> bool;
}
