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

//! # Cadence Core
//!
//! Foundational crate containing the clocks, contracts and plain data types
//! shared by the render engine and the host that drives it.
//!
//! Nothing in here renders or schedules anything by itself: the scheduling
//! primitives, the drawing surface and the message transport are described
//! as traits and value types, and `cadence-infra` provides the concrete
//! implementations.

#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod event;
pub mod math;
pub mod protocol;
pub mod schedule;
pub mod surface;
pub mod telemetry;
pub mod utils;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::EngineConfig;
pub use protocol::{EngineMessage, HostMessage, ProtocolError, WireCommand};
pub use schedule::{PrimitiveKind, ScheduleHandle, Scheduler, SchedulingStrategy};
pub use surface::{Paint, Rect, RenderSurface, SurfaceSize};
pub use telemetry::{MainLoopReport, StatsReport};
pub use utils::timer::Stopwatch;
