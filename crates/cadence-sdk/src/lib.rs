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

//! # Cadence SDK
//!
//! The public entry point for driving a render engine from a host.
//!
//! [`EngineWorker::spawn`] starts the engine on its own thread, with its own
//! cooperative loop, and returns the host's end of the message port. A
//! [`HostController`] wraps that port together with the surface (until it is
//! handed off), pointer mapping, the host's own loop monitor and the stress
//! tools used to starve the host on purpose.

#![warn(missing_docs)]

mod host;
mod pointer;
mod stress;
mod worker;

pub use host::{HostController, HostTick};
pub use pointer::DisplayRect;
pub use stress::{busy_wait, load_budget, HOST_FRAME_BUDGET};
pub use worker::{EngineWorker, HostPort};

pub use cadence_core::{
    Clock, EngineConfig, EngineMessage, HostMessage, MainLoopReport, ManualClock, MonotonicClock,
    SchedulingStrategy, StatsReport, SurfaceSize, WireCommand,
};
pub use cadence_infra::{PixelSurface, RecordingSurface};
