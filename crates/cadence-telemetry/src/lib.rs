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

//! # Cadence Telemetry
//!
//! Turns raw frame timings into the numbers the engine reports and the host
//! compares against.
//!
//! - [`FrameStatsAggregator`] keeps a bounded window of recent frame durations
//!   and emits a [`StatsReport`](cadence_core::StatsReport) on a fixed cadence.
//! - [`FrameTimingLog`] keeps every frame of the last second for the timing
//!   overlay.
//! - [`MainLoopMonitor`] samples the host's own loop to detect starvation.
//! - [`TelemetryService`] bundles the engine-side pieces.

#![warn(missing_docs)]

pub mod frame_stats;
pub mod main_loop;
pub mod service;
pub mod timing_log;
pub mod window;

pub use frame_stats::{FrameStatsAggregator, FRAME_WINDOW};
pub use main_loop::MainLoopMonitor;
pub use service::TelemetryService;
pub use timing_log::{FrameClass, FrameSpan, FrameTimingLog};
pub use window::RingBuffer;
