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

//! # Cadence Lanes
//!
//! Hot-path building blocks driven by the render engine agent.
//!
//! - [`schedule_lane`] holds the three scheduling strategies as a single
//!   tagged union, each able to arm its next frame on a
//!   [`Scheduler`](cadence_core::Scheduler).
//! - [`render_lane`] holds the animated scene, the simulated draw, the
//!   synthetic workload and the frame timing overlay.
//!
//! Lanes carry no lifecycle state of their own; the agent decides when
//! they run.

#![warn(missing_docs)]

pub mod render_lane;
pub mod schedule_lane;

pub use render_lane::{
    draw_scene, draw_timing_bar, Particle, Scene, SyntheticWorkload, WorkloadOutcome,
};
pub use schedule_lane::ScheduleLane;
