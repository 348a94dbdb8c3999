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

use std::fmt;

use cadence_core::{SchedulingStrategy, StatsReport};
use cadence_telemetry::FrameSpan;

/// Lifecycle of a [`RenderEngine`](super::RenderEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No surface has been handed over yet.
    Uninitialized,
    /// Producing frames under the given strategy.
    Running(SchedulingStrategy),
    /// Halted. Only `setStrategy` or a fresh `init` resumes rendering.
    Stopped,
}

impl EngineState {
    /// Returns `true` in the running state.
    pub fn is_running(&self) -> bool {
        matches!(self, EngineState::Running(_))
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Uninitialized => f.write_str("uninitialized"),
            EngineState::Running(strategy) => write!(f, "running ({strategy})"),
            EngineState::Stopped => f.write_str("stopped"),
        }
    }
}

/// Result of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    /// Clock readings at the start and end of the frame.
    pub span: FrameSpan,
    /// Synthetic workload iterations performed.
    pub iterations: u64,
    /// The statistics report emitted at the end of this frame, if one was due.
    pub report: Option<StatsReport>,
}
