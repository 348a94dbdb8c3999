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

//! A time-windowed log of frame spans, used by the timing overlay.

use std::collections::VecDeque;
use std::time::Duration;

/// Frames shorter than this fit a 60Hz budget.
pub const ON_BUDGET: Duration = Duration::from_micros(16_670);
/// Frames shorter than this fit a 30Hz budget.
pub const SLOW: Duration = Duration::from_micros(33_330);

/// Start and end clock readings of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpan {
    /// Clock reading when the frame began.
    pub start: Duration,
    /// Clock reading when the frame finished.
    pub end: Duration,
}

impl FrameSpan {
    /// Creates a new span.
    pub fn new(start: Duration, end: Duration) -> Self {
        Self { start, end }
    }

    /// Time taken by the frame.
    pub fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }

    /// Classifies the frame against the 60Hz and 30Hz budgets.
    pub fn class(&self) -> FrameClass {
        FrameClass::of(self.duration())
    }
}

/// Budget classification of a frame duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameClass {
    /// Under 16.67 ms.
    OnBudget,
    /// Under 33.33 ms.
    Slow,
    /// Everything longer.
    Dropped,
}

impl FrameClass {
    /// Classifies `duration`.
    pub fn of(duration: Duration) -> Self {
        if duration < ON_BUDGET {
            FrameClass::OnBudget
        } else if duration < SLOW {
            FrameClass::Slow
        } else {
            FrameClass::Dropped
        }
    }
}

/// Keeps the frames whose end lies within `window` of the newest frame.
///
/// Unlike the fixed-count statistics window, eviction here is by age: the
/// front is dropped as entries fall out of the window.
#[derive(Debug, Clone)]
pub struct FrameTimingLog {
    spans: VecDeque<FrameSpan>,
    window: Duration,
}

impl FrameTimingLog {
    /// Creates an empty log retaining `window` worth of frames.
    pub fn new(window: Duration) -> Self {
        Self {
            spans: VecDeque::new(),
            window,
        }
    }

    /// Appends a frame and evicts those that ended more than `window` before it.
    pub fn push(&mut self, span: FrameSpan) {
        self.spans.push_back(span);
        while let Some(front) = self.spans.front() {
            if span.end.saturating_sub(front.end) > self.window {
                self.spans.pop_front();
            } else {
                break;
            }
        }
    }

    /// Iterates over retained frames, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &FrameSpan> {
        self.spans.iter()
    }

    /// Iterates over the frames whose age at `now` is within the window.
    pub fn visible_at(&self, now: Duration) -> impl Iterator<Item = &FrameSpan> {
        let window = self.window;
        self.spans
            .iter()
            .filter(move |span| now.saturating_sub(span.end) <= window)
    }

    /// Number of retained frames.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if no frame is retained.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Length of the sliding window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Forgets every frame.
    pub fn clear(&mut self) {
        self.spans.clear();
    }
}
