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

//! Deliberate host starvation.

use std::time::Duration;

use cadence_core::Clock;

/// Nominal length of one host frame at 60Hz.
pub const HOST_FRAME_BUDGET: Duration = Duration::from_millis(16);

/// Spins until `duration` has elapsed on `clock`.
///
/// The clock must advance on its own; a manual clock that nobody moves
/// would spin forever.
pub fn busy_wait<C: Clock + ?Sized>(clock: &C, duration: Duration) {
    let deadline = clock.now().saturating_add(duration);
    while clock.now() < deadline {
        std::hint::spin_loop();
    }
}

/// Time burned per host frame at `percent` load (clamped to 100).
pub fn load_budget(percent: u8) -> Duration {
    HOST_FRAME_BUDGET.mul_f64(f64::from(percent.min(100)) / 100.0)
}
