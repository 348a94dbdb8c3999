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

//! Rendering lane - the simulated frame.
//!
//! A frame is produced in a fixed order: clear, timing overlay, gradient
//! bar, particles, pointer marker, then the synthetic workload. The scene
//! simulation is kept apart from the drawing so it can be stepped and
//! inspected without a surface.

mod draw;
mod scene;
mod timing_bar;
mod workload;

pub use draw::*;
pub use scene::*;
pub use timing_bar::*;
pub use workload::*;
