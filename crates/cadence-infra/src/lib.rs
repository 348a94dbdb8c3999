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

//! # Cadence Infra
//!
//! Concrete implementations of the contracts declared in `cadence-core`.
//!
//! - [`PixelSurface`]: an in-memory RGBA software raster.
//! - [`RecordingSurface`]: a surface that records draw calls instead of
//!   rasterizing them.
//! - [`CooperativeLoop`]: a single-threaded event loop offering frame
//!   callbacks and timers over an injected clock.

#![warn(missing_docs)]

pub mod scheduler;
pub mod surface;

pub use scheduler::{CooperativeLoop, Fired};
pub use surface::{DrawCommand, PixelSurface, RecordingSurface};
