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

//! Mapping pointer positions from display space into surface pixels.

use cadence_core::math::Vec2;
use cadence_core::SurfaceSize;

/// Where the surface is shown, in display (client) coordinates.
///
/// The displayed size may differ from the surface's pixel size, for
/// instance when the device pixel ratio is not 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Displayed width.
    pub width: f32,
    /// Displayed height.
    pub height: f32,
}

impl DisplayRect {
    /// Creates a new rectangle.
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rectangle at the origin showing `size` at one display unit per pixel.
    pub fn identity(size: SurfaceSize) -> Self {
        Self::new(0.0, 0.0, size.width_f32(), size.height_f32())
    }

    /// Maps a client position onto a surface of `size`.
    ///
    /// ## Returns
    /// `None` when the rectangle has no area or the result is not finite.
    pub fn map_to_surface(&self, client: Vec2, size: SurfaceSize) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let mapped = Vec2::new(
            (client.x - self.left) / self.width * size.width_f32(),
            (client.y - self.top) / self.height * size.height_f32(),
        );
        mapped.is_finite().then_some(mapped)
    }
}
