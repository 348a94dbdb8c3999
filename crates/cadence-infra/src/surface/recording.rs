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

//! A surface that keeps a log of draw calls.

use cadence_core::math::{Rgba, Vec2};
use cadence_core::{Paint, Rect, RenderSurface, SurfaceSize};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// The whole surface was cleared.
    Clear(Rgba),
    /// A rectangle was filled.
    FillRect {
        /// Target rectangle.
        rect: Rect,
        /// Fill.
        paint: Paint,
    },
    /// A circle was filled.
    FillCircle {
        /// Circle center.
        center: Vec2,
        /// Circle radius.
        radius: f32,
        /// Fill.
        paint: Paint,
    },
    /// A circle outline was stroked.
    StrokeCircle {
        /// Circle center.
        center: Vec2,
        /// Circle radius.
        radius: f32,
        /// Stroke width.
        line_width: f32,
        /// Stroke color.
        color: Rgba,
    },
}

/// Records draw calls without rasterizing them.
///
/// Every [`RenderSurface::clear`] starts a new frame, which makes the
/// recorder convenient for counting frames and inspecting the last one.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingSurface {
    /// Creates a recorder reporting `size`.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Draw calls since the last clear, the clear included.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of clears seen.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Circles filled in the current frame.
    pub fn filled_circles(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillCircle { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        })
    }
}

impl RenderSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            line_width,
            color,
        });
    }

    fn clear(&mut self, color: Rgba) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_starts_a_new_frame() {
        let mut surface = RecordingSurface::new(SurfaceSize::new(10, 10));
        surface.clear(Rgba::BLACK);
        surface.fill_circle(Vec2::new(1.0, 2.0), 5.0, &Paint::Solid(Rgba::WHITE));
        surface.clear(Rgba::BLACK);
        surface.fill_circle(Vec2::new(3.0, 4.0), 5.0, &Paint::Solid(Rgba::WHITE));

        assert_eq!(surface.frames(), 2);
        assert_eq!(surface.commands().len(), 2);
        assert_eq!(
            surface.filled_circles().collect::<Vec<_>>(),
            vec![(Vec2::new(3.0, 4.0), 5.0)]
        );
    }
}
