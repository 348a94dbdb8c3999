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

//! The drawing-surface contract.
//!
//! A surface is created and sized by the host, handed to the engine exactly
//! once, and from then on owned exclusively by the engine. The engine only
//! needs a handful of 2D primitives, so the contract stays small enough for a
//! software rasterizer or a recording double to implement.

use serde::{Deserialize, Serialize};

use crate::math::{Rgba, Vec2};

/// Pixel dimensions of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Creates a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as `f32`, for geometry.
    #[inline]
    pub fn width_f32(self) -> f32 {
        self.width as f32
    }

    /// Height as `f32`, for geometry.
    #[inline]
    pub fn height_f32(self) -> f32 {
        self.height as f32
    }

    /// Returns `true` if either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// An axis-aligned rectangle in surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width, may be zero.
    pub width: f32,
    /// Height, may be zero.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A color stop along a gradient, `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis.
    pub offset: f32,
    /// Color at that position.
    pub color: Rgba,
}

impl GradientStop {
    /// Creates a new stop.
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// How a shape is filled.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// A single color.
    Solid(Rgba),
    /// A horizontal gradient running from `x0` to `x1`, clamped outside.
    LinearGradient {
        /// Horizontal start of the gradient axis.
        x0: f32,
        /// Horizontal end of the gradient axis.
        x1: f32,
        /// Stops sorted by offset.
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    /// Samples the paint at horizontal position `x`.
    pub fn color_at(&self, x: f32) -> Rgba {
        match self {
            Paint::Solid(color) => *color,
            Paint::LinearGradient { x0, x1, stops } => {
                let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
                    return Rgba::TRANSPARENT;
                };
                let span = x1 - x0;
                let t = if span.abs() <= f32::EPSILON {
                    0.0
                } else {
                    ((x - x0) / span).clamp(0.0, 1.0)
                };
                if t <= first.offset {
                    return first.color;
                }
                for pair in stops.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    if t <= b.offset {
                        let local = if b.offset > a.offset {
                            (t - a.offset) / (b.offset - a.offset)
                        } else {
                            1.0
                        };
                        return a.color.lerp(b.color, local);
                    }
                }
                last.color
            }
        }
    }
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

/// A drawable target exclusively owned by the engine after handoff.
pub trait RenderSurface: Send + 'static {
    /// Current pixel dimensions.
    fn size(&self) -> SurfaceSize;

    /// Fills an axis-aligned rectangle. Parts outside the surface are clipped.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Fills a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);

    /// Strokes the outline of a circle.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba);

    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Rgba) {
        let size = self.size();
        self.fill_rect(
            Rect::new(0.0, 0.0, size.width_f32(), size.height_f32()),
            &Paint::Solid(color),
        );
    }
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn size(&self) -> SurfaceSize {
        (**self).size()
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        (**self).fill_rect(rect, paint)
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        (**self).fill_circle(center, radius, paint)
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba) {
        (**self).stroke_circle(center, radius, line_width, color)
    }

    fn clear(&mut self, color: Rgba) {
        (**self).clear(color)
    }
}
