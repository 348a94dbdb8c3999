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

//! A software raster surface.

use cadence_core::math::{Rgba, Vec2};
use cadence_core::{Paint, Rect, RenderSurface, SurfaceSize};

/// An RGBA pixel buffer implementing [`RenderSurface`].
///
/// A pixel is covered by a shape when its center lies inside the shape.
/// Coverage is binary; translucent paints are composited source-over.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    size: SurfaceSize,
    pixels: Vec<Rgba>,
}

impl PixelSurface {
    /// Creates a transparent surface of `size`.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            pixels: vec![Rgba::TRANSPARENT; size.area()],
        }
    }

    /// Changes the dimensions, discarding the content.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.pixels = vec![Rgba::TRANSPARENT; size.area()];
    }

    /// The color of pixel `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Packs the content into row-major 8-bit RGBA.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba8()).collect()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.size.width && y < self.size.height)
            .then(|| y as usize * self.size.width as usize + x as usize)
    }

    /// Pixel index range whose centers fall in `[lo, hi)`, clipped to `0..limit`.
    fn span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
        let first = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().max(0.0).min(limit as f32);
        if first >= end {
            return 0..0;
        }
        first as u32..end as u32
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    fn shade_disc<F>(&mut self, center: Vec2, outer: f32, mut shade: F)
    where
        F: FnMut(f32, f32) -> Option<Rgba>,
    {
        if !(center.is_finite() && outer.is_finite()) || outer <= 0.0 {
            return;
        }
        let xs = Self::span(center.x - outer, center.x + outer, self.size.width);
        let ys = Self::span(center.y - outer, center.y + outer, self.size.height);
        for y in ys {
            for x in xs.clone() {
                let px = x as f32 + 0.5;
                let distance = Vec2::new(px, y as f32 + 0.5)
                    .distance_squared(center)
                    .sqrt();
                if let Some(color) = shade(px, distance) {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

impl RenderSurface for PixelSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        for y in Self::span(rect.y, rect.bottom(), self.size.height) {
            for x in Self::span(rect.x, rect.right(), self.size.width) {
                let color = paint.color_at(x as f32 + 0.5);
                self.blend(x, y, color);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.shade_disc(center, radius, |px, distance| {
            (distance <= radius).then(|| paint.color_at(px))
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba) {
        let half = line_width / 2.0;
        self.shade_disc(center, radius + half, |_, distance| {
            ((distance - radius).abs() <= half).then_some(color)
        });
    }

    fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clear_fills_every_pixel() {
        let mut surface = PixelSurface::new(SurfaceSize::new(4, 3));
        surface.clear(Rgba::WHITE);
        assert!(surface.to_rgba8().chunks(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn rect_is_clipped_to_the_surface() {
        let mut surface = PixelSurface::new(SurfaceSize::new(10, 10));
        surface.fill_rect(Rect::new(-5.0, 8.0, 8.0, 10.0), &Paint::Solid(Rgba::WHITE));

        assert_eq!(surface.pixel(0, 9), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(2, 8), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(3, 8), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.pixel(0, 7), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.pixel(10, 9), None);
    }

    #[test]
    fn circle_covers_pixel_centers_within_radius() {
        let mut surface = PixelSurface::new(SurfaceSize::new(20, 20));
        surface.fill_circle(Vec2::new(10.0, 10.0), 3.0, &Paint::Solid(Rgba::WHITE));

        assert_eq!(surface.pixel(10, 10), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(12, 10), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(13, 10), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn stroke_leaves_the_center_untouched() {
        let mut surface = PixelSurface::new(SurfaceSize::new(40, 40));
        surface.stroke_circle(Vec2::new(20.0, 20.0), 10.0, 3.0, Rgba::WHITE);

        assert_eq!(surface.pixel(20, 20), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.pixel(29, 19), Some(Rgba::WHITE));
    }

    #[test]
    fn translucent_paint_blends_over_background() {
        let mut surface = PixelSurface::new(SurfaceSize::new(2, 2));
        surface.clear(Rgba::BLACK);
        surface.fill_rect(
            Rect::new(0.0, 0.0, 2.0, 2.0),
            &Paint::Solid(Rgba::WHITE.with_alpha(0.5)),
        );

        let px = surface.pixel(1, 1).unwrap();
        assert_relative_eq!(px.r, 0.5);
        assert_relative_eq!(px.a, 1.0);
    }

    #[test]
    fn degenerate_shapes_are_ignored() {
        let mut surface = PixelSurface::new(SurfaceSize::new(4, 4));
        surface.fill_circle(Vec2::new(f32::NAN, 1.0), 2.0, &Paint::Solid(Rgba::WHITE));
        surface.fill_rect(Rect::new(1.0, 1.0, 0.0, 2.0), &Paint::Solid(Rgba::WHITE));
        assert!(surface.to_rgba8().iter().all(|&b| b == 0));
    }
}
