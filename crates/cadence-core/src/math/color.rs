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

//! Defines the `Rgba` color type used by surfaces and paints.

/// A non-premultiplied RGBA color with `f32` components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new color with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates an opaque color from a `0xRRGGBB` literal.
    ///
    /// ```
    /// use cadence_core::math::Rgba;
    /// assert_eq!(Rgba::from_hex(0xFF0000), Rgba::rgb(1.0, 0.0, 0.0));
    /// ```
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as f32 / 255.0,
            ((hex >> 8) & 0xFF) as f32 / 255.0,
            (hex & 0xFF) as f32 / 255.0,
        )
    }

    /// Returns the same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Linearly interpolates between `self` and `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Composites `self` over `dst` (source-over).
    pub fn over(self, dst: Self) -> Self {
        let a = self.a + dst.a * (1.0 - self.a);
        if a <= 0.0 {
            return Self::TRANSPARENT;
        }
        let blend = |s: f32, d: f32| (s * self.a + d * dst.a * (1.0 - self.a)) / a;
        Self::new(
            blend(self.r, dst.r),
            blend(self.g, dst.g),
            blend(self.b, dst.b),
            a,
        )
    }

    /// Packs the color into 8-bit RGBA channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Unpacks 8-bit RGBA channels.
    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self::new(
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
            px[3] as f32 / 255.0,
        )
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hex_decoding() {
        let teal = Rgba::from_hex(0x4ECDC4);
        assert_eq!(teal.to_rgba8(), [0x4E, 0xCD, 0xC4, 0xFF]);
    }

    #[test]
    fn lerp_clamps_parameter() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert_relative_eq!(mid.r, 0.5);
        assert_eq!(Rgba::BLACK.lerp(Rgba::WHITE, 2.0), Rgba::WHITE);
    }

    #[test]
    fn opaque_source_replaces_destination() {
        let red = Rgba::rgb(1.0, 0.0, 0.0);
        assert_eq!(red.over(Rgba::WHITE), red);
    }

    #[test]
    fn translucent_source_blends() {
        let half_black = Rgba::BLACK.with_alpha(0.5);
        let out = half_black.over(Rgba::WHITE);
        assert_relative_eq!(out.r, 0.5);
        assert_relative_eq!(out.a, 1.0);
    }
}
