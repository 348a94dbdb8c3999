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

//! The animated entities: particles, the wrapping bar and the pointer.

use cadence_core::math::{Rgba, Vec2};
use cadence_core::{Rect, SurfaceSize};
use rand::Rng;

/// Radius of every particle, in pixels.
pub const PARTICLE_RADIUS: f32 = 5.0;

/// Colors particles are drawn in.
pub const PARTICLE_PALETTE: [Rgba; 6] = [
    Rgba::from_hex(0xFF6B6B),
    Rgba::from_hex(0x4ECDC4),
    Rgba::from_hex(0x45B7D1),
    Rgba::from_hex(0xFFA07A),
    Rgba::from_hex(0x98D8C8),
    Rgba::from_hex(0xF7DC6F),
];

/// Width of the moving bar.
pub const BAR_WIDTH: f32 = 100.0;
/// Height of the moving bar.
pub const BAR_HEIGHT: f32 = 50.0;
/// Distance past either edge at which the bar wraps.
pub const BAR_MARGIN: f32 = 100.0;

/// A bouncing particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in surface pixels.
    pub position: Vec2,
    /// Displacement per frame at speed 1.
    pub velocity: Vec2,
    /// Fill color.
    pub color: Rgba,
}

impl Particle {
    /// Moves the particle by `velocity * speed` and keeps it inside `bounds`.
    ///
    /// A velocity component is reflected when the particle lies outside the
    /// bounds on that axis; the position is then clamped, so a particle never
    /// remains outside after a step.
    pub fn step(&mut self, speed: f32, bounds: SurfaceSize) {
        let (width, height) = (bounds.width_f32(), bounds.height_f32());
        self.position += self.velocity * speed;

        if self.position.x < 0.0 || self.position.x > width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > height {
            self.velocity.y = -self.velocity.y;
        }

        self.position.x = self.position.x.clamp(0.0, width);
        self.position.y = self.position.y.clamp(0.0, height);
    }
}

/// All animated state of one surface.
///
/// Created when a surface is established and replaced only by the next
/// initialization.
#[derive(Debug, Clone)]
pub struct Scene {
    size: SurfaceSize,
    particles: Vec<Particle>,
    bar_offset: f32,
    pointer: Option<Vec2>,
}

impl Scene {
    /// Seeds `count` particles uniformly over a surface of `size`.
    ///
    /// Velocity components are uniform in `[-1, 1)`.
    pub fn seeded<R: Rng + ?Sized>(size: SurfaceSize, count: usize, rng: &mut R) -> Self {
        let (width, height) = (size.width_f32(), size.height_f32());
        let particles = (0..count)
            .map(|_| Particle {
                position: Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height),
                velocity: Vec2::new(
                    (rng.gen::<f32>() - 0.5) * 2.0,
                    (rng.gen::<f32>() - 0.5) * 2.0,
                ),
                color: PARTICLE_PALETTE[rng.gen_range(0..PARTICLE_PALETTE.len())],
            })
            .collect();

        Self {
            size,
            particles,
            bar_offset: 0.0,
            pointer: None,
        }
    }

    /// Builds a scene from explicit particles.
    pub fn from_particles(size: SurfaceSize, particles: Vec<Particle>) -> Self {
        Self {
            size,
            particles,
            bar_offset: 0.0,
            pointer: None,
        }
    }

    /// Advances the bar and every particle by one frame at `speed`.
    pub fn advance(&mut self, speed: f32) {
        self.bar_offset += speed;
        if self.bar_offset > self.size.width_f32() + BAR_MARGIN {
            self.bar_offset = -BAR_MARGIN;
        }

        let bounds = self.size;
        for particle in &mut self.particles {
            particle.step(speed, bounds);
        }
    }

    /// Records the last known pointer position.
    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    /// Last known pointer position, if the pointer has been seen.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// The particles, in drawing order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Horizontal offset of the bar's left edge.
    pub fn bar_offset(&self) -> f32 {
        self.bar_offset
    }

    /// Where the bar is drawn this frame.
    pub fn bar_rect(&self) -> Rect {
        Rect::new(
            self.bar_offset,
            self.size.height_f32() / 2.0 - BAR_HEIGHT / 2.0,
            BAR_WIDTH,
            BAR_HEIGHT,
        )
    }

    /// The surface dimensions the scene was seeded for.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Returns `true` if every particle lies inside the surface.
    pub fn all_in_bounds(&self) -> bool {
        let (width, height) = (self.size.width_f32(), self.size.height_f32());
        self.particles.iter().all(|p| {
            (0.0..=width).contains(&p.position.x) && (0.0..=height).contains(&p.position.y)
        })
    }
}
