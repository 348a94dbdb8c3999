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

//! Simulated drawing of a [`Scene`] onto a [`RenderSurface`].

use std::time::Duration;

use cadence_core::math::{Rgba, Vec2};
use cadence_core::surface::GradientStop;
use cadence_core::{Paint, RenderSurface};
use cadence_telemetry::FrameTimingLog;

use super::scene::{Scene, BAR_WIDTH, PARTICLE_RADIUS};
use super::timing_bar::draw_timing_bar;

/// Background fill.
pub const BACKGROUND: Rgba = Rgba::from_hex(0x0A0A0A);
/// Vertical distance between the pointer and the marker's center.
pub const MARKER_OFFSET_Y: f32 = 30.0;
/// Radius of the pointer marker.
pub const MARKER_RADIUS: f32 = 15.0;

const MARKER_FILL: Rgba = Rgba::from_hex(0xFFD700);
const MARKER_STROKE: Rgba = Rgba::from_hex(0xFFA500);
const MARKER_STROKE_WIDTH: f32 = 3.0;
const MARKER_GLOW_RADIUS: f32 = 20.0;

const BAR_STOPS: [Rgba; 3] = [
    Rgba::from_hex(0xFF6B6B),
    Rgba::from_hex(0x4ECDC4),
    Rgba::from_hex(0x45B7D1),
];

/// Draws one frame of `scene`.
///
/// ## Arguments
/// * `surface`: the target, cleared first.
/// * `scene`: the already-advanced scene.
/// * `overlay`: the timing log and current time, when the overlay is enabled.
pub fn draw_scene(
    surface: &mut dyn RenderSurface,
    scene: &Scene,
    overlay: Option<(&FrameTimingLog, Duration)>,
) {
    surface.clear(BACKGROUND);

    if let Some((log, now)) = overlay {
        draw_timing_bar(surface, log, now);
    }

    let bar = scene.bar_rect();
    surface.fill_rect(bar, &bar_paint(bar.x));

    for particle in scene.particles() {
        surface.fill_circle(particle.position, PARTICLE_RADIUS, &Paint::Solid(particle.color));
    }

    if let Some(pointer) = scene.pointer() {
        draw_marker(surface, pointer.offset(0.0, MARKER_OFFSET_Y));
    }
}

fn bar_paint(x: f32) -> Paint {
    Paint::LinearGradient {
        x0: x,
        x1: x + BAR_WIDTH,
        stops: vec![
            GradientStop::new(0.0, BAR_STOPS[0]),
            GradientStop::new(0.5, BAR_STOPS[1]),
            GradientStop::new(1.0, BAR_STOPS[2]),
        ],
    }
}

fn draw_marker(surface: &mut dyn RenderSurface, center: Vec2) {
    // Halo first so the marker stays crisp on top.
    surface.fill_circle(
        center,
        MARKER_RADIUS + MARKER_GLOW_RADIUS / 2.0,
        &Paint::Solid(MARKER_FILL.with_alpha(0.25)),
    );
    surface.fill_circle(center, MARKER_RADIUS, &Paint::Solid(MARKER_FILL));
    surface.stroke_circle(center, MARKER_RADIUS, MARKER_STROKE_WIDTH, MARKER_STROKE);
}
