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

//! Frame timing overlay: the last second of frames as a strip of bars.

use std::time::Duration;

use cadence_core::clock::as_millis_f64;
use cadence_core::math::Rgba;
use cadence_core::{Paint, Rect, RenderSurface};
use cadence_telemetry::{FrameClass, FrameTimingLog};

/// Height of the overlay strip.
pub const TIMING_BAR_HEIGHT: f32 = 20.0;
/// Narrowest bar drawn for a frame.
pub const MIN_MARK_WIDTH: f32 = 2.0;
/// Number of intervals between tick marks.
pub const TICK_INTERVALS: u32 = 10;

const BACKGROUND: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.7);
const TICK: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.3);

/// Overlay color of a frame class.
pub fn class_color(class: FrameClass) -> Rgba {
    match class {
        FrameClass::OnBudget => Rgba::from_hex(0x00FF00),
        FrameClass::Slow => Rgba::from_hex(0xFFAA00),
        FrameClass::Dropped => Rgba::from_hex(0xFF0000),
    }
}

/// Computes the bar of every frame visible at `now` on a strip `width` wide.
///
/// The right edge of the strip is `now`, the left edge one window earlier.
/// A frame's bar ends at its position on that timeline and is as wide as
/// the frame's duration on the same scale.
pub fn timing_marks(
    log: &FrameTimingLog,
    now: Duration,
    width: f32,
) -> impl Iterator<Item = (Rect, FrameClass)> + '_ {
    let window_ms = as_millis_f64(log.window()).max(f64::EPSILON);
    log.visible_at(now).map(move |span| {
        let age_ms = as_millis_f64(now.saturating_sub(span.end));
        let x = width - (age_ms / window_ms) as f32 * width;
        let duration_ms = as_millis_f64(span.duration());
        let mark_width = ((duration_ms / window_ms) as f32 * width).max(MIN_MARK_WIDTH);
        (
            Rect::new(x - mark_width, 0.0, mark_width, TIMING_BAR_HEIGHT),
            span.class(),
        )
    })
}

/// Draws the overlay strip along the top of `surface`.
pub fn draw_timing_bar(surface: &mut dyn RenderSurface, log: &FrameTimingLog, now: Duration) {
    let width = surface.size().width_f32();
    surface.fill_rect(
        Rect::new(0.0, 0.0, width, TIMING_BAR_HEIGHT),
        &Paint::Solid(BACKGROUND),
    );

    for (rect, class) in timing_marks(log, now, width) {
        surface.fill_rect(rect, &Paint::Solid(class_color(class)));
    }

    let tick = Paint::Solid(TICK);
    for i in 0..=TICK_INTERVALS {
        let x = i as f32 / TICK_INTERVALS as f32 * width;
        surface.fill_rect(Rect::new(x - 0.5, 0.0, 1.0, TIMING_BAR_HEIGHT), &tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cadence_telemetry::FrameSpan;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn newest_frame_ends_at_right_edge() {
        let mut log = FrameTimingLog::new(ms(1000));
        log.push(FrameSpan::new(ms(990), ms(1000)));

        let marks: Vec<_> = timing_marks(&log, ms(1000), 1000.0).collect();
        assert_eq!(marks.len(), 1);
        let (rect, class) = marks[0];
        assert_relative_eq!(rect.right(), 1000.0);
        assert_relative_eq!(rect.width, 10.0);
        assert_eq!(class, FrameClass::OnBudget);
    }

    #[test]
    fn short_frames_get_minimum_width() {
        let mut log = FrameTimingLog::new(ms(1000));
        log.push(FrameSpan::new(ms(500), ms(500)));

        let (rect, _) = timing_marks(&log, ms(1000), 800.0).next().unwrap();
        assert_relative_eq!(rect.width, MIN_MARK_WIDTH);
        assert_relative_eq!(rect.right(), 400.0);
    }

    #[test]
    fn frames_older_than_the_window_are_hidden() {
        let mut log = FrameTimingLog::new(ms(1000));
        log.push(FrameSpan::new(ms(0), ms(40)));
        assert_eq!(timing_marks(&log, ms(1100), 800.0).count(), 0);
    }

    #[test]
    fn colors_by_class() {
        assert_eq!(class_color(FrameClass::OnBudget), Rgba::from_hex(0x00FF00));
        assert_eq!(class_color(FrameClass::Dropped), Rgba::from_hex(0xFF0000));
    }
}
