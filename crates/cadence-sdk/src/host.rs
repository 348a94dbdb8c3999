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

//! The host side of the engine channel.

use std::time::Duration;

use cadence_core::math::Vec2;
use cadence_core::{
    Clock, EngineMessage, HostMessage, MainLoopReport, RenderSurface, SchedulingStrategy,
    StatsReport, SurfaceSize, WireCommand,
};
use cadence_telemetry::MainLoopMonitor;

use crate::pointer::DisplayRect;
use crate::stress::{busy_wait, load_budget};
use crate::worker::HostPort;

/// What happened during one host frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostTick {
    /// The host loop report, when a second has elapsed.
    pub main_loop: Option<MainLoopReport>,
    /// Engine statistics received during this frame, oldest first.
    pub stats: Vec<StatsReport>,
    /// Whether `ready` arrived during this frame.
    pub became_ready: bool,
}

/// Drives an engine from the host's loop.
///
/// The controller owns the surface until [`HostController::handoff`]. After
/// the handoff the surface can no longer be reached from the host, and
/// every further interaction goes through messages.
pub struct HostController<C: Clock, S: RenderSurface> {
    clock: C,
    port: HostPort<S>,
    surface: Option<S>,
    surface_size: SurfaceSize,
    handed_off: bool,
    display: DisplayRect,
    ready: bool,
    last_stats: Option<StatsReport>,
    last_stats_at: Option<Duration>,
    monitor: MainLoopMonitor,
    last_main_loop: Option<MainLoopReport>,
    load_percent: u8,
}

impl<C: Clock, S: RenderSurface> HostController<C, S> {
    /// Creates a controller holding `surface`, displayed at one unit per pixel.
    pub fn new(clock: C, surface: S, port: HostPort<S>) -> Self {
        let surface_size = surface.size();
        let monitor = MainLoopMonitor::new(clock.now());
        Self {
            clock,
            port,
            surface: Some(surface),
            surface_size,
            handed_off: false,
            display: DisplayRect::identity(surface_size),
            ready: false,
            last_stats: None,
            last_stats_at: None,
            monitor,
            last_main_loop: None,
            load_percent: 0,
        }
    }

    /// Mutable access to the surface, for sizing before the handoff.
    ///
    /// ## Returns
    /// `None` once the surface has been handed off.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Transfers the surface to the engine.
    ///
    /// ## Returns
    /// `false` if the surface was already handed off; nothing is sent.
    pub fn handoff(&mut self) -> bool {
        let Some(surface) = self.surface.take() else {
            log::warn!("Surface already handed off; ignoring second transfer.");
            return false;
        };
        self.surface_size = surface.size();
        self.handed_off = true;
        log::info!(
            "Handing off {}x{} surface to the engine.",
            self.surface_size.width,
            self.surface_size.height
        );
        self.port.post(HostMessage::init(surface))
    }

    /// Whether the surface now belongs to the engine.
    pub fn is_handed_off(&self) -> bool {
        self.handed_off
    }

    /// Sets where the surface is displayed, for pointer mapping.
    pub fn set_display_rect(&mut self, display: DisplayRect) {
        self.display = display;
    }

    /// Switches the engine's scheduling strategy.
    pub fn set_strategy(&self, strategy: SchedulingStrategy) -> bool {
        self.port.post(HostMessage::set_strategy(strategy))
    }

    /// Sets the engine's synthetic workload.
    pub fn set_complexity(&self, complexity: u32) -> bool {
        self.port.post(HostMessage::set_complexity(complexity))
    }

    /// Sets the engine's animation speed.
    pub fn set_speed(&self, speed: f32) -> bool {
        self.port.post(HostMessage::set_speed(speed))
    }

    /// Requests one frame under the event-driven strategy.
    pub fn trigger_render(&self) -> bool {
        self.port.post(HostMessage::TriggerRender)
    }

    /// Halts the engine's loop.
    pub fn stop(&self) -> bool {
        self.port.post(HostMessage::Stop)
    }

    /// Forwards a decoded wire command.
    pub fn send(&self, command: WireCommand) -> bool {
        self.port.post(command.into())
    }

    /// Forwards a pointer position given in display coordinates.
    ///
    /// ## Returns
    /// `false` if the position could not be mapped or the engine is gone.
    pub fn pointer_move(&self, client_x: f32, client_y: f32) -> bool {
        match self
            .display
            .map_to_surface(Vec2::new(client_x, client_y), self.surface_size)
        {
            Some(at) => self.port.post(HostMessage::pointer_move(at.x, at.y)),
            None => {
                log::debug!("Pointer ({client_x}, {client_y}) could not be mapped.");
                false
            }
        }
    }

    /// Runs one iteration of the host loop.
    ///
    /// Burns the configured load, samples the loop monitor and collects
    /// whatever the engine has sent.
    pub fn tick(&mut self) -> HostTick {
        if self.load_percent > 0 {
            busy_wait(&self.clock, load_budget(self.load_percent));
        }

        let now = self.clock.now();
        let mut tick = HostTick {
            main_loop: self.monitor.sample(now),
            ..HostTick::default()
        };
        if let Some(report) = tick.main_loop {
            self.last_main_loop = Some(report);
        }

        for message in self.port.drain() {
            match message {
                EngineMessage::Ready => {
                    log::info!("Engine is ready.");
                    self.ready = true;
                    tick.became_ready = true;
                }
                EngineMessage::Stats(report) => {
                    self.last_stats = Some(report);
                    self.last_stats_at = Some(now);
                    tick.stats.push(report);
                }
            }
        }
        tick
    }

    /// Blocks the host loop for `duration`, as a stalled main thread would.
    pub fn freeze(&self, duration: Duration) {
        log::info!("Freezing host loop for {duration:?}.");
        busy_wait(&self.clock, duration);
    }

    /// Sets the share of every host frame burned by [`Self::tick`].
    pub fn set_main_thread_load(&mut self, percent: u8) {
        self.load_percent = percent.min(100);
        log::debug!("Host load set to {}%.", self.load_percent);
    }

    /// Current host load, in percent.
    pub fn main_thread_load(&self) -> u8 {
        self.load_percent
    }

    /// Whether the engine acknowledged the handoff.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The most recent engine statistics, if any arrived.
    pub fn last_stats(&self) -> Option<StatsReport> {
        self.last_stats
    }

    /// Time since the last engine statistics arrived.
    ///
    /// A growing age is the only sign of a dead engine context.
    pub fn stats_age(&self) -> Option<Duration> {
        self.last_stats_at.map(|at| self.clock.now().saturating_sub(at))
    }

    /// The most recent host loop report.
    pub fn last_main_loop(&self) -> Option<MainLoopReport> {
        self.last_main_loop
    }

    /// Whether the engine side of the channel still exists.
    pub fn is_engine_connected(&self) -> bool {
        self.port.is_peer_connected()
    }

    /// Gives back the port, for shutting the channel down.
    pub fn into_port(self) -> HostPort<S> {
        self.port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::event::{port_pair, MessagePort};
    use cadence_core::ManualClock;
    use cadence_infra::RecordingSurface;

    type EngineSide = MessagePort<EngineMessage, HostMessage<RecordingSurface>>;

    fn controller() -> (HostController<ManualClock, RecordingSurface>, EngineSide, ManualClock) {
        let clock = ManualClock::new();
        let (host, engine) = port_pair();
        let surface = RecordingSurface::new(SurfaceSize::new(800, 600));
        (HostController::new(clock.clone(), surface, host), engine, clock)
    }

    #[test]
    fn surface_is_handed_off_exactly_once() {
        let (mut host, engine, _clock) = controller();
        assert!(host.surface_mut().is_some());

        assert!(host.handoff());
        assert!(!host.handoff());
        assert!(host.surface_mut().is_none());
        assert!(host.is_handed_off());

        let messages: Vec<_> = engine.drain().collect();
        assert_eq!(messages.len(), 1);
        assert!(matches!(
            &messages[0],
            HostMessage::Init { surface: Some(s) } if s.size() == SurfaceSize::new(800, 600)
        ));
    }

    #[test]
    fn pointer_is_mapped_into_surface_space() {
        let (mut host, engine, _clock) = controller();
        host.set_display_rect(DisplayRect::new(100.0, 50.0, 400.0, 300.0));
        host.handoff();
        engine.drain().for_each(drop);

        assert!(host.pointer_move(300.0, 200.0));
        match engine.try_recv() {
            Some(HostMessage::PointerMove {
                x: Some(x),
                y: Some(y),
            }) => {
                assert_eq!((x, y), (400.0, 300.0));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn stats_are_optional_until_they_arrive() {
        let (mut host, engine, clock) = controller();
        assert!(host.last_stats().is_none());
        assert!(host.stats_age().is_none());

        engine.post(EngineMessage::Ready);
        let report = StatsReport {
            fps: 60.0,
            frames_rendered: 6,
            ..StatsReport::default()
        };
        engine.post(EngineMessage::Stats(report));

        let tick = host.tick();
        assert!(tick.became_ready);
        assert_eq!(tick.stats, vec![report]);
        assert!(host.is_ready());

        clock.advance(Duration::from_millis(750));
        assert_eq!(host.last_stats(), Some(report));
        assert_eq!(host.stats_age(), Some(Duration::from_millis(750)));
    }

    #[test]
    fn main_loop_reports_once_per_second() {
        let (mut host, _engine, clock) = controller();
        let mut reports = 0;
        for _ in 0..120 {
            clock.advance(Duration::from_millis(10));
            if host.tick().main_loop.is_some() {
                reports += 1;
            }
        }
        assert_eq!(reports, 1);
        let report = host.last_main_loop().unwrap();
        assert_eq!(report.samples, 100);
        assert_eq!(report.frame_drops, 0);
    }

    #[test]
    fn load_is_clamped() {
        let (mut host, _engine, _clock) = controller();
        host.set_main_thread_load(180);
        assert_eq!(host.main_thread_load(), 100);
    }

    #[test]
    fn dead_engine_is_detected_through_the_port() {
        let (host, engine, _clock) = controller();
        assert!(host.is_engine_connected());
        drop(engine);
        assert!(!host.is_engine_connected());
        assert!(!host.set_complexity(3));
    }
}
