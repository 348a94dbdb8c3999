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

//! Defines the RenderEngine, the owner of the surface and of the render loop.

use cadence_core::event::Outbox;
use cadence_core::math::Vec2;
use cadence_core::{
    Clock, EngineConfig, EngineMessage, HostMessage, RenderSurface, ScheduleHandle, Scheduler,
    SchedulingStrategy, Stopwatch,
};
use cadence_lanes::{draw_scene, Scene, ScheduleLane, SyntheticWorkload};
use cadence_telemetry::{FrameSpan, TelemetryService};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use super::state::{EngineState, FrameOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Running,
    Stopped,
}

/// The render-scheduling engine.
///
/// All run state lives here and is mutated only through the message
/// handlers and [`RenderEngine::on_primitive`]. The engine never owns its
/// scheduling primitives: every handler that may arm or cancel one takes the
/// execution context's [`Scheduler`] explicitly. At most one primitive is
/// outstanding at any time, and it is cancelled before another is armed.
pub struct RenderEngine<C: Clock, S: RenderSurface> {
    config: EngineConfig,
    clock: C,
    outbox: Outbox<EngineMessage>,
    phase: Phase,
    // Active scheduling lane; kept across stop so `init` can restart it.
    lane: ScheduleLane,
    // The single outstanding primitive, if the lane is self-driving.
    pending: Option<ScheduleHandle>,
    surface: Option<S>,
    scene: Option<Scene>,
    pointer: Option<Vec2>,
    complexity: u32,
    speed: f32,
    rng: Pcg64Mcg,
    workload: SyntheticWorkload,
    telemetry: TelemetryService,
    frames_rendered: u64,
}

impl<C: Clock, S: RenderSurface> RenderEngine<C, S> {
    /// Creates an uninitialized engine.
    ///
    /// ## Arguments
    /// * `config`: initial parameters; invalid values are replaced by defaults.
    /// * `clock`: the monotonic clock every frame is timed with.
    /// * `outbox`: where `ready` and `stats` messages are posted.
    pub fn new(config: EngineConfig, clock: C, outbox: Outbox<EngineMessage>) -> Self {
        let config = config.sanitized();
        let seed = config.seed.unwrap_or_else(rand::random);
        log::debug!("RenderEngine: seeding scene and workload with {seed}");
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let workload = SyntheticWorkload::new(rng.gen());
        let telemetry = TelemetryService::from_config(&config, clock.now());

        Self {
            lane: ScheduleLane::for_strategy(config.strategy, &config),
            complexity: config.complexity,
            speed: config.speed,
            config,
            clock,
            outbox,
            phase: Phase::Uninitialized,
            pending: None,
            surface: None,
            scene: None,
            pointer: None,
            rng,
            workload,
            telemetry,
            frames_rendered: 0,
        }
    }

    /// Dispatches one host message.
    pub fn handle_message(&mut self, message: HostMessage<S>, scheduler: &mut dyn Scheduler) {
        log::trace!("RenderEngine: received {}", message.kind());
        match message {
            HostMessage::Init {
                surface: Some(surface),
            } => self.init(surface, scheduler),
            HostMessage::SetStrategy {
                strategy: Some(strategy),
            } => self.set_strategy(strategy, scheduler),
            HostMessage::SetComplexity {
                complexity: Some(complexity),
            } => self.set_complexity(complexity),
            HostMessage::SetSpeed { speed: Some(speed) } => self.set_speed(speed),
            HostMessage::PointerMove {
                x: Some(x),
                y: Some(y),
            } => self.pointer_move(x, y),
            HostMessage::TriggerRender => self.trigger_render(),
            HostMessage::Stop => self.stop(scheduler),
            incomplete => {
                log::warn!(
                    "RenderEngine: ignoring `{}` without its payload",
                    incomplete.kind()
                );
            }
        }
    }

    /// Takes ownership of `surface`, seeds the scene and starts the loop.
    ///
    /// Accepted before the first initialization and after `stop`. While the
    /// engine is running, the offered surface is dropped.
    pub fn init(&mut self, surface: S, scheduler: &mut dyn Scheduler) {
        if self.phase == Phase::Running {
            log::warn!("RenderEngine: already running, ignoring a second surface handoff");
            return;
        }

        let size = surface.size();
        let mut scene = Scene::seeded(size, self.config.particle_count, &mut self.rng);
        if let Some(pointer) = self.pointer {
            scene.set_pointer(pointer);
        }
        self.scene = Some(scene);
        self.surface = Some(surface);
        self.telemetry.reset(self.clock.now());
        self.phase = Phase::Running;
        log::info!(
            "RenderEngine: initialized {}x{} surface with {} strategy",
            size.width,
            size.height,
            self.lane.strategy_name()
        );

        self.start_loop(scheduler);
        self.outbox.post(EngineMessage::Ready);
    }

    /// Switches strategy, cancelling the outstanding primitive first.
    ///
    /// Before initialization this only records the strategy used by `init`.
    /// From the stopped state it resumes rendering.
    pub fn set_strategy(&mut self, strategy: SchedulingStrategy, scheduler: &mut dyn Scheduler) {
        ScheduleLane::disarm(&mut self.pending, scheduler);
        self.lane = ScheduleLane::for_strategy(strategy, &self.config);

        if self.phase == Phase::Uninitialized {
            log::debug!("RenderEngine: {strategy} will start once initialized");
            return;
        }

        log::info!("RenderEngine: switching to {strategy}");
        self.phase = Phase::Running;
        self.start_loop(scheduler);
    }

    /// Sets the synthetic workload level used from the next frame on.
    pub fn set_complexity(&mut self, complexity: u32) {
        log::debug!("RenderEngine: complexity {} -> {complexity}", self.complexity);
        self.complexity = complexity;
    }

    /// Sets the animation speed. Non-positive and non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if !(speed.is_finite() && speed > 0.0) {
            log::warn!("RenderEngine: ignoring invalid speed {speed}");
            return;
        }
        log::debug!("RenderEngine: speed {} -> {speed}", self.speed);
        self.speed = speed;
    }

    /// Records the pointer position, in surface pixels.
    ///
    /// Under the event-driven strategy this renders one frame immediately.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        if !position.is_finite() {
            log::warn!("RenderEngine: ignoring non-finite pointer ({x}, {y})");
            return;
        }
        self.pointer = Some(position);
        if let Some(scene) = self.scene.as_mut() {
            scene.set_pointer(position);
        }
        self.render_on_trigger();
    }

    /// Renders one frame if the event-driven strategy is active.
    pub fn trigger_render(&mut self) {
        self.render_on_trigger();
    }

    /// Cancels the outstanding primitive and halts the loop. Idempotent.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        ScheduleLane::disarm(&mut self.pending, scheduler);
        match self.phase {
            Phase::Running => {
                log::info!("RenderEngine: stopped after {} frames", self.frames_rendered);
                self.phase = Phase::Stopped;
            }
            Phase::Stopped => log::debug!("RenderEngine: already stopped"),
            Phase::Uninitialized => log::debug!("RenderEngine: stop before init ignored"),
        }
    }

    /// Handles a fired scheduling primitive.
    ///
    /// A firing whose handle is not the outstanding one (cancelled earlier,
    /// or from a previous strategy) is ignored.
    pub fn on_primitive(&mut self, handle: ScheduleHandle, scheduler: &mut dyn Scheduler) {
        if self.phase != Phase::Running || self.pending != Some(handle) {
            log::trace!("RenderEngine: ignoring stale firing {handle}");
            return;
        }
        self.pending = None;
        self.render_frame();
        self.pending = self.lane.arm(scheduler);
    }

    /// Renders one frame and records its statistics.
    ///
    /// ## Returns
    /// `None` if no surface has been handed over yet; the frame is skipped.
    pub fn render_frame(&mut self) -> Option<FrameOutcome> {
        let (Some(surface), Some(scene)) = (self.surface.as_mut(), self.scene.as_mut()) else {
            log::trace!("RenderEngine: no surface yet, skipping frame");
            return None;
        };

        let stopwatch = Stopwatch::start(&self.clock);
        scene.advance(self.speed);
        let overlay = self
            .config
            .timing_overlay
            .then(|| (self.telemetry.timing_log(), stopwatch.started_at()));
        draw_scene(surface, scene, overlay);
        let work = self.workload.run(self.complexity);
        let end = stopwatch.started_at() + stopwatch.elapsed(&self.clock);

        let span = FrameSpan::new(stopwatch.started_at(), end);
        let report = self.telemetry.record_frame(span);
        if let Some(report) = report {
            self.outbox.post(EngineMessage::Stats(report));
        }
        self.frames_rendered += 1;

        Some(FrameOutcome {
            span,
            iterations: work.iterations,
            report,
        })
    }

    fn start_loop(&mut self, scheduler: &mut dyn Scheduler) {
        if !self.lane.strategy().is_self_driving() {
            log::debug!("RenderEngine: event-driven, waiting for triggers");
            return;
        }
        self.render_frame();
        self.pending = self.lane.arm(scheduler);
    }

    fn render_on_trigger(&mut self) {
        if self.phase == Phase::Running && self.lane.renders_on_trigger() {
            self.render_frame();
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        match self.phase {
            Phase::Uninitialized => EngineState::Uninitialized,
            Phase::Running => EngineState::Running(self.lane.strategy()),
            Phase::Stopped => EngineState::Stopped,
        }
    }

    /// The strategy in effect (or to be used at `init`).
    pub fn strategy(&self) -> SchedulingStrategy {
        self.lane.strategy()
    }

    /// The outstanding primitive, if any.
    pub fn pending(&self) -> Option<ScheduleHandle> {
        self.pending
    }

    /// Current workload level.
    pub fn complexity(&self) -> u32 {
        self.complexity
    }

    /// Current animation speed.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Frames rendered since construction.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// The animated scene, once initialized.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// The owned surface, once initialized.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Frame statistics and timing log.
    pub fn telemetry(&self) -> &TelemetryService {
        &self.telemetry
    }

    /// The sanitized configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
