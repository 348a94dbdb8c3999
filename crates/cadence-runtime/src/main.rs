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

//! Runs one engine session from the command line.
//!
//! The host side runs on the main thread at roughly 60Hz, playing back an
//! optional command script and logging both its own loop reports and the
//! engine's statistics. The engine renders into an in-memory pixel surface on
//! its own thread.

mod config;
mod script;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use cadence_sdk::{
    Clock, EngineWorker, HostController, MonotonicClock, PixelSurface, SchedulingStrategy,
    HOST_FRAME_BUDGET,
};
use clap::Parser;

use crate::config::RuntimeConfig;
use crate::script::Script;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render scheduling diagnostic: engine on a worker, host on the main thread")]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial strategy: frame-callback, interval-capped or event-driven
    #[arg(long)]
    strategy: Option<SchedulingStrategy>,

    /// Synthetic workload level
    #[arg(long)]
    complexity: Option<u32>,

    /// Animation speed multiplier
    #[arg(long)]
    speed: Option<f32>,

    /// Surface width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Session length in seconds
    #[arg(long)]
    duration_secs: Option<f64>,

    /// Freeze the host loop this many milliseconds after startup
    #[arg(long)]
    freeze_at_ms: Option<u64>,

    /// Length of the host freeze
    #[arg(long)]
    freeze_ms: Option<u64>,

    /// Share of every host frame to burn, in percent
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    load: Option<u8>,

    /// JSON Lines command script
    #[arg(long)]
    script: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<RuntimeConfig> {
        let mut config = match &self.config {
            Some(path) => RuntimeConfig::from_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => RuntimeConfig::default(),
        };
        if let Some(strategy) = self.strategy {
            config.engine.strategy = strategy;
        }
        if let Some(complexity) = self.complexity {
            config.engine.complexity = complexity;
        }
        if let Some(speed) = self.speed {
            config.engine.speed = speed;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(duration) = self.duration_secs {
            config.duration_secs = duration;
        }
        if self.freeze_at_ms.is_some() {
            config.freeze_at_ms = self.freeze_at_ms;
        }
        if let Some(freeze_ms) = self.freeze_ms {
            config.freeze_ms = freeze_ms;
        }
        if let Some(load) = self.load {
            config.load_percent = load;
        }
        if self.script.is_some() {
            config.script = self.script;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config()?;
    let mut script = match &config.script {
        Some(path) => Script::from_file(path)
            .with_context(|| format!("loading script from {}", path.display()))?,
        None => Script::default(),
    };
    let session = Duration::try_from_secs_f64(config.duration_secs)
        .context("duration must be a non-negative number of seconds")?;

    let (worker, port) = EngineWorker::spawn::<PixelSurface>(config.engine.clone())
        .context("spawning the engine thread")?;
    let clock = MonotonicClock::new();
    let surface = PixelSurface::new(config.surface_size());
    let mut host = HostController::new(clock, surface, port);
    host.set_main_thread_load(config.load_percent);

    log::info!(
        "Runtime: {} at complexity {} for {:.1}s.",
        config.engine.strategy,
        config.engine.complexity,
        session.as_secs_f64()
    );
    host.handoff();

    let freeze_at = config.freeze_at_ms.map(Duration::from_millis);
    let mut frozen = false;
    loop {
        let frame_start = clock.now();
        if frame_start >= session {
            break;
        }

        for command in script.due(frame_start) {
            log::info!("Runtime: sending {}", command.to_json());
            host.send(command);
        }
        if !frozen && freeze_at.is_some_and(|at| frame_start >= at) {
            frozen = true;
            host.freeze(Duration::from_millis(config.freeze_ms));
        }

        let tick = host.tick();
        if tick.became_ready {
            log::info!("Runtime: engine ready.");
        }
        for stats in &tick.stats {
            log::info!(
                "Engine: {:.1} fps, render {:.2}ms (avg {:.2}ms, max {:.2}ms)",
                stats.fps,
                stats.render_time,
                stats.avg_render_time,
                stats.max_render_time
            );
        }
        if let Some(report) = tick.main_loop {
            log::info!(
                "Host: {:.1} fps, max gap {:.2}ms, {} dropped",
                report.fps,
                report.max_gap,
                report.frame_drops
            );
        }
        if !host.is_engine_connected() {
            log::warn!("Runtime: engine disconnected early.");
            break;
        }

        let spent = clock.now().saturating_sub(frame_start);
        if let Some(rest) = HOST_FRAME_BUDGET.checked_sub(spent) {
            thread::sleep(rest);
        }
    }

    if script.remaining() > 0 {
        log::warn!("Runtime: {} scripted commands never sent.", script.remaining());
    }
    host.stop();
    drop(host.into_port());
    match worker.join() {
        Some(frames) => log::info!("Runtime: engine rendered {frames} frames."),
        None => anyhow::bail!("engine thread panicked"),
    }
    Ok(())
}
