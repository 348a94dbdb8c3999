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

use std::thread;
use std::time::{Duration, Instant};

use cadence_core::MonotonicClock;
use cadence_sdk::{
    EngineConfig, EngineWorker, HostController, PixelSurface, RecordingSurface,
    SchedulingStrategy, SurfaceSize, WireCommand,
};

fn pump_until<S, F>(host: &mut HostController<MonotonicClock, S>, limit: Duration, done: F)
where
    S: cadence_core::RenderSurface,
    F: Fn(&HostController<MonotonicClock, S>) -> bool,
{
    let start = Instant::now();
    while !done(host) && start.elapsed() < limit {
        host.tick();
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn worker_renders_and_reports_until_the_port_closes() {
    let config = EngineConfig {
        complexity: 0,
        seed: Some(3),
        ..EngineConfig::default()
    };
    let (worker, port) = EngineWorker::spawn::<RecordingSurface>(config).expect("spawn");
    let surface = RecordingSurface::new(SurfaceSize::new(320, 240));
    let mut host = HostController::new(MonotonicClock::new(), surface, port);

    assert!(host.handoff());
    assert!(!host.handoff());
    pump_until(&mut host, Duration::from_secs(5), |h| h.last_stats().is_some());

    assert!(host.is_ready());
    let stats = host.last_stats().expect("engine reported statistics");
    assert!(stats.frames_rendered > 0);
    assert!(stats.render_time >= 0.0);

    let command = WireCommand::from_json(r#"{"type":"setStrategy","strategy":"event"}"#).unwrap();
    assert!(host.send(command));
    host.stop();
    drop(host.into_port());

    let frames = worker.join().expect("worker exits cleanly");
    assert!(frames > 0);
}

#[test]
fn event_driven_worker_renders_only_on_triggers() {
    let config = EngineConfig {
        strategy: SchedulingStrategy::EventDriven,
        complexity: 0,
        report_interval_ms: 1.0,
        seed: Some(4),
        ..EngineConfig::default()
    };
    let (worker, port) = EngineWorker::spawn::<PixelSurface>(config).expect("spawn");
    let mut host = HostController::new(
        MonotonicClock::new(),
        PixelSurface::new(SurfaceSize::new(64, 64)),
        port,
    );
    host.handoff();

    pump_until(&mut host, Duration::from_secs(5), |h| h.is_ready());
    thread::sleep(Duration::from_millis(50));
    host.tick();
    assert!(host.is_ready());
    assert!(host.last_stats().is_none());

    for i in 0..5 {
        host.pointer_move(i as f32 * 10.0, 20.0);
        thread::sleep(Duration::from_millis(5));
    }
    drop(host.into_port());
    assert_eq!(worker.join(), Some(5));
}

#[test]
fn worker_survives_unusable_timing_values() {
    let config = EngineConfig {
        strategy: SchedulingStrategy::IntervalCapped,
        complexity: 0,
        refresh_rate_hz: 0.0,
        interval_ms: 1e300,
        report_interval_ms: f64::INFINITY,
        seed: Some(6),
        ..EngineConfig::default()
    };
    let (worker, port) = EngineWorker::spawn::<RecordingSurface>(config).expect("spawn");
    let surface = RecordingSurface::new(SurfaceSize::new(64, 64));
    let mut host = HostController::new(MonotonicClock::new(), surface, port);
    host.handoff();

    pump_until(&mut host, Duration::from_secs(5), |h| h.last_stats().is_some());
    assert!(host.is_ready());
    assert!(host.last_stats().is_some());

    drop(host.into_port());
    let frames = worker.join().expect("worker exits cleanly");
    assert!(frames > 0);
}
