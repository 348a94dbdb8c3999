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

//! The engine's execution context: a dedicated thread running a cooperative
//! loop around a [`RenderEngine`].

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cadence_agents::RenderEngine;
use cadence_core::event::{port_pair, MessagePort};
use cadence_core::{Clock, EngineConfig, EngineMessage, HostMessage, MonotonicClock, RenderSurface};
use cadence_infra::CooperativeLoop;
use flume::RecvTimeoutError;

/// The host's end of the engine channel.
pub type HostPort<S> = MessagePort<HostMessage<S>, EngineMessage>;

type EnginePort<S> = MessagePort<EngineMessage, HostMessage<S>>;

/// Longest wait for a message while nothing is scheduled.
const IDLE_WAIT: Duration = Duration::from_millis(100);

/// Owns the engine thread.
///
/// The thread exits once the host's port is dropped. Dropping the worker
/// joins the thread, so drop the port first.
#[derive(Debug)]
pub struct EngineWorker {
    handle: Option<JoinHandle<u64>>,
}

impl EngineWorker {
    /// Starts an engine on a new thread.
    ///
    /// ## Returns
    /// The worker and the host's end of the message port. Send
    /// [`HostMessage::Init`] with the surface to start rendering.
    pub fn spawn<S: RenderSurface>(config: EngineConfig) -> io::Result<(Self, HostPort<S>)> {
        let (host, engine_port) = port_pair::<HostMessage<S>, EngineMessage>();
        let handle = thread::Builder::new()
            .name("cadence-engine".into())
            .spawn(move || run_engine(config, engine_port))?;
        log::info!("Engine worker thread started.");
        Ok((
            Self {
                handle: Some(handle),
            },
            host,
        ))
    }

    /// Waits for the engine thread to finish.
    ///
    /// ## Returns
    /// The number of frames the engine rendered, or `None` if the thread panicked.
    pub fn join(mut self) -> Option<u64> {
        self.join_inner()
    }

    fn join_inner(&mut self) -> Option<u64> {
        let handle = self.handle.take()?;
        match handle.join() {
            Ok(frames) => Some(frames),
            Err(_) => {
                log::error!("Engine worker thread panicked.");
                None
            }
        }
    }
}

impl Drop for EngineWorker {
    fn drop(&mut self) {
        if self.handle.is_some() {
            log::debug!("Joining engine worker thread...");
            self.join_inner();
        }
    }
}

fn run_engine<S: RenderSurface>(config: EngineConfig, port: EnginePort<S>) -> u64 {
    let config = config.sanitized();
    let clock = MonotonicClock::new();
    let mut event_loop = CooperativeLoop::new(clock, config.refresh_interval());
    let mut engine = RenderEngine::<MonotonicClock, S>::new(config, clock, port.outbox());
    log::debug!("Engine loop running.");

    loop {
        let now = clock.now();
        for fired in event_loop.pop_due(now) {
            engine.on_primitive(fired.handle, &mut event_loop);
        }

        let wait = event_loop
            .next_deadline()
            .map_or(IDLE_WAIT, |deadline| deadline.saturating_sub(clock.now()));

        match port.recv_timeout(wait) {
            Ok(message) => {
                engine.handle_message(message, &mut event_loop);
                for message in port.drain() {
                    engine.handle_message(message, &mut event_loop);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    engine.stop(&mut event_loop);
    log::info!(
        "Engine worker exiting after {} frames.",
        engine.frames_rendered()
    );
    engine.frames_rendered()
}
