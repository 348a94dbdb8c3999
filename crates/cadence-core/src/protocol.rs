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

//! The host/engine message protocol.
//!
//! Commands flow host → engine as [`HostMessage`]s and results flow
//! engine → host as [`EngineMessage`]s. Both directions are fire-and-forget.
//!
//! Payload fields are optional, mirroring the wire format: a command missing
//! a required field is still delivered and the engine treats it as a no-op.
//! The `init` command carries the surface by value and therefore only exists
//! in-process; every other command also has a JSON form, [`WireCommand`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schedule::SchedulingStrategy;
use crate::telemetry::StatsReport;

/// Errors raised while decoding protocol messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The text was not a valid command object.
    #[error("malformed command: {0}")]
    Malformed(#[from] serde_json::Error),
    /// An `init` command was found on the wire; the surface cannot be serialized.
    #[error("`init` carries a transferred surface and cannot be decoded from text")]
    SurfaceNotTransferable,
    /// A strategy name did not match any known strategy.
    #[error("unknown scheduling strategy `{0}`")]
    UnknownStrategy(String),
}

/// A command from the host to the engine.
///
/// `S` is the surface type transferred by [`HostMessage::Init`].
#[derive(Debug)]
pub enum HostMessage<S> {
    /// Hands the surface to the engine and starts the configured strategy.
    Init {
        /// The transferred surface.
        surface: Option<S>,
    },
    /// Switches the scheduling strategy.
    SetStrategy {
        /// The strategy to adopt.
        strategy: Option<SchedulingStrategy>,
    },
    /// Sets the synthetic per-frame workload.
    SetComplexity {
        /// Workload level, `0` disables the workload.
        complexity: Option<u32>,
    },
    /// Sets the animation speed multiplier.
    SetSpeed {
        /// Positive speed multiplier.
        speed: Option<f32>,
    },
    /// Reports the pointer position in surface pixel space.
    PointerMove {
        /// Horizontal position.
        x: Option<f32>,
        /// Vertical position.
        y: Option<f32>,
    },
    /// Requests a single frame under the event-driven strategy.
    TriggerRender,
    /// Halts the render loop.
    Stop,
}

impl<S> HostMessage<S> {
    /// Builds an `init` command.
    pub fn init(surface: S) -> Self {
        HostMessage::Init {
            surface: Some(surface),
        }
    }

    /// Builds a `setStrategy` command.
    pub fn set_strategy(strategy: SchedulingStrategy) -> Self {
        HostMessage::SetStrategy {
            strategy: Some(strategy),
        }
    }

    /// Builds a `setComplexity` command.
    pub fn set_complexity(complexity: u32) -> Self {
        HostMessage::SetComplexity {
            complexity: Some(complexity),
        }
    }

    /// Builds a `setSpeed` command.
    pub fn set_speed(speed: f32) -> Self {
        HostMessage::SetSpeed { speed: Some(speed) }
    }

    /// Builds a `pointerMove` command.
    pub fn pointer_move(x: f32, y: f32) -> Self {
        HostMessage::PointerMove {
            x: Some(x),
            y: Some(y),
        }
    }

    /// The wire name of the command, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            HostMessage::Init { .. } => "init",
            HostMessage::SetStrategy { .. } => "setStrategy",
            HostMessage::SetComplexity { .. } => "setComplexity",
            HostMessage::SetSpeed { .. } => "setSpeed",
            HostMessage::PointerMove { .. } => "pointerMove",
            HostMessage::TriggerRender => "triggerRender",
            HostMessage::Stop => "stop",
        }
    }
}

/// The serializable subset of [`HostMessage`]: everything except `init`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WireCommand {
    /// See [`HostMessage::SetStrategy`].
    SetStrategy {
        /// The strategy to adopt.
        #[serde(default)]
        strategy: Option<SchedulingStrategy>,
    },
    /// See [`HostMessage::SetComplexity`].
    SetComplexity {
        /// Workload level.
        #[serde(default)]
        complexity: Option<u32>,
    },
    /// See [`HostMessage::SetSpeed`].
    SetSpeed {
        /// Speed multiplier.
        #[serde(default)]
        speed: Option<f32>,
    },
    /// See [`HostMessage::PointerMove`].
    PointerMove {
        /// Horizontal position.
        #[serde(default)]
        x: Option<f32>,
        /// Vertical position.
        #[serde(default)]
        y: Option<f32>,
    },
    /// See [`HostMessage::TriggerRender`].
    TriggerRender,
    /// See [`HostMessage::Stop`].
    Stop,
}

impl WireCommand {
    /// Decodes a command from its JSON form.
    ///
    /// ## Errors
    /// [`ProtocolError::SurfaceNotTransferable`] for `init`, and
    /// [`ProtocolError::Malformed`] for anything that is not a known command.
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Decodes a command from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProtocolError> {
        if value.get("type").and_then(|t| t.as_str()) == Some("init") {
            return Err(ProtocolError::SurfaceNotTransferable);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Encodes the command as JSON.
    pub fn to_json(&self) -> String {
        // Plain data with string keys: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl<S> From<WireCommand> for HostMessage<S> {
    fn from(command: WireCommand) -> Self {
        match command {
            WireCommand::SetStrategy { strategy } => HostMessage::SetStrategy { strategy },
            WireCommand::SetComplexity { complexity } => HostMessage::SetComplexity { complexity },
            WireCommand::SetSpeed { speed } => HostMessage::SetSpeed { speed },
            WireCommand::PointerMove { x, y } => HostMessage::PointerMove { x, y },
            WireCommand::TriggerRender => HostMessage::TriggerRender,
            WireCommand::Stop => HostMessage::Stop,
        }
    }
}

/// A message from the engine to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EngineMessage {
    /// Acknowledges `init`.
    Ready,
    /// A periodic statistics report.
    Stats(StatsReport),
}
