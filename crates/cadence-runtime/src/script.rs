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

//! Timed command scripts.
//!
//! A script is a JSON Lines file. Each line holds the host-relative time at
//! which a command is sent and the command itself:
//!
//! ```text
//! {"at_ms": 1000, "command": {"type": "setStrategy", "strategy": "event-driven"}}
//! {"at_ms": 1200, "command": {"type": "triggerRender"}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::fs;
use std::path::Path;
use std::time::Duration;

use cadence_sdk::WireCommand;
use serde::Deserialize;

use crate::config::ConfigError;

#[derive(Debug, Deserialize)]
struct RawEntry {
    at_ms: u64,
    command: serde_json::Value,
}

/// One scheduled command.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEntry {
    /// When to send, measured from startup.
    pub at: Duration,
    /// What to send.
    pub command: WireCommand,
}

/// A list of commands ordered by send time, played back by the host loop.
#[derive(Debug, Clone, Default)]
pub struct Script {
    entries: Vec<ScriptEntry>,
    cursor: usize,
}

impl Script {
    /// Reads and parses a script file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses script text. Entries are sorted by time; ties keep file order.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let script_error = |message: String| ConfigError::Script {
                line: index + 1,
                message,
            };
            let raw: RawEntry =
                serde_json::from_str(line).map_err(|e| script_error(e.to_string()))?;
            let command =
                WireCommand::from_value(raw.command).map_err(|e| script_error(e.to_string()))?;
            entries.push(ScriptEntry {
                at: Duration::from_millis(raw.at_ms),
                command,
            });
        }
        entries.sort_by_key(|entry| entry.at);
        Ok(Self { entries, cursor: 0 })
    }

    /// Commands whose time has come, each returned once.
    pub fn due(&mut self, elapsed: Duration) -> Vec<WireCommand> {
        let start = self.cursor;
        while self
            .entries
            .get(self.cursor)
            .is_some_and(|entry| entry.at <= elapsed)
        {
            self.cursor += 1;
        }
        self.entries[start..self.cursor]
            .iter()
            .map(|entry| entry.command.clone())
            .collect()
    }

    /// Number of entries not yet played.
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Whether the script holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
