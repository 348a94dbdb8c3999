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

//! Runtime configuration: JSON file first, command-line flags on top.

use std::fs;
use std::path::{Path, PathBuf};

use cadence_sdk::{EngineConfig, SurfaceSize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading configuration or scripts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The offending file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for the expected shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The offending file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// A script line is not a valid entry.
    #[error("script line {line}: {message}")]
    Script {
        /// One-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

/// Everything the runtime needs to run one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Engine parameters.
    pub engine: EngineConfig,
    /// Session length.
    pub duration_secs: f64,
    /// When to freeze the host loop, counted from startup.
    pub freeze_at_ms: Option<u64>,
    /// How long a freeze lasts.
    pub freeze_ms: u64,
    /// Share of every host frame burned on purpose, in percent.
    pub load_percent: u8,
    /// Command script played back by the host loop.
    pub script: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            engine: EngineConfig::default(),
            duration_secs: 5.0,
            freeze_at_ms: None,
            freeze_ms: 2000,
            load_percent: 0,
            script: None,
        }
    }
}

impl RuntimeConfig {
    /// Loads a configuration file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The surface dimensions.
    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_sdk::SchedulingStrategy;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"width": 1024, "engine": {{"strategy": "timeout", "complexity": 40}}}}"#
        )
        .unwrap();

        let config = RuntimeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.surface_size(), SurfaceSize::new(1024, 600));
        assert_eq!(config.engine.strategy, SchedulingStrategy::IntervalCapped);
        assert_eq!(config.engine.complexity, 40);
        assert_eq!(config.engine.speed, 3.0);
        assert_eq!(config.freeze_ms, 2000);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RuntimeConfig::from_file(Path::new("/nonexistent/cadence.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = RuntimeConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
