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

//! Synthetic per-frame CPU cost.

use std::hint::black_box;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Iterations added per complexity level.
pub const ITERATIONS_PER_LEVEL: u64 = 10_000;

/// What one workload run did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkloadOutcome {
    /// Iterations performed.
    pub iterations: u64,
    /// Sum of the computed values, kept so the work cannot be elided.
    pub checksum: f64,
}

/// Burns CPU time in proportion to a complexity level.
#[derive(Debug, Clone)]
pub struct SyntheticWorkload {
    rng: Pcg64Mcg,
}

impl SyntheticWorkload {
    /// Creates a workload with its own random stream.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Iteration count for `complexity`; monotonic in its argument.
    pub const fn iterations_for(complexity: u32) -> u64 {
        complexity as u64 * ITERATIONS_PER_LEVEL
    }

    /// Runs `complexity * 10 000` iterations of `sqrt(random * 1000)`.
    pub fn run(&mut self, complexity: u32) -> WorkloadOutcome {
        let iterations = Self::iterations_for(complexity);
        let mut checksum = 0.0f64;
        for _ in 0..iterations {
            let sample: f64 = self.rng.gen();
            checksum += black_box((sample * 1000.0).sqrt());
        }
        WorkloadOutcome {
            iterations,
            checksum: black_box(checksum),
        }
    }
}
