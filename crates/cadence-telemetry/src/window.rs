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

//! Fixed-capacity rolling windows.

/// A fixed-size circular buffer. Once full, every push evicts the oldest value.
#[derive(Debug, Clone)]
pub struct RingBuffer<T, const N: usize> {
    data: [T; N],
    index: usize,
    count: usize,
}

impl<T: Default + Copy, const N: usize> RingBuffer<T, N> {
    /// Creates a new, empty ring buffer.
    pub fn new() -> Self {
        Self {
            data: [T::default(); N],
            index: 0,
            count: 0,
        }
    }

    /// Pushes a new value, overwriting the oldest if full.
    pub fn push(&mut self, value: T) {
        if N == 0 {
            return;
        }
        self.data[self.index] = value;
        self.index = (self.index + 1) % N;
        if self.count < N {
            self.count += 1;
        }
    }

    /// Number of values currently held. Never exceeds `N`.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no value has been pushed since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` once the buffer holds `N` values.
    pub fn is_full(&self) -> bool {
        self.count == N
    }

    /// The maximum number of values held.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The most recently pushed value.
    pub fn latest(&self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        Some(self.data[(self.index + N - 1) % N])
    }

    /// Forgets every value.
    pub fn clear(&mut self) {
        self.index = 0;
        self.count = 0;
    }

    /// Iterates over the values from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let start = (self.index + N - self.count) % N.max(1);
        (0..self.count).map(move |i| &self.data[(start + i) % N])
    }
}

impl<T: Default + Copy, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<f64, N> {
    /// Arithmetic mean of the values, or `0.0` when empty.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.iter().sum::<f64>() / self.count as f64
    }

    /// Largest value, or `0.0` when empty.
    pub fn max(&self) -> f64 {
        self.iter().copied().fold(0.0, f64::max)
    }

    /// Sum of the values.
    pub fn sum(&self) -> f64 {
        self.iter().sum()
    }
}
