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

//! Provides the message transport between the host and engine contexts.
//!
//! The two contexts share no memory; they exchange discrete messages over a
//! pair of ordered, unbounded channels. A [`MessagePort`] is one end of that
//! pair: it posts outgoing messages without blocking and hands incoming ones
//! to its owner when the owner's loop reaches an idle point.

mod port;

pub use self::port::{port_pair, MessagePort, Outbox};
