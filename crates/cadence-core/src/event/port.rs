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

use std::time::Duration;

use flume::{Receiver, RecvTimeoutError, Sender, TryRecvError};

/// Creates two connected ports.
///
/// Messages posted on the first port are received by the second and vice versa.
/// Delivery preserves send order and never drops a message while the receiving
/// port is alive.
///
/// ## Returns
/// `(a, b)` where `a` sends `A` and receives `B`.
pub fn port_pair<A, B>() -> (MessagePort<A, B>, MessagePort<B, A>) {
    let (a_tx, a_rx) = flume::unbounded();
    let (b_tx, b_rx) = flume::unbounded();
    log::debug!("Message port pair created.");
    (
        MessagePort {
            sender: a_tx,
            receiver: b_rx,
        },
        MessagePort {
            sender: b_tx,
            receiver: a_rx,
        },
    )
}

/// One end of a bidirectional message channel.
#[derive(Debug)]
pub struct MessagePort<Out, In> {
    sender: Sender<Out>,
    receiver: Receiver<In>,
}

impl<Out, In> MessagePort<Out, In> {
    /// Posts a message to the peer without blocking.
    ///
    /// ## Returns
    /// `false` if the peer has gone away; the message is discarded and an
    /// error is logged.
    pub fn post(&self, message: Out) -> bool {
        if let Err(e) = self.sender.send(message) {
            log::error!("Failed to post message: {e}. Peer likely disconnected.");
            return false;
        }
        true
    }

    /// Returns the next pending message, if any.
    pub fn try_recv(&self) -> Option<In> {
        match self.receiver.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Waits up to `timeout` for the next message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<In, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drains every message currently pending, in send order.
    pub fn drain(&self) -> impl Iterator<Item = In> + '_ {
        self.receiver.try_iter()
    }

    /// Returns `true` while the peer port still exists.
    pub fn is_peer_connected(&self) -> bool {
        !self.sender.is_disconnected()
    }

    /// Returns a send-only handle to the peer.
    pub fn outbox(&self) -> Outbox<Out> {
        Outbox {
            sender: self.sender.clone(),
        }
    }
}

/// A cloneable, send-only handle to a port's peer.
#[derive(Debug)]
pub struct Outbox<T> {
    sender: Sender<T>,
}

impl<T> Clone for Outbox<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T> Outbox<T> {
    /// Creates an outbox feeding `sender`.
    pub fn new(sender: Sender<T>) -> Self {
        Self { sender }
    }

    /// Posts a message without blocking. See [`MessagePort::post`].
    pub fn post(&self, message: T) -> bool {
        if let Err(e) = self.sender.send(message) {
            log::error!("Failed to post message: {e}. Peer likely disconnected.");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[derive(Debug, Clone, PartialEq)]
    enum Ping {
        Hello(u32),
        Bye,
    }

    #[test]
    fn messages_arrive_in_send_order() {
        let (host, engine) = port_pair::<Ping, Ping>();
        for i in 0..5 {
            assert!(host.post(Ping::Hello(i)));
        }
        host.post(Ping::Bye);

        let received: Vec<_> = engine.drain().collect();
        assert_eq!(received.len(), 6);
        assert_eq!(received[0], Ping::Hello(0));
        assert_eq!(received[4], Ping::Hello(4));
        assert_eq!(received[5], Ping::Bye);
        assert_eq!(engine.try_recv(), None);
    }

    #[test]
    fn both_directions_are_independent() {
        let (host, engine) = port_pair::<u32, &'static str>();
        host.post(7);
        engine.post("ready");

        assert_eq!(engine.try_recv(), Some(7));
        assert_eq!(host.try_recv(), Some("ready"));
    }

    #[test]
    fn post_from_another_thread() {
        let (host, engine) = port_pair::<Ping, ()>();
        let outbox = host.outbox();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            outbox.post(Ping::Hello(1));
        });

        let received = engine
            .recv_timeout(Duration::from_secs(1))
            .expect("message should arrive");
        assert_eq!(received, Ping::Hello(1));
        handle.join().expect("thread join failed");
    }

    #[test]
    fn posting_to_a_dropped_peer_fails_softly() {
        let (host, engine) = port_pair::<Ping, ()>();
        assert!(host.is_peer_connected());
        drop(engine);

        assert!(!host.is_peer_connected());
        assert!(!host.post(Ping::Bye));
    }
}
