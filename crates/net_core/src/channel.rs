//! In-proc channel for framed sync messages.
//!
//! Backed by `std::sync::mpsc` with non-blocking drain helpers. The snapshot
//! buffers and the kernel are not thread-safe: messages arriving off the
//! simulation thread must cross through one of these queues and be drained on
//! the simulation thread before the per-tick advance runs.

use std::sync::mpsc::{self, Receiver, Sender};

/// Sending half; cheap to clone, one per outbound link.
#[derive(Clone)]
pub struct Tx(Sender<Vec<u8>>);

/// Receiving half; owned by the node whose inbox this is.
pub struct Rx(Receiver<Vec<u8>>);

/// Create an unbounded sender/receiver pair for framed messages.
#[must_use]
pub fn channel() -> (Tx, Rx) {
    let (s, r) = mpsc::channel::<Vec<u8>>();
    (Tx(s), Rx(r))
}

impl Tx {
    /// Try to send a framed message; returns false if the receiver is gone.
    #[must_use]
    pub fn try_send(&self, framed: Vec<u8>) -> bool {
        self.0.send(framed).is_ok()
    }
}

impl Rx {
    /// Non-blocking receive of a single framed message.
    #[must_use]
    pub fn try_recv(&self) -> Option<Vec<u8>> {
        self.0.try_recv().ok()
    }

    /// Drain everything currently queued, preserving arrival order.
    #[must_use]
    pub fn drain(&self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        while let Some(b) = self.try_recv() {
            out.push(b);
        }
        out
    }
}
