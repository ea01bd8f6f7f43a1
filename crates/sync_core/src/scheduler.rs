//! Rate-limited snapshot sends.
//!
//! A send captures the local pose, encodes it behind a source tag, frames it
//! with the sender's clock (the receiver reconstructs snapshot timestamps
//! from the frame, not the payload), and dispatches on the configured
//! channel.

use net_core::{frame, PoseMsg, PoseRep, PoseSource, Tx, WireEncode};
use scene_core::Transform;

/// One outbound direction's cadence state.
#[derive(Debug)]
pub struct SendScheduler {
    interval: f64,
    last_send: f64,
}

impl SendScheduler {
    #[must_use]
    pub fn new(interval: f32) -> Self {
        Self {
            interval: f64::from(interval),
            // First tick always sends; warm-up on the receiver covers the gap.
            last_send: f64::NEG_INFINITY,
        }
    }

    /// Send the local pose if the interval has elapsed. Returns whether a
    /// message went out.
    pub fn run(&mut self, now: f64, pose: &Transform, source: PoseSource, tx: &Tx) -> bool {
        if now < self.last_send + self.interval {
            return false;
        }
        let msg = PoseMsg {
            source,
            pose: PoseRep {
                position: pose.translation,
                rotation: pose.rotation.normalize(),
                scale: pose.scale,
            },
        };
        let mut payload = Vec::new();
        msg.encode(&mut payload);
        let mut framed = Vec::new();
        frame::write_msg(&mut framed, now, &payload);
        if tx.try_send(framed) {
            self.last_send = now;
            log::trace!("sent {source:?} pose at {now}");
            true
        } else {
            log::warn!("pose send failed: channel receiver gone");
            false
        }
    }

    pub fn reset(&mut self) {
        self.last_send = f64::NEG_INFINITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use net_core::{channel, WireDecode};

    #[test]
    fn respects_the_send_interval() {
        let (tx, rx) = channel();
        let mut sched = SendScheduler::new(0.1);
        let pose = Transform::default();
        assert!(sched.run(0.0, &pose, PoseSource::Server, &tx));
        assert!(!sched.run(0.05, &pose, PoseSource::Server, &tx));
        assert!(sched.run(0.1, &pose, PoseSource::Server, &tx));
        assert_eq!(rx.drain().len(), 2);
    }

    #[test]
    fn frames_carry_the_send_time() {
        let (tx, rx) = channel();
        let mut sched = SendScheduler::new(0.0);
        let pose = Transform::default();
        assert!(sched.run(3.25, &pose, PoseSource::Client, &tx));
        let framed = rx.try_recv().expect("one message");
        let (ts, payload) = frame::read_msg(&framed).expect("frame");
        assert!((ts - 3.25).abs() < f64::EPSILON);
        let mut slice = payload;
        let msg = net_core::PoseMsg::decode(&mut slice).expect("pose");
        assert_eq!(msg.source, PoseSource::Client);
    }
}
