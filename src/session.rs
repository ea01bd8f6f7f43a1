//! Session wiring: nodes, inboxes, and the local loopback topology.
//!
//! A [`Node`] owns a world, one synced entity, that entity's driver, and an
//! inbox of framed messages. Inboxes are drained on the simulation thread
//! before the driver ticks, which is the hand-off the non-thread-safe kernel
//! requires.

use anyhow::Result;
use net_core::{channel, frame, PoseMsg, Rx, Tx, WireDecode};
use scene_core::{Entity, Transform, World};
use sync_core::{NodeRole, SyncConfig, TransformSync};

/// One simulation participant with a single synced entity.
pub struct Node {
    pub world: World,
    pub entity: Entity,
    pub driver: TransformSync,
    inbox: Rx,
}

impl Node {
    #[must_use]
    pub fn new(
        cfg: SyncConfig,
        role: NodeRole,
        owned: bool,
        tx: Option<Tx>,
        inbox: Rx,
        spawn_pose: Transform,
    ) -> Self {
        let mut world = World::new();
        let entity = world.spawn(spawn_pose, None);
        Self {
            world,
            entity,
            driver: TransformSync::new(cfg, role, owned, tx),
            inbox,
        }
    }

    /// Drain the inbox, route receipts, and advance the driver one tick.
    pub fn pump(&mut self, local_time: f64) {
        for framed in self.inbox.drain() {
            match parse_pose_frame(&framed) {
                Ok((remote_ts, msg)) => self.driver.on_received(remote_ts, &msg),
                Err(e) => log::warn!("dropping malformed sync frame: {e:#}"),
            }
        }
        if let Some(pose) = self.world.transform_mut(self.entity) {
            self.driver.on_tick(local_time, pose);
        }
    }

    /// The synced entity's current local pose.
    #[must_use]
    pub fn pose(&self) -> Transform {
        self.world
            .transform(self.entity)
            .copied()
            .unwrap_or_default()
    }

    /// Overwrite the synced entity's local pose (authority-side scripting).
    pub fn set_pose(&mut self, pose: Transform) {
        if let Some(t) = self.world.transform_mut(self.entity) {
            *t = pose;
        }
    }
}

/// Unwrap a framed message into its batch timestamp and decoded pose.
pub fn parse_pose_frame(framed: &[u8]) -> Result<(f64, PoseMsg)> {
    let (remote_ts, payload) = frame::read_msg(framed)?;
    let mut slice = payload;
    let msg = PoseMsg::decode(&mut slice)?;
    Ok((remote_ts, msg))
}

/// A host (server + in-process client) broadcasting to itself and one remote
/// client. The host's own receipt exercises the loopback guard; the remote
/// interpolates.
pub struct LoopbackSession {
    pub host: Node,
    pub remote: Node,
    server_out: Rx,
    host_feed: Tx,
    remote_feed: Tx,
    now: f64,
}

impl LoopbackSession {
    #[must_use]
    pub fn new(cfg: SyncConfig) -> Self {
        let (server_tx, server_out) = channel();
        let (host_feed, host_in) = channel();
        let (remote_feed, remote_in) = channel();
        let host = Node::new(
            cfg.clone(),
            NodeRole::host(),
            false,
            Some(server_tx),
            host_in,
            Transform::default(),
        );
        let remote = Node::new(
            cfg,
            NodeRole::client(),
            false,
            None,
            remote_in,
            Transform::default(),
        );
        Self {
            host,
            remote,
            server_out,
            host_feed,
            remote_feed,
            now: 0.0,
        }
    }

    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance the whole session by `dt`: deliver last tick's broadcast to
    /// every client inbox (the host's included), then pump both nodes.
    pub fn step(&mut self, dt: f64) {
        self.now += dt;
        for framed in self.server_out.drain() {
            let _ = self.host_feed.try_send(framed.clone());
            let _ = self.remote_feed.try_send(framed);
        }
        self.host.pump(self.now);
        self.remote.pump(self.now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn malformed_frames_are_dropped_not_fatal() {
        let (tx, rx) = channel();
        let mut node = Node::new(
            SyncConfig::default(),
            NodeRole::client(),
            false,
            None,
            rx,
            Transform::default(),
        );
        assert!(tx.try_send(vec![0xDE, 0xAD]));
        node.pump(0.0);
        assert_eq!(node.pose().translation, Vec3::ZERO);
    }
}
