//! Per-entity sync driver.
//!
//! Authority is a tagged mode, not a hierarchy: the same driver runs on every
//! node and branches on `NodeRole` plus the config's `client_authority` flag.
//! Each driver carries two independent playback directions (snapshots the
//! server received from the owning client, and snapshots a client received
//! from the server) which share only the kernel.

use crate::config::SyncConfig;
use crate::scheduler::SendScheduler;
use interp_core::{compute, InterpState, SnapshotBuffer, TransformSnapshot};
use net_core::{PoseMsg, PoseSource, Tx};
use scene_core::Transform;

/// Which parts this node plays in the session. A host plays both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRole {
    pub is_server: bool,
    pub is_client: bool,
}

impl NodeRole {
    #[must_use]
    pub fn server() -> Self {
        Self {
            is_server: true,
            is_client: false,
        }
    }

    #[must_use]
    pub fn client() -> Self {
        Self {
            is_server: false,
            is_client: true,
        }
    }

    /// Server and client in one process; outbound server messages loop back.
    #[must_use]
    pub fn host() -> Self {
        Self {
            is_server: true,
            is_client: true,
        }
    }
}

/// One playback direction: accumulators plus the ordered snapshot buffer.
#[derive(Debug, Default)]
struct DirectionState {
    state: InterpState,
    buffer: SnapshotBuffer,
}

impl DirectionState {
    fn admit(&mut self, remote_ts: f64, msg: &PoseMsg) {
        let snap = TransformSnapshot::new(
            remote_ts,
            msg.pose.position,
            msg.pose.rotation,
            msg.pose.scale,
        );
        self.buffer.insert_if_new_enough(snap);
    }

    fn advance(&mut self, buffer_time: f64, dt: f64) -> Option<TransformSnapshot> {
        compute(buffer_time, dt, &mut self.state, &mut self.buffer)
    }

    fn reset(&mut self) {
        self.state.reset();
        self.buffer.clear();
    }
}

/// Per-entity transform synchronization state machine.
pub struct TransformSync {
    cfg: SyncConfig,
    role: NodeRole,
    /// Whether the local node owns this entity (it is the local player's).
    owned: bool,
    tx: Option<Tx>,
    /// Client-sourced snapshots, consumed on the server.
    from_client: DirectionState,
    /// Server-sourced snapshots, consumed on remote clients.
    from_server: DirectionState,
    server_send: SendScheduler,
    client_send: SendScheduler,
    last_tick: Option<f64>,
}

impl TransformSync {
    #[must_use]
    pub fn new(cfg: SyncConfig, role: NodeRole, owned: bool, tx: Option<Tx>) -> Self {
        let interval = cfg.send_interval;
        Self {
            cfg,
            role,
            owned,
            tx,
            from_client: DirectionState::default(),
            from_server: DirectionState::default(),
            server_send: SendScheduler::new(interval),
            client_send: SendScheduler::new(interval),
            last_tick: None,
        }
    }

    /// Route a received pose to the direction its source feeds.
    ///
    /// `remote_ts` is the sender-clock timestamp the transport attributed to
    /// this message (the batch timestamp of its frame).
    pub fn on_received(&mut self, remote_ts: f64, msg: &PoseMsg) {
        match msg.source {
            PoseSource::Server => {
                // Host mode: the server's own broadcast loops back to its
                // in-process client. Consuming it would fill a buffer nothing
                // drains, so it is dropped here.
                if self.role.is_server {
                    log::trace!("ignoring loopback server pose at {remote_ts}");
                    return;
                }
                self.from_server.admit(remote_ts, msg);
            }
            PoseSource::Client => {
                if !self.role.is_server {
                    log::trace!("client node ignoring client-sourced pose");
                    return;
                }
                if !self.cfg.client_authority {
                    log::trace!("server-authoritative entity ignoring client pose");
                    return;
                }
                self.from_client.admit(remote_ts, msg);
            }
        }
    }

    /// Advance one simulation tick at `local_time`, sending and/or applying
    /// an interpolated pose to `pose` (the entity's *local* transform).
    pub fn on_tick(&mut self, local_time: f64, pose: &mut Transform) {
        let dt = self.last_tick.map_or(0.0, |prev| local_time - prev);
        self.last_tick = Some(local_time);
        let buffer_time = self.cfg.buffer_time();

        if self.role.is_server {
            if let Some(tx) = &self.tx {
                self.server_send
                    .run(local_time, pose, PoseSource::Server, tx);
            }
            if self.cfg.client_authority && !self.owned {
                if let Some(snap) = self.from_client.advance(buffer_time, dt) {
                    apply(pose, &snap);
                }
            }
        }
        if self.role.is_client && !self.role.is_server {
            if self.cfg.client_authority && self.owned {
                if let Some(tx) = &self.tx {
                    self.client_send
                        .run(local_time, pose, PoseSource::Client, tx);
                }
            } else if let Some(snap) = self.from_server.advance(buffer_time, dt) {
                apply(pose, &snap);
            }
        }
    }

    /// Drop all buffered snapshots and return both playback directions to
    /// their uninitialized state, e.g. across entity disable/enable.
    pub fn reset(&mut self) {
        self.from_client.reset();
        self.from_server.reset();
        self.server_send.reset();
        self.client_send.reset();
        self.last_tick = None;
    }

    /// Buffered server-sourced snapshot count (client-side playback).
    #[must_use]
    pub fn server_snapshots_buffered(&self) -> usize {
        self.from_server.buffer.len()
    }

    /// Buffered client-sourced snapshot count (server-side playback).
    #[must_use]
    pub fn client_snapshots_buffered(&self) -> usize {
        self.from_client.buffer.len()
    }
}

/// Write a snapshot's pose to the target's local transform.
fn apply(pose: &mut Transform, snap: &TransformSnapshot) {
    pose.translation = snap.position;
    pose.rotation = snap.rotation;
    pose.scale = snap.scale;
}
