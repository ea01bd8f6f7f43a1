//! Loopback demo: a host broadcasts a circling entity to a remote client
//! over a lossy, jittery link; the remote interpolates it smoothly.
//!
//! Run with `RUST_LOG=debug` to watch retirement and admission decisions.

use glam::{Quat, Vec3};
use net_core::channel;
use rand::Rng;
use scene_core::Transform;
use sync_core::{NodeRole, SyncConfig, TransformSync};

/// Delivers frames with random latency, occasional drops, and the reordering
/// that falls out of unequal delays.
struct ChaosLink {
    in_flight: Vec<(f64, Vec<u8>)>,
    min_delay: f64,
    max_delay: f64,
    drop_chance: f64,
}

impl ChaosLink {
    fn new(min_delay: f64, max_delay: f64, drop_chance: f64) -> Self {
        Self {
            in_flight: Vec::new(),
            min_delay,
            max_delay,
            drop_chance,
        }
    }

    fn offer(&mut self, now: f64, framed: Vec<u8>) {
        let mut rng = rand::thread_rng();
        if rng.gen_bool(self.drop_chance) {
            log::debug!("chaos link dropped a frame at {now:.3}");
            return;
        }
        let deliver_at = now + rng.gen_range(self.min_delay..self.max_delay);
        self.in_flight.push((deliver_at, framed));
    }

    fn due(&mut self, now: f64) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < self.in_flight.len() {
            if self.in_flight[i].0 <= now {
                out.push(self.in_flight.swap_remove(i).1);
            } else {
                i += 1;
            }
        }
        out
    }
}

fn run() -> anyhow::Result<()> {
    let cfg = sync_core::load_default()?;
    log::info!(
        "loopback demo: send_interval={}s buffer_time={}s channel={:?}",
        cfg.send_interval,
        cfg.buffer_time(),
        cfg.channel
    );

    let (server_tx, server_out) = channel();
    let (remote_tx, remote_in) = channel();
    let mut authority = TransformSync::new(cfg.clone(), NodeRole::host(), false, Some(server_tx));
    let mut follower = netsync::Node::new(
        cfg,
        NodeRole::client(),
        false,
        None,
        remote_in,
        Transform::default(),
    );
    let mut link = ChaosLink::new(0.02, 0.09, 0.10);

    let dt = 0.02; // 50 Hz simulation
    let mut authority_pose = Transform::default();
    for step in 0..600_i32 {
        let now = f64::from(step) * dt;
        // Scripted motion: a 4 m circle, one revolution per 8 s.
        #[allow(clippy::cast_possible_truncation)]
        let phase = (now * std::f64::consts::TAU / 8.0) as f32;
        authority_pose.translation = Vec3::new(4.0 * phase.cos(), 0.0, 4.0 * phase.sin());
        authority_pose.rotation = Quat::from_rotation_y(-phase);
        authority.on_tick(now, &mut authority_pose);

        for framed in server_out.drain() {
            link.offer(now, framed);
        }
        for framed in link.due(now) {
            let _ = remote_tx.try_send(framed);
        }
        follower.pump(now);

        if step % 25 == 0 {
            let remote = follower.pose().translation;
            log::info!(
                "t={now:5.2}s authority=({:6.2},{:6.2}) remote=({:6.2},{:6.2}) buffered={}",
                authority_pose.translation.x,
                authority_pose.translation.z,
                remote.x,
                remote.z,
                follower.driver.server_snapshots_buffered()
            );
        }
    }
    Ok(())
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();
    if let Err(e) = run() {
        eprintln!("error: {e}");
    }
}
