//! End-to-end loopback session:
//! - Host broadcasts a moving entity; the remote client interpolates it
//! - The host's own in-process client must ignore the loopback broadcast
//! - A reset mid-session recovers as if freshly connected

use glam::Vec3;
use netsync::LoopbackSession;
use scene_core::Transform;
use sync_core::SyncConfig;

fn cfg() -> SyncConfig {
    SyncConfig {
        send_interval: 0.05,
        buffer_time_multiplier: 2,
        ..SyncConfig::default()
    }
}

fn drive(session: &mut LoopbackSession, steps: u32, dt: f64) {
    for _ in 0..steps {
        let now = session.now() + dt;
        // Authority path: 1 unit/s along +X.
        #[allow(clippy::cast_possible_truncation)]
        let pose = Transform {
            translation: Vec3::new(now as f32, 0.0, 0.0),
            ..Transform::default()
        };
        session.host.set_pose(pose);
        session.step(dt);
    }
}

#[test]
fn e2e_remote_client_tracks_host_entity() {
    let mut session = LoopbackSession::new(cfg());
    drive(&mut session, 300, 0.01);

    let authority_x = f64::from(session.host.pose().translation.x);
    let remote_x = f64::from(session.remote.pose().translation.x);
    assert!(remote_x > 0.0, "remote must have started moving");
    let lag = authority_x - remote_x;
    // The follower trails by roughly the buffer window, never leads.
    assert!(lag > 0.0, "follower cannot lead the authority");
    assert!(
        lag < cfg().buffer_time() + 0.1,
        "follower lag {lag} exceeds the expected window"
    );
}

#[test]
fn e2e_host_ignores_its_own_broadcast() {
    let mut session = LoopbackSession::new(cfg());
    drive(&mut session, 300, 0.01);
    assert_eq!(
        session.host.driver.server_snapshots_buffered(),
        0,
        "host-side client buffer must stay empty"
    );
    // And the host's own pose is whatever the authority scripted, untouched
    // by interpolation.
    assert!(f64::from(session.host.pose().translation.x) > 2.9);
}

#[test]
fn e2e_reset_recovers_like_a_fresh_join() {
    let mut session = LoopbackSession::new(cfg());
    drive(&mut session, 200, 0.01);
    assert!(session.remote.pose().translation.x > 0.0);

    session.remote.driver.reset();
    assert_eq!(session.remote.driver.server_snapshots_buffered(), 0);

    // Keep driving: the remote re-seeds from post-reset snapshots and tracks
    // again.
    let before = session.remote.pose().translation.x;
    drive(&mut session, 200, 0.01);
    let after = session.remote.pose().translation.x;
    assert!(
        after > before,
        "remote must resume tracking after a reset ({before} -> {after})"
    );
}
