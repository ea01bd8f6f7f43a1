//! Per-tick interpolation state advance.
//!
//! The receiver plays the remote peer's motion back `buffer_time` seconds
//! behind its reconstructed clock so that a second snapshot is usually
//! available to interpolate toward. When the buffer runs dry the parameter is
//! allowed past 1 and the pair extrapolates instead of freezing.

use crate::buffer::SnapshotBuffer;
use crate::math::inverse_lerp_unclamped;
use crate::snapshot::{interpolate, TransformSnapshot};

/// Mutable accumulators for one playback direction of one entity.
///
/// `remote_time` is the sender's clock as reconstructed locally: seeded from
/// the first buffered snapshot, then advanced by `delta_time` every call and
/// never rewound. `interpolation_time` is the elapsed time within the current
/// `[first, second]` pair, in the same clock units as the timestamps.
#[derive(Debug, Default, Clone, Copy)]
pub struct InterpState {
    pub remote_time: f64,
    pub interpolation_time: f64,
    initialized: bool,
}

impl InterpState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `remote_time` has been seeded from a received snapshot.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Return to the uninitialized state; the next `compute` re-seeds from
    /// whatever snapshot arrives first.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Advance one playback direction by `delta_time` and produce the pose for
/// this tick, or `None` while warming up.
///
/// `buffer_time` is the deliberate playback delay (send interval times the
/// buffer multiplier). The buffer is mutated only to retire an exhausted
/// pair, at most once per call; a `delta_time` large enough to cross several
/// pairs extrapolates rather than skipping ahead.
pub fn compute(
    buffer_time: f64,
    delta_time: f64,
    state: &mut InterpState,
    buffer: &mut SnapshotBuffer,
) -> Option<TransformSnapshot> {
    // Seed the reconstructed remote clock from the first snapshot we ever see.
    if !state.initialized {
        let Some(first) = buffer.first() else {
            return None;
        };
        state.remote_time = first.timestamp;
        state.initialized = true;
    }

    state.remote_time += delta_time;

    if buffer.len() < 2 {
        return None;
    }

    // Hold playback until the pair's far end has aged past the buffer window.
    let second_ts = buffer.second()?.timestamp;
    if second_ts > state.remote_time - buffer_time {
        return None;
    }

    state.interpolation_time += delta_time;

    let mut first = *buffer.first()?;
    let mut second = *buffer.second()?;
    let pair_span = second.timestamp - first.timestamp;
    debug_assert!(pair_span > 0.0, "buffer keys must be strictly increasing");

    if state.interpolation_time >= pair_span && buffer.len() >= 3 {
        // Subtracting the span (rather than zeroing) keeps the fractional
        // overshoot, so playback speed stays steady across pair boundaries.
        state.interpolation_time -= pair_span;
        let retired = buffer.pop_oldest();
        log::debug!(
            "retired snapshot ts={:?}, {} buffered",
            retired.map(|s| s.timestamp),
            buffer.len()
        );
        first = *buffer.first()?;
        second = *buffer.second()?;
    }

    // With only two snapshots the parameter runs past 1 and extrapolates.
    let t = inverse_lerp_unclamped(
        first.timestamp,
        second.timestamp,
        first.timestamp + state.interpolation_time,
    );
    Some(interpolate(&first, &second, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn snap(ts: f64) -> TransformSnapshot {
        TransformSnapshot::new(ts, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }

    #[test]
    fn empty_buffer_never_initializes() {
        let mut state = InterpState::new();
        let mut buf = SnapshotBuffer::new();
        assert!(compute(0.0, 0.5, &mut state, &mut buf).is_none());
        assert!(!state.is_initialized());
        assert!((state.remote_time - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn remote_time_is_monotonic_across_calls() {
        let mut state = InterpState::new();
        let mut buf = SnapshotBuffer::new();
        buf.insert_if_new_enough(snap(10.0));
        let _ = compute(0.0, 0.25, &mut state, &mut buf);
        let after_first = state.remote_time;
        let _ = compute(0.0, 0.0, &mut state, &mut buf);
        assert!((state.remote_time - after_first).abs() < f64::EPSILON);
        let _ = compute(0.0, 0.25, &mut state, &mut buf);
        assert!(state.remote_time > after_first);
    }

    #[test]
    fn reset_returns_to_uninitialized() {
        let mut state = InterpState::new();
        let mut buf = SnapshotBuffer::new();
        buf.insert_if_new_enough(snap(5.0));
        let _ = compute(0.0, 0.1, &mut state, &mut buf);
        assert!(state.is_initialized());
        state.reset();
        assert!(!state.is_initialized());
        assert!((state.remote_time - 0.0).abs() < f64::EPSILON);
        assert!((state.interpolation_time - 0.0).abs() < f64::EPSILON);
    }
}
