//! Timestamp-ordered snapshot buffer with strict admission.
//!
//! Once interpolation between the two oldest entries has begun, a late
//! arrival landing between them would steer the motion backward when the pair
//! is retired. Admission therefore rejects anything at or before the
//! second-oldest timestamp; late and duplicate packets are dropped silently.

use crate::snapshot::TransformSnapshot;
use std::collections::VecDeque;

/// Ordered mapping `timestamp -> snapshot` with strictly increasing keys.
#[derive(Debug, Default)]
pub struct SnapshotBuffer {
    entries: VecDeque<TransformSnapshot>,
}

impl SnapshotBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Admit `snap` unless it could disturb the pair under interpolation.
    ///
    /// Rules, in order:
    /// 1. empty buffer: insert
    /// 2. one entry: reject timestamps at or before it
    /// 3. two or more: reject timestamps at or before the second-oldest
    /// 4. otherwise insert at the sorted position; exact duplicates drop
    ///
    /// Returns whether the snapshot was admitted. Comparisons use `<=` so a
    /// duplicate of a buffered timestamp is always a no-op.
    pub fn insert_if_new_enough(&mut self, snap: TransformSnapshot) -> bool {
        let floor = match self.entries.len() {
            0 => None,
            1 => Some(self.entries[0].timestamp),
            _ => Some(self.entries[1].timestamp),
        };
        if let Some(floor) = floor {
            if snap.timestamp <= floor {
                log::trace!(
                    "snapshot buffer: dropped stale ts={} (floor {})",
                    snap.timestamp,
                    floor
                );
                return false;
            }
        }
        let mut at = self.entries.len();
        for (i, e) in self.entries.iter().enumerate() {
            if snap.timestamp == e.timestamp {
                log::trace!("snapshot buffer: dropped duplicate ts={}", snap.timestamp);
                return false;
            }
            if snap.timestamp < e.timestamp {
                at = i;
                break;
            }
        }
        self.entries.insert(at, snap);
        debug_assert!(self.is_strictly_increasing(), "buffer keys out of order");
        true
    }

    /// Oldest entry, the `from` end of the active pair.
    #[must_use]
    pub fn first(&self) -> Option<&TransformSnapshot> {
        self.entries.front()
    }

    /// Second-oldest entry, the `to` end of the active pair.
    #[must_use]
    pub fn second(&self) -> Option<&TransformSnapshot> {
        self.entries.get(1)
    }

    /// Retire the oldest entry once interpolation has moved past it.
    pub fn pop_oldest(&mut self) -> Option<TransformSnapshot> {
        self.entries.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransformSnapshot> {
        self.entries.iter()
    }

    fn is_strictly_increasing(&self) -> bool {
        self.entries
            .iter()
            .zip(self.entries.iter().skip(1))
            .all(|(a, b)| a.timestamp < b.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn snap(ts: f64) -> TransformSnapshot {
        TransformSnapshot::new(ts, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }

    #[test]
    fn keys_stay_strictly_increasing() {
        let mut buf = SnapshotBuffer::new();
        for ts in [3.0, 1.0, 2.0, 5.0, 4.0, 4.5] {
            buf.insert_if_new_enough(snap(ts));
        }
        let keys: Vec<f64> = buf.iter().map(|s| s.timestamp).collect();
        let mut sorted = keys.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(keys, sorted);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn single_entry_rejects_older_or_equal() {
        let mut buf = SnapshotBuffer::new();
        assert!(buf.insert_if_new_enough(snap(2.0)));
        assert!(!buf.insert_if_new_enough(snap(2.0)));
        assert!(!buf.insert_if_new_enough(snap(1.0)));
        assert_eq!(buf.len(), 1);
        assert!(buf.insert_if_new_enough(snap(3.0)));
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn late_arrival_between_active_pair_is_rejected() {
        // A then C admitted; any B with A < B <= C must bounce.
        let mut buf = SnapshotBuffer::new();
        assert!(buf.insert_if_new_enough(snap(1.0)));
        assert!(buf.insert_if_new_enough(snap(4.0)));
        assert!(!buf.insert_if_new_enough(snap(2.0)));
        assert!(!buf.insert_if_new_enough(snap(4.0)));
        assert_eq!(buf.len(), 2);
        let keys: Vec<f64> = buf.iter().map(|s| s.timestamp).collect();
        assert_eq!(keys, vec![1.0, 4.0]);
    }

    #[test]
    fn duplicates_of_any_buffered_timestamp_are_idempotent() {
        let mut buf = SnapshotBuffer::new();
        for ts in [1.0, 2.0, 3.0, 4.0] {
            buf.insert_if_new_enough(snap(ts));
        }
        assert!(!buf.insert_if_new_enough(snap(3.0)));
        assert!(!buf.insert_if_new_enough(snap(4.0)));
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn admits_out_of_order_beyond_the_active_pair() {
        let mut buf = SnapshotBuffer::new();
        buf.insert_if_new_enough(snap(1.0));
        buf.insert_if_new_enough(snap(2.0));
        buf.insert_if_new_enough(snap(5.0));
        // 3.0 is newer than the second-oldest (2.0): admitted, in order.
        assert!(buf.insert_if_new_enough(snap(3.0)));
        let keys: Vec<f64> = buf.iter().map(|s| s.timestamp).collect();
        assert_eq!(keys, vec![1.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn clear_empties_the_buffer() {
        let mut buf = SnapshotBuffer::new();
        buf.insert_if_new_enough(snap(1.0));
        buf.insert_if_new_enough(snap(2.0));
        buf.clear();
        assert!(buf.is_empty());
        // Fresh start: an old timestamp is admissible again.
        assert!(buf.insert_if_new_enough(snap(0.5)));
    }
}
