//! Timestamped length framing for sync messages.
//!
//! Format (little-endian):
//! - 4-byte magic `NSF1`
//! - f64 TS (sender-clock seconds for the whole batch)
//! - u32 LEN (bytes of payload)
//! - [u8; LEN] payload
//!
//! Pose payloads carry no timestamp of their own: the frame's TS is the
//! remote time attributed to every snapshot it delivers. This is the
//! `remote_timestamp_for(message)` contract the receive path relies on, and
//! it keeps per-snapshot bandwidth down when several share a batch.

const FRAME_MAGIC: [u8; 4] = *b"NSF1";
const MAX_FRAME_LEN: usize = 65_536; // pose traffic is tiny; cap hard

/// Write a framed message into `out`, appending to any existing bytes.
/// `remote_ts` is the sender's clock at batch time, in seconds.
pub fn write_msg(out: &mut Vec<u8>, remote_ts: f64, payload: &[u8]) {
    out.extend_from_slice(&FRAME_MAGIC);
    out.extend_from_slice(&remote_ts.to_le_bytes());
    let len = u32::try_from(payload.len()).unwrap_or(0);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(payload);
}

/// Read a single framed message. Returns the batch timestamp and the payload
/// slice, which borrows from `inp`.
pub fn read_msg(inp: &[u8]) -> anyhow::Result<(f64, &[u8])> {
    use anyhow::bail;
    if inp.len() < 16 {
        bail!("short frame header");
    }
    if inp[0..4] != FRAME_MAGIC {
        bail!("bad frame magic");
    }
    let mut tsb = [0u8; 8];
    tsb.copy_from_slice(&inp[4..12]);
    let ts = f64::from_le_bytes(tsb);
    if !ts.is_finite() {
        bail!("non-finite frame timestamp");
    }
    let mut lenb = [0u8; 4];
    lenb.copy_from_slice(&inp[12..16]);
    let len = u32::from_le_bytes(lenb) as usize;
    if len > MAX_FRAME_LEN {
        bail!("frame too large: {len} > {MAX_FRAME_LEN}");
    }
    if inp.len() < 16 + len {
        bail!("short frame payload");
    }
    Ok((ts, &inp[16..16 + len]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_preserves_timestamp_and_payload() {
        let payload = b"pose";
        let mut buf = Vec::new();
        write_msg(&mut buf, 12.375, payload);
        let (ts, got) = read_msg(&buf).expect("read");
        assert!((ts - 12.375).abs() < f64::EPSILON);
        assert_eq!(got, payload);
    }

    #[test]
    fn rejects_bad_magic_and_oversize() {
        let mut buf = Vec::new();
        write_msg(&mut buf, 1.0, b"x");
        buf[0] = b'B';
        assert!(read_msg(&buf).is_err());
        // Fix magic but declare an oversized payload to trip the cap.
        buf[0..4].copy_from_slice(&FRAME_MAGIC);
        buf[12..16].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(read_msg(&buf).is_err());
    }

    #[test]
    fn rejects_truncated_frames() {
        let mut buf = Vec::new();
        write_msg(&mut buf, 1.0, b"abcdef");
        assert!(read_msg(&buf[..10]).is_err());
        assert!(read_msg(&buf[..buf.len() - 1]).is_err());
    }

    #[test]
    fn rejects_non_finite_timestamp() {
        let mut buf = Vec::new();
        write_msg(&mut buf, f64::NAN, b"x");
        assert!(read_msg(&buf).is_err());
    }
}
