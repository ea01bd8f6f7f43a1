//! Pose wire representation.
//!
//! A pose message is a leading source tag (`TAG_CLIENT_POSE` or
//! `TAG_SERVER_POSE`, so decoders reject the wrong payload kind immediately)
//! followed by ten little-endian f32s: position xyz, rotation xyzw, scale
//! xyz. No timestamp travels in the payload; the enclosing frame attributes
//! remote time for the whole batch.

use glam::{Quat, Vec3};

pub const TAG_CLIENT_POSE: u8 = 0xB1;
pub const TAG_SERVER_POSE: u8 = 0xB2;

/// Types implementing wire encoding write themselves into a byte buffer.
pub trait WireEncode {
    fn encode(&self, out: &mut Vec<u8>);
}

/// Types implementing wire decoding reconstruct themselves from a byte slice.
pub trait WireDecode: Sized {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self>;
}

/// Which side of the session asserted this pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseSource {
    Client,
    Server,
}

/// A local-space pose as it travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseRep {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

/// A tagged pose message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseMsg {
    pub source: PoseSource,
    pub pose: PoseRep,
}

impl WireEncode for PoseMsg {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(match self.source {
            PoseSource::Client => TAG_CLIENT_POSE,
            PoseSource::Server => TAG_SERVER_POSE,
        });
        let p = self.pose.position;
        let r = self.pose.rotation;
        let s = self.pose.scale;
        for c in [p.x, p.y, p.z, r.x, r.y, r.z, r.w, s.x, s.y, s.z] {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }
}

impl WireDecode for PoseMsg {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        use anyhow::bail;
        fn take<const N: usize>(inp: &mut &[u8]) -> anyhow::Result<[u8; N]> {
            if inp.len() < N {
                anyhow::bail!("short read");
            }
            let (a, b) = inp.split_at(N);
            *inp = b;
            let mut buf = [0u8; N];
            buf.copy_from_slice(a);
            Ok(buf)
        }
        let tag = inp
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("short read"))?;
        *inp = &inp[1..];
        let source = match tag {
            TAG_CLIENT_POSE => PoseSource::Client,
            TAG_SERVER_POSE => PoseSource::Server,
            other => bail!("not a pose tag: {other:#04x}"),
        };
        let mut f = [0.0f32; 10];
        for v in &mut f {
            *v = f32::from_le_bytes(take::<4>(inp)?);
        }
        // Quantization or truncation upstream may leave the rotation slightly
        // off unit length; renormalize before it reaches the interpolator.
        let rotation = Quat::from_xyzw(f[3], f[4], f[5], f[6]);
        let len = rotation.length();
        if !len.is_normal() {
            bail!("degenerate rotation");
        }
        let rotation = rotation * len.recip();
        Ok(Self {
            source,
            pose: PoseRep {
                position: Vec3::new(f[0], f[1], f[2]),
                rotation,
                scale: Vec3::new(f[7], f[8], f[9]),
            },
        })
    }
}
