//! `interp_core`: time-ordered snapshot buffering and interpolation.
//!
//! Scope
//! - Unclamped lerp/slerp math primitives over `glam` types
//! - `TransformSnapshot`: a pose stamped with the sender's clock
//! - `SnapshotBuffer`: strictly ordered admission (`insert_if_new_enough`)
//! - `compute`: the per-tick interpolation state advance
//!
//! The kernel is clock-agnostic: callers pass elapsed `delta_time` in and the
//! remote clock is reconstructed from received timestamps. Nothing in this
//! crate does I/O or allocates on the per-tick path.

pub mod buffer;
pub mod kernel;
pub mod math;
pub mod snapshot;

pub use buffer::SnapshotBuffer;
pub use kernel::{compute, InterpState};
pub use snapshot::{interpolate, TransformSnapshot};
