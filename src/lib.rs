//! `netsync`: snapshot-interpolated transform synchronization.
//!
//! The member crates do the real work (`interp_core` buffering and
//! interpolation, `net_core` plumbing, `sync_core` the per-entity driver);
//! this crate wires them into runnable session nodes and hosts the loopback
//! demo and end-to-end tests.

pub mod session;

pub use session::{LoopbackSession, Node};
