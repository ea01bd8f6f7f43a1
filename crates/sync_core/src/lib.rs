//! `sync_core`: per-entity transform synchronization.
//!
//! A [`driver::TransformSync`] sits on every synced entity on every node. It
//! publishes the local pose on a fixed cadence when this node has authority
//! over the entity, and otherwise feeds received snapshots through the
//! interpolation kernel and applies the result to the entity's local
//! transform.

pub mod config;
pub mod driver;
pub mod scheduler;

pub use config::{load_default, ChannelKind, SyncConfig};
pub use driver::{NodeRole, TransformSync};
pub use scheduler::SendScheduler;
