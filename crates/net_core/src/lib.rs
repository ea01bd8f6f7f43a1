//! `net_core`: message plumbing between sync peers.
//!
//! Scope
//! - Length framing that stamps each message with the sender's clock, so the
//!   receive path can attribute a remote timestamp to payloads that carry none
//! - Pose wire representation with source tags and bounds-checked decode
//! - In-proc channel pair used by the local session loop
//!
#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod channel;
pub mod frame;
pub mod wire;

pub use channel::{channel, Rx, Tx};
pub use wire::{PoseMsg, PoseRep, PoseSource, WireDecode, WireEncode};
