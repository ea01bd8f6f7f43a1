//! Per-entity sync configuration: loaded from `data/config/netsync.toml`
//! with optional env overrides, falling back to defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Delivery class the transport offers for outbound snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Reliable,
    Unreliable,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// When true the owning client asserts the canonical pose and the server
    /// interpolates; otherwise the server is authoritative.
    pub client_authority: bool,
    pub channel: ChannelKind,
    /// Seconds between outbound snapshots, within `[0, 1]`.
    pub send_interval: f32,
    /// Playback lags live time by `send_interval * buffer_time_multiplier`.
    pub buffer_time_multiplier: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            client_authority: false,
            channel: ChannelKind::Unreliable,
            send_interval: 0.05,
            buffer_time_multiplier: 3,
        }
    }
}

impl SyncConfig {
    /// The deliberate playback delay, in seconds.
    #[must_use]
    pub fn buffer_time(&self) -> f64 {
        f64::from(self.send_interval) * f64::from(self.buffer_time_multiplier)
    }

    /// Clamp fields into their documented ranges, warning on adjustment.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.send_interval) {
            log::warn!(
                "send_interval {} outside [0, 1]; clamping",
                self.send_interval
            );
            self.send_interval = self.send_interval.clamp(0.0, 1.0);
        }
        if self.buffer_time_multiplier < 1 {
            log::warn!("buffer_time_multiplier must be >= 1; using 1");
            self.buffer_time_multiplier = 1;
        }
        self
    }
}

fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() {
        ws
    } else {
        here.join("data")
    }
}

/// Load `data/config/netsync.toml` when present, apply `NETSYNC_*` env
/// overrides, and sanitize.
pub fn load_default() -> Result<SyncConfig> {
    let path = data_root().join("config/netsync.toml");
    let mut cfg = if path.is_file() {
        let txt = std::fs::read_to_string(&path)
            .with_context(|| format!("read {}", path.display()))?;
        toml::from_str::<SyncConfig>(&txt).context("parse netsync TOML")?
    } else {
        SyncConfig::default()
    };
    if let Ok(v) = std::env::var("NETSYNC_CLIENT_AUTHORITY") {
        cfg.client_authority = v == "1" || v.eq_ignore_ascii_case("true");
    }
    if let Ok(v) = std::env::var("NETSYNC_CHANNEL") {
        match v.to_ascii_lowercase().as_str() {
            "reliable" => cfg.channel = ChannelKind::Reliable,
            "unreliable" => cfg.channel = ChannelKind::Unreliable,
            other => log::warn!("unknown NETSYNC_CHANNEL {other:?}; keeping config value"),
        }
    }
    if let Ok(v) = std::env::var("NETSYNC_SEND_INTERVAL") {
        if let Ok(f) = v.parse::<f32>() {
            cfg.send_interval = f;
        }
    }
    if let Ok(v) = std::env::var("NETSYNC_BUFFER_TIME_MULTIPLIER") {
        if let Ok(n) = v.parse::<u32>() {
            cfg.buffer_time_multiplier = n;
        }
    }
    Ok(cfg.sanitized())
}
