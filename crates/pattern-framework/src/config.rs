//! Bus configuration.

use serde::Deserialize;
use tracing::warn;

/// Environment variable overriding [`BusConfig::buffer_size`].
pub const BUFFER_ENV: &str = "PATTERN_BUS_BUFFER";

const DEFAULT_BUFFER_SIZE: usize = 32;

/// Settings for a [`MessageBus`](crate::MessageBus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Capacity of the request channel. When it is full, senders wait
    /// until there is space.
    pub buffer_size: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl BusConfig {
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self { buffer_size }
    }

    /// Reads [`BUFFER_ENV`], keeping the default when it is unset or not a
    /// positive integer.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(BUFFER_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => config.buffer_size = size,
                _ => warn!(key = BUFFER_ENV, value = %raw, "Ignoring invalid buffer size"),
            }
        }
        config
    }
}
