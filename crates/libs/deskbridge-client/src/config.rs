//! Client tuning knobs, loadable from TOML.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Connection and forwarding configuration.
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Upper bound on a single connection attempt, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Keepalive ping cadence on an established link, in milliseconds.
    pub keepalive_interval_ms: u64,
    /// Outbound event queue depth between capture and the writer task.
    pub write_queue_depth: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5_000,
            keepalive_interval_ms: 2_000,
            write_queue_depth: 256,
        }
    }
}

impl ClientConfig {
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn keepalive_interval(&self) -> Duration {
        Duration::from_millis(self.keepalive_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = ClientConfig::from_toml("").expect("parse empty config");
        assert_eq!(config.connect_timeout_ms, 5_000);
        assert_eq!(config.keepalive_interval_ms, 2_000);
        assert_eq!(config.write_queue_depth, 256);
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let config =
            ClientConfig::from_toml("connect_timeout_ms = 750").expect("parse config");
        assert_eq!(config.connect_timeout(), Duration::from_millis(750));
        assert_eq!(config.keepalive_interval_ms, 2_000);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(ClientConfig::from_toml("connect_timeout_ms = \"soon\"").is_err());
    }
}
