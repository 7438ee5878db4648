//! Runtime settings read from the environment (after `.env` is loaded).

use std::env;
use std::time::Duration;

use crate::network::ConsensusConfig;
use crate::network::consensus::{DEFAULT_MAX_IN_FLIGHT, DEFAULT_PEER_TIMEOUT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Fixed node identifier; a random one is generated when absent.
    pub node_id: Option<String>,
    pub consensus: ConsensusConfig,
    /// Peers registered before the server starts accepting requests.
    pub bootstrap_peers: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            node_id: None,
            consensus: ConsensusConfig::default(),
            bootstrap_peers: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unparsable values fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let peer_timeout = non_empty("PEER_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_PEER_TIMEOUT);
        let max_in_flight = non_empty("PEER_MAX_IN_FLIGHT")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_IN_FLIGHT);

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: non_empty("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            node_id: non_empty("NODE_ID"),
            consensus: ConsensusConfig {
                peer_timeout,
                max_in_flight,
            },
            bootstrap_peers: non_empty("BOOTSTRAP_PEERS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}
