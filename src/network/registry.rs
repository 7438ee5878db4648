use std::collections::BTreeSet;

use crate::error::NodeError;

/// Deduplicated set of peer locations (`host` or `host:port`).
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: BTreeSet<String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and insert `address`. Returns `true` if it was not known yet.
    pub fn register(&mut self, address: &str) -> Result<bool, NodeError> {
        let node = normalize_address(address)?;
        Ok(self.nodes.insert(node))
    }

    /// Known peers in lexical order.
    pub fn list(&self) -> Vec<String> {
        self.nodes.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Reduce a URL or bare `host[:port]` to its lowercase `host[:port]` part.
/// Scheme, credentials, path, query and fragment are dropped.
pub fn normalize_address(address: &str) -> Result<String, NodeError> {
    let invalid = || NodeError::InvalidAddress(address.to_string());

    let trimmed = address.trim();
    let rest = trimmed.split_once("://").map_or(trimmed, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);

    if host_port.is_empty() || host_port.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (host, port) = if let Some(v6) = host_port.strip_prefix('[') {
        // [ipv6]:port
        let (addr, after) = v6.split_once(']').ok_or_else(invalid)?;
        if addr.is_empty() {
            return Err(invalid());
        }
        match after {
            "" => (host_port, None),
            _ => {
                let port = after.strip_prefix(':').ok_or_else(invalid)?;
                (&host_port[..addr.len() + 2], Some(port))
            }
        }
    } else {
        match host_port.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        }
    };

    if host.is_empty() {
        return Err(invalid());
    }
    if let Some(port) = port {
        port.parse::<u16>().map_err(|_| invalid())?;
    }

    Ok(host_port.to_ascii_lowercase())
}
