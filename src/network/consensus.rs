use futures::stream::{self, StreamExt};
use log::{debug, warn};
use std::time::Duration;

use super::{ChainResponse, PeerClient};
use crate::blockchain::{Block, validate_chain};
use crate::error::PeerError;

/// Default per-peer deadline for `GET /chain`.
pub const DEFAULT_PEER_TIMEOUT: Duration = Duration::from_secs(3);

/// Default number of peer fetches in flight at once.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusConfig {
    pub peer_timeout: Duration,
    pub max_in_flight: usize,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            peer_timeout: DEFAULT_PEER_TIMEOUT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

/// A validated peer chain that beats the local one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub peer: String,
    pub chain: Vec<Block>,
}

/// Fetch every peer's chain concurrently, at most `max_in_flight` at a time,
/// each under `peer_timeout`. Unreachable, timed-out and malformed peers are
/// logged and dropped; the rest come back in completion order.
pub async fn fetch_peer_chains<C: PeerClient>(
    client: &C,
    peers: &[String],
    config: &ConsensusConfig,
) -> Vec<(String, Vec<Block>)> {
    stream::iter(peers.iter().cloned())
        .map(move |peer| async move {
            let fetch = client.fetch_chain(&peer);
            let outcome = match tokio::time::timeout(config.peer_timeout, fetch).await {
                Ok(reply) => reply.and_then(well_formed),
                Err(_) => Err(PeerError::Timeout(config.peer_timeout.as_millis())),
            };
            (peer, outcome)
        })
        .buffer_unordered(config.max_in_flight.max(1))
        .filter_map(|(peer, outcome)| async move {
            match outcome {
                Ok(reply) => {
                    debug!("consensus: {} reported {} blocks", peer, reply.length);
                    Some((peer, reply.chain))
                }
                Err(e) => {
                    warn!("consensus: skipping peer {}: {}", peer, e);
                    None
                }
            }
        })
        .collect::<Vec<_>>()
        .await
}

fn well_formed(reply: ChainResponse) -> Result<ChainResponse, PeerError> {
    if reply.length != reply.chain.len() {
        return Err(PeerError::Malformed(format!(
            "length {} but chain holds {} blocks",
            reply.length,
            reply.chain.len()
        )));
    }
    Ok(reply)
}

/// Longest-chain rule: keep the longest peer chain that is strictly longer
/// than `local_len` and passes validation. Equal lengths never win.
pub fn select_longest_valid(
    local_len: usize,
    responses: Vec<(String, Vec<Block>)>,
) -> Option<Candidate> {
    let mut best_len = local_len;
    let mut best = None;

    for (peer, chain) in responses {
        if chain.len() <= best_len {
            debug!(
                "consensus: {} has {} blocks, not longer than {}",
                peer,
                chain.len(),
                best_len
            );
            continue;
        }
        if let Err(e) = validate_chain(&chain) {
            warn!("consensus: rejecting chain from {}: {}", peer, e);
            continue;
        }
        best_len = chain.len();
        best = Some(Candidate { peer, chain });
    }

    best
}
