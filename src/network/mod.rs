pub mod client;
pub mod consensus;
pub mod registry;

use serde::{Deserialize, Serialize};

use crate::blockchain::Block;

pub use client::{HttpPeerClient, PeerClient};
pub use consensus::{Candidate, ConsensusConfig, fetch_peer_chains, select_longest_valid};
pub use registry::{NodeRegistry, normalize_address};

/// Body of `GET /chain`, served by every node and consumed from peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl ChainResponse {
    pub fn new(chain: Vec<Block>) -> Self {
        Self {
            length: chain.len(),
            chain,
        }
    }
}
