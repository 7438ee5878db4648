//! Error types shared across the node.

use thiserror::Error;

/// Why a candidate chain was rejected. Indices are 1-based block indices
/// (positions in the chain), naming the first block that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("chain is empty")]
    EmptyChain,

    #[error("block {position}: proof does not satisfy the difficulty against its predecessor")]
    InvalidProof { position: usize },

    #[error("block {position}: previous_hash does not match the digest of its predecessor")]
    BrokenLink { position: usize },
}

/// Failure to obtain a usable chain from a peer. All variants are treated the
/// same by consensus: the peer is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeerError {
    #[error("peer unreachable: {0}")]
    Unreachable(String),

    #[error("peer answered with HTTP status {0}")]
    Status(u16),

    #[error("malformed peer response: {0}")]
    Malformed(String),

    #[error("peer did not answer within {0} ms")]
    Timeout(u128),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("invalid node address `{0}`")]
    InvalidAddress(String),

    #[error("mining abandoned: the chain changed while searching for a proof")]
    MiningSuperseded,

    #[error("refusing to install an empty chain")]
    EmptyChain,
}

/// Convenience alias used by the node coordinator.
pub type Result<T> = std::result::Result<T, NodeError>;
