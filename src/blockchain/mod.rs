pub mod block;
pub mod model;
pub mod pow;
pub mod validation;

pub use block::{Block, digest};
pub use model::Ledger;
pub use pow::{CancelToken, find_proof, find_proof_cancellable, satisfies_difficulty};
pub use validation::{is_valid_chain, validate_chain};

/// Proof stored in the genesis block. It is a seed, not mined.
pub const GENESIS_PROOF: u64 = 100;

/// `previous_hash` sentinel of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Required hex prefix of `sha256("{previous_proof}{proof}")` (16 bits).
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Amount minted to the node that seals a block.
pub const MINING_REWARD: i64 = 1;
