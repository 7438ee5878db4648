use log::debug;

use super::Block;
use super::block::digest;
use super::pow::satisfies_difficulty;
use crate::error::ValidationError;

/// Walk `chain` pairwise from the second block and require, for every
/// `(prev, curr)`, both proof-of-work linkage and hash linkage.
/// The genesis block itself is not checked against anything.
pub fn validate_chain(chain: &[Block]) -> Result<(), ValidationError> {
    if chain.is_empty() {
        return Err(ValidationError::EmptyChain);
    }

    for (i, pair) in chain.windows(2).enumerate() {
        let (prev, curr) = (&pair[0], &pair[1]);
        let position = i + 2;

        if !satisfies_difficulty(prev.proof, curr.proof) {
            debug!(
                "validator: block {} proof {} fails against previous proof {}",
                position, curr.proof, prev.proof
            );
            return Err(ValidationError::InvalidProof { position });
        }

        if curr.previous_hash != digest(prev) {
            debug!(
                "validator: block {} previous_hash {} does not link to its predecessor",
                position, curr.previous_hash
            );
            return Err(ValidationError::BrokenLink { position });
        }
    }

    Ok(())
}

pub fn is_valid_chain(chain: &[Block]) -> bool {
    validate_chain(chain).is_ok()
}
