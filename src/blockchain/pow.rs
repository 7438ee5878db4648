use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::DIFFICULTY_PREFIX;

/// Cooperative cancellation flag for a running proof search.
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Whether both handles control the same search.
    pub fn same_as(&self, other: &CancelToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Difficulty predicate: SHA-256 of the decimal concatenation
/// `"{previous_proof}{proof}"` must start with [`DIFFICULTY_PREFIX`] in hex.
pub fn satisfies_difficulty(previous_proof: u64, proof: u64) -> bool {
    let guess = format!("{previous_proof}{proof}");
    let hash = hex::encode(Sha256::digest(guess.as_bytes()));
    hash.starts_with(DIFFICULTY_PREFIX)
}

/// Smallest non-negative proof satisfying the predicate against `previous_proof`.
pub fn find_proof(previous_proof: u64) -> u64 {
    let mut proof = 0;
    while !satisfies_difficulty(previous_proof, proof) {
        proof += 1;
    }
    proof
}

/// Same search as [`find_proof`], checking `cancel` before every candidate.
/// Returns `None` once the token is cancelled.
pub fn find_proof_cancellable(previous_proof: u64, cancel: &CancelToken) -> Option<u64> {
    let mut proof = 0;
    loop {
        if cancel.is_cancelled() {
            return None;
        }
        if satisfies_difficulty(previous_proof, proof) {
            return Some(proof);
        }
        proof += 1;
    }
}
