use super::Block;
use super::block::digest;
use crate::error::NodeError;
use crate::transaction::Transaction;

/// In-memory chain plus the buffer of transactions waiting for the next block.
///
/// The chain is never empty: it starts with the genesis block and can only
/// grow through [`Ledger::seal_block`] or be swapped whole through
/// [`Ledger::replace_chain`].
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a new ledger holding only the genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
        }
    }

    /// Queue a transaction for the next block. Returns the index of that block.
    pub fn submit_transaction(&mut self, tx: Transaction) -> u64 {
        self.pending.push(tx);
        self.last_block().index + 1
    }

    /// Seal every pending transaction into a new block and append it.
    /// `previous_hash` defaults to the digest of the current last block.
    pub fn seal_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| digest(self.last_block()));
        let index = self.chain.len() as u64 + 1;
        let transactions = std::mem::take(&mut self.pending);

        self.chain
            .push(Block::new(index, transactions, proof, previous_hash));
        self.last_block()
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    /// Swap the whole chain. Pending transactions are kept.
    /// Callers validate `chain` first; only emptiness is rejected here.
    pub fn replace_chain(&mut self, chain: Vec<Block>) -> Result<(), NodeError> {
        if chain.is_empty() {
            return Err(NodeError::EmptyChain);
        }
        self.chain = chain;
        Ok(())
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::pow::find_proof;
    use crate::blockchain::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF, is_valid_chain};

    fn mine(ledger: &mut Ledger) -> Block {
        let proof = find_proof(ledger.last_block().proof);
        ledger.seal_block(proof, None).clone()
    }

    #[test]
    fn new_ledger_holds_only_genesis() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);
        assert!(!ledger.is_empty());
        let genesis = ledger.last_block();
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(genesis.proof, GENESIS_PROOF);
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn submit_returns_next_block_index() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.submit_transaction(Transaction::new("A", "B", 10)), 2);
        assert_eq!(ledger.submit_transaction(Transaction::new("B", "C", 0)), 2);
        mine(&mut ledger);
        assert_eq!(ledger.submit_transaction(Transaction::new("C", "A", -4)), 3);
    }

    #[test]
    fn seal_moves_pending_into_block_in_order() {
        let mut ledger = Ledger::new();
        let prior = ledger.last_block().clone();
        ledger.submit_transaction(Transaction::new("A", "B", 10));
        ledger.submit_transaction(Transaction::new("B", "C", 5));
        let expected = ledger.pending().to_vec();

        let block = mine(&mut ledger);

        assert_eq!(block.index, prior.index + 1);
        assert_eq!(block.previous_hash, digest(&prior));
        assert_eq!(block.transactions, expected);
        assert!(ledger.pending().is_empty());
        assert_eq!(ledger.last_block(), &block);
    }

    #[test]
    fn seal_uses_explicit_previous_hash_when_given() {
        let mut ledger = Ledger::new();
        let block = ledger.seal_block(42, Some("explicit".into())).clone();
        assert_eq!(block.previous_hash, "explicit");
        assert_eq!(block.proof, 42);
    }

    #[test]
    fn sealed_chain_validates() {
        let mut ledger = Ledger::new();
        for _ in 0..3 {
            mine(&mut ledger);
        }
        assert_eq!(ledger.len(), 4);
        assert!(is_valid_chain(ledger.chain()));
    }

    #[test]
    fn replace_keeps_pending_and_rejects_empty() {
        let mut other = Ledger::new();
        mine(&mut other);
        mine(&mut other);

        let mut ledger = Ledger::new();
        ledger.submit_transaction(Transaction::new("A", "B", 1));

        assert_eq!(ledger.replace_chain(Vec::new()), Err(NodeError::EmptyChain));
        assert_eq!(ledger.len(), 1);

        ledger.replace_chain(other.chain().to_vec()).unwrap();
        assert_eq!(ledger.chain(), other.chain());
        assert_eq!(ledger.pending(), &[Transaction::new("A", "B", 1)]);
    }
}
