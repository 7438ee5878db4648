//! Lock-guarded coordinator around the ledger, the peer registry and
//! in-flight mining attempts.

use log::{debug, info, warn};
use serde_json::Number;
use std::sync::Mutex;

use crate::blockchain::{
    Block, CancelToken, Ledger, MINING_REWARD, digest, find_proof_cancellable,
};
use crate::error::{NodeError, Result};
use crate::network::{
    ChainResponse, ConsensusConfig, NodeRegistry, PeerClient, fetch_peer_chains,
    normalize_address, select_longest_valid,
};
use crate::transaction::Transaction;

/// Snapshot taken when a mining attempt starts.
#[derive(Debug, Clone)]
pub struct MiningJob {
    pub previous_proof: u64,
    pub previous_hash: String,
    pub cancel: CancelToken,
}

/// Outcome of a consensus run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub replaced: bool,
    /// Peer whose chain was adopted, if any.
    pub source: Option<String>,
    pub chain: Vec<Block>,
}

pub struct Node {
    id: String,
    ledger: Mutex<Ledger>,
    registry: Mutex<NodeRegistry>,
    miners: Mutex<Vec<CancelToken>>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ledger: Mutex::new(Ledger::new()),
            registry: Mutex::new(NodeRegistry::new()),
            miners: Mutex::new(Vec::new()),
        }
    }

    /// Identifier credited with mining rewards.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn submit_transaction(
        &self,
        sender: &str,
        recipient: &str,
        amount: impl Into<Number>,
    ) -> u64 {
        let tx = Transaction::new(sender, recipient, amount);
        let amount = tx.amount.clone();
        let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
        let index = ledger.submit_transaction(tx);
        debug!(
            "NODE - queued tx {} -> {} ({}) for block {}",
            sender, recipient, amount, index
        );
        index
    }

    pub fn chain(&self) -> ChainResponse {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        ChainResponse::new(ledger.chain().to_vec())
    }

    pub fn height(&self) -> usize {
        self.ledger.lock().expect("ledger mutex poisoned").len()
    }

    pub fn pending(&self) -> Vec<Transaction> {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        ledger.pending().to_vec()
    }

    /// Register a batch of peers. Either every address is accepted or none is.
    pub fn register_nodes<S: AsRef<str>>(&self, addresses: &[S]) -> Result<Vec<String>> {
        let normalized = addresses
            .iter()
            .map(|a| normalize_address(a.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut registry = self.registry.lock().expect("registry mutex poisoned");
        for node in &normalized {
            if registry.register(node)? {
                info!("NODE - registered peer {}", node);
            }
        }
        Ok(registry.list())
    }

    pub fn peers(&self) -> Vec<String> {
        self.registry.lock().expect("registry mutex poisoned").list()
    }

    /// Snapshot the tip and hand out a cancellation token for the search.
    pub fn start_mining(&self) -> MiningJob {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        let last = ledger.last_block();
        let (previous_proof, previous_hash) = (last.proof, digest(last));
        // Registered before the ledger lock is released, so a replacement
        // either precedes the snapshot or cancels this token.
        let cancel = CancelToken::new();
        self.miners
            .lock()
            .expect("miners mutex poisoned")
            .push(cancel.clone());
        drop(ledger);

        MiningJob {
            previous_proof,
            previous_hash,
            cancel,
        }
    }

    /// Seal the pending buffer with `proof`, provided the tip has not moved
    /// since `job` was started. The reward is only queued when sealing succeeds.
    pub fn finish_mining(&self, job: MiningJob, proof: u64) -> Result<Block> {
        self.forget_miner(&job.cancel);

        let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
        if job.cancel.is_cancelled() || digest(ledger.last_block()) != job.previous_hash {
            warn!("MINER - tip moved while searching; dropping proof {}", proof);
            return Err(NodeError::MiningSuperseded);
        }

        ledger.submit_transaction(Transaction::reward(self.id.as_str(), MINING_REWARD));
        let block = ledger.seal_block(proof, Some(job.previous_hash)).clone();
        info!(
            "MINER - sealed block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        Ok(block)
    }

    /// Find the next proof on the calling thread and seal a block with it.
    /// Blocks; run it off the async executor.
    pub fn mine(&self) -> Result<Block> {
        let job = self.start_mining();
        match find_proof_cancellable(job.previous_proof, &job.cancel) {
            Some(proof) => self.finish_mining(job, proof),
            None => {
                self.forget_miner(&job.cancel);
                warn!("MINER - search cancelled by a chain replacement");
                Err(NodeError::MiningSuperseded)
            }
        }
    }

    /// Ask every registered peer for its chain and adopt the longest valid one
    /// that is strictly longer than ours. Peer failures are skipped.
    pub async fn resolve_conflicts<C: PeerClient>(
        &self,
        client: &C,
        config: &ConsensusConfig,
    ) -> Result<Resolution> {
        let peers = self.peers();
        if peers.is_empty() {
            debug!("consensus: no peers registered");
            return Ok(self.unchanged());
        }

        let local_len = self.height();
        let responses = fetch_peer_chains(client, &peers, config).await;
        let Some(candidate) = select_longest_valid(local_len, responses) else {
            info!("consensus: local chain of {} blocks is authoritative", local_len);
            return Ok(self.unchanged());
        };

        let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
        // The tip may have grown while peers were being queried.
        if candidate.chain.len() <= ledger.len() {
            info!(
                "consensus: chain from {} no longer longer than local ({} <= {})",
                candidate.peer,
                candidate.chain.len(),
                ledger.len()
            );
            return Ok(Resolution {
                replaced: false,
                source: None,
                chain: ledger.chain().to_vec(),
            });
        }

        ledger.replace_chain(candidate.chain)?;
        // Still under the ledger lock: jobs started after this point see the new tip.
        self.cancel_miners();
        let chain = ledger.chain().to_vec();
        drop(ledger);

        info!(
            "consensus: adopted {} blocks from {}",
            chain.len(),
            candidate.peer
        );
        Ok(Resolution {
            replaced: true,
            source: Some(candidate.peer),
            chain,
        })
    }

    fn unchanged(&self) -> Resolution {
        Resolution {
            replaced: false,
            source: None,
            chain: self.chain().chain,
        }
    }

    fn cancel_miners(&self) {
        let mut miners = self.miners.lock().expect("miners mutex poisoned");
        for token in miners.drain(..) {
            token.cancel();
        }
    }

    fn forget_miner(&self, cancel: &CancelToken) {
        let mut miners = self.miners.lock().expect("miners mutex poisoned");
        miners.retain(|t| !t.same_as(cancel));
    }
}
