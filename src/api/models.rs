use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

use crate::blockchain::Block;
use crate::config::Settings;
use crate::node::Node;
use crate::transaction::Transaction;

/// Shared application state: the node core plus the settings it runs with.
pub struct AppState {
    pub node: Node,
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let id = settings.node_id.clone().unwrap_or_else(new_node_id);
        Self {
            node: Node::new(id),
            settings,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

/// Random node identifier: a UUID v4 without dashes.
pub fn new_node_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub node_id: String,
    pub height: usize,
}

/* ---------- Mining API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: "New Block Forged",
            index: block.index,
            transactions: block.transactions,
            proof: block.proof,
            previous_hash: block.previous_hash,
        }
    }
}

/* ---------- TX API Models ---------- */

/// Fields are optional so a missing one can be reported by name.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<Number>,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

/* ---------- Nodes API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: &'static str,
    pub replaced: bool,
    pub chain: Vec<Block>,
}
