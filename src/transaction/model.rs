use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Sender used for coins minted by the node itself (mining reward).
pub const REWARD_SENDER: &str = "0";

/// A value transfer waiting in the pending buffer or recorded in a block.
/// No balance or signature checks are performed on it. `amount` is any JSON
/// number, fractional and negative values included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    /// Build the reward paid to `recipient` for sealing a block.
    pub fn reward(recipient: impl Into<String>, amount: impl Into<Number>) -> Self {
        Self::new(REWARD_SENDER, recipient, amount)
    }
}
