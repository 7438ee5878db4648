//! A minimal proof-of-work ledger node.
//!
//! - [`blockchain`] - blocks, canonical digest, proof-of-work, chain validation, the ledger
//! - [`transaction`] - the transfer record carried by blocks
//! - [`network`] - peer registry, peer client and longest-chain consensus
//! - [`node`] - lock-guarded coordinator used by the HTTP layer
//! - [`api`] - actix-web routes (`/chain`, `/mine`, `/transactions/new`, `/nodes/*`)

#![forbid(unsafe_code)]

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod network;
pub mod node;
pub mod transaction;
