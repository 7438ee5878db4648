use awc::http::StatusCode;
use std::future::Future;
use std::time::Duration;

use super::ChainResponse;
use crate::error::PeerError;

/// Upper bound on a peer's `/chain` body.
const MAX_CHAIN_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Source of peer chains for consensus.
pub trait PeerClient {
    /// Fetch `GET http://{peer}/chain`. Any failure means "peer unavailable".
    fn fetch_chain(&self, peer: &str) -> impl Future<Output = Result<ChainResponse, PeerError>>;
}

/// [`PeerClient`] speaking HTTP through `awc`.
///
/// `awc::Client` is bound to the current actix worker, so build one per
/// consensus run instead of sharing it in app state.
pub struct HttpPeerClient {
    client: awc::Client,
}

impl HttpPeerClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: awc::Client::builder().timeout(timeout).finish(),
        }
    }
}

impl PeerClient for HttpPeerClient {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainResponse, PeerError> {
        let url = format!("http://{peer}/chain");
        let mut response = self
            .client
            .get(&url)
            .insert_header(("Accept", "application/json"))
            .send()
            .await
            .map_err(|e| PeerError::Unreachable(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(PeerError::Status(response.status().as_u16()));
        }

        let body = response
            .body()
            .limit(MAX_CHAIN_BODY_BYTES)
            .await
            .map_err(|e| PeerError::Unreachable(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| PeerError::Malformed(e.to_string()))
    }
}
