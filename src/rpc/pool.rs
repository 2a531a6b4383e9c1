//! Round-robin node client pool: `clients` + an atomic `current_index`,
//! with a fallback-on-failure call path generalized to raw JSON-RPC
//! `getBlock`.

use crate::errors::NodeError;
use crate::log_debug;
use crate::logger::LogTag;
use crate::rpc::types::BlockResponse;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RETRIES: usize = 10;
const RETRY_DELAY: Duration = Duration::from_secs(1);

pub struct NodeClientPool {
    endpoints: Vec<String>,
    http: Client,
    current_index: AtomicUsize,
}

impl NodeClientPool {
    pub fn new(endpoints: Vec<String>) -> NodeClientPool {
        let http = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("reqwest client");
        NodeClientPool {
            endpoints,
            http,
            current_index: AtomicUsize::new(0),
        }
    }

    /// Increments the round-robin counter under no external lock (the
    /// atomic itself is the synchronization point) and returns the next
    /// endpoint.
    fn pick_endpoint(&self) -> &str {
        let idx = self.current_index.fetch_add(1, Ordering::Relaxed) % self.endpoints.len();
        &self.endpoints[idx]
    }

    async fn rpc_call(&self, endpoint: &str, method: &str, params: Value) -> Result<Value, NodeError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let resp = self
            .http
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| NodeError::Fatal(e.to_string()))?;
        let value: Value = resp
            .json()
            .await
            .map_err(|e| NodeError::Fatal(e.to_string()))?;
        if let Some(err) = value.get("error") {
            let message = err
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown RPC error");
            return Err(NodeError::classify(message));
        }
        value
            .get("result")
            .cloned()
            .ok_or_else(|| NodeError::Fatal("missing result field".to_string()))
    }

    /// Fetches a full block. On `NotAvailable`/`RateLimited`, sleeps 1s and
    /// retries up to 10 times; on `Fatal`, returns immediately.
    pub async fn get_block(&self, slot: u64) -> Result<BlockResponse, NodeError> {
        tokio::time::sleep(RETRY_DELAY).await;
        let params = json!([
            slot,
            {
                "commitment": "confirmed",
                "maxSupportedTransactionVersion": 0,
                "transactionDetails": "full",
                "rewards": false,
            }
        ]);

        let mut attempts = 0;
        loop {
            let endpoint = self.pick_endpoint();
            log_debug!(LogTag::Rpc, "getBlock slot={} endpoint={}", slot, endpoint);
            match self.rpc_call(endpoint, "getBlock", params.clone()).await {
                Ok(value) => {
                    let block: BlockResponse = serde_json::from_value(value)
                        .map_err(|e| NodeError::Fatal(e.to_string()))?;
                    return Ok(block);
                }
                Err(e) if e.is_retryable() => {
                    attempts += 1;
                    if attempts > MAX_RETRIES {
                        return Err(e);
                    }
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn get_account_info(&self, address: &str) -> Result<Value, NodeError> {
        let endpoint = self.pick_endpoint();
        self.rpc_call(
            endpoint,
            "getAccountInfo",
            json!([address, {"commitment": "confirmed", "encoding": "base64"}]),
        )
        .await
    }

    pub async fn get_token_supply(&self, mint: &str) -> Result<Value, NodeError> {
        let endpoint = self.pick_endpoint();
        self.rpc_call(
            endpoint,
            "getTokenSupply",
            json!([mint, {"commitment": "confirmed"}]),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_endpoint_round_robins() {
        let pool = NodeClientPool::new(vec!["a".into(), "b".into(), "c".into()]);
        let picks: Vec<_> = (0..6).map(|_| pool.pick_endpoint().to_string()).collect();
        assert_eq!(picks, vec!["a", "b", "c", "a", "b", "c"]);
    }
}
