//! Streaming socket subscription. Grounded on
//! `original_source/rc_dex/consumer/internal/logic/slot/websocket.go`:
//! dial with a handshake timeout, subscribe, retry subscribe up to 10
//! times 1s apart, reconnect the dial loop every second on failure.

use crate::{log_error, log_info, log_warn};
use crate::logger::LogTag;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);
const SUBSCRIBE_RETRY_DELAY: Duration = Duration::from_secs(1);
const MAX_SUBSCRIBE_ATTEMPTS: usize = 10;
const DIAL_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Deserialize)]
pub struct SlotNotification {
    pub params: SlotParams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotParams {
    pub result: SlotResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotResult {
    pub slot: u64,
}

pub struct SlotWsClient {
    ws_url: String,
}

impl SlotWsClient {
    pub fn new(ws_url: String) -> SlotWsClient {
        SlotWsClient { ws_url }
    }

    /// Dials and subscribes, retrying the dial every second forever and
    /// the subscribe send up to 10 times 1s apart, as in the original.
    pub async fn connect_and_subscribe(
        &self,
    ) -> tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    > {
        loop {
            match tokio::time::timeout(
                HANDSHAKE_TIMEOUT,
                tokio_tungstenite::connect_async(&self.ws_url),
            )
            .await
            {
                Ok(Ok((mut stream, _))) => {
                    let mut subscribed = false;
                    for attempt in 0..MAX_SUBSCRIBE_ATTEMPTS {
                        let msg = json!({"id": 1, "jsonrpc": "2.0", "method": "slotSubscribe"});
                        if stream.send(Message::Text(msg.to_string())).await.is_ok() {
                            subscribed = true;
                            break;
                        }
                        log_warn!(LogTag::Ingestion, "slotSubscribe attempt {} failed", attempt);
                        tokio::time::sleep(SUBSCRIBE_RETRY_DELAY).await;
                    }
                    if subscribed {
                        log_info!(LogTag::Ingestion, "subscribed to slot stream");
                        return stream;
                    }
                }
                Ok(Err(e)) => {
                    log_error!(LogTag::Ingestion, "ws dial failed: {}", e);
                }
                Err(_) => {
                    log_error!(LogTag::Ingestion, "ws handshake timed out");
                }
            }
            tokio::time::sleep(DIAL_RETRY_DELAY).await;
        }
    }

    /// Parses a single text frame into a slot notification. Returns `None`
    /// for non-slot messages (e.g. the subscribe ack).
    pub fn parse_slot(text: &str) -> Option<u64> {
        let parsed: SlotNotification = serde_json::from_str(text).ok()?;
        let slot = parsed.params.result.slot;
        if slot > 0 {
            Some(slot)
        } else {
            None
        }
    }

    pub fn unsubscribe_message() -> Message {
        let msg = json!({"id": 1, "jsonrpc": "2.0", "method": "blockUnsubscribe", "params": [0]});
        Message::Text(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slot_notification() {
        let text = r#"{"jsonrpc":"2.0","method":"slotNotification","params":{"result":{"slot":42,"parent":41,"root":40},"subscription":0}}"#;
        assert_eq!(SlotWsClient::parse_slot(text), Some(42));
    }

    #[test]
    fn ignores_zero_slot() {
        let text = r#"{"jsonrpc":"2.0","method":"slotNotification","params":{"result":{"slot":0,"parent":0,"root":0},"subscription":0}}"#;
        assert_eq!(SlotWsClient::parse_slot(text), None);
    }

    #[test]
    fn ignores_non_matching_payload() {
        assert_eq!(SlotWsClient::parse_slot("{\"id\":1,\"result\":0}"), None);
    }
}
