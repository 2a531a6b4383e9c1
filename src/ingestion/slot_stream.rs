//! Live slot stream producer. Grounded on
//! `original_source/rc_dex/consumer/internal/logic/slot/websocket.go`:
//! dial, subscribe, read frames, push slot numbers, and on any read error
//! or stream close just reconnect — the dial loop inside `SlotWsClient`
//! already retries forever, so this task's job is to keep pulling frames
//! and pushing parsed slots until cancelled.

use crate::log_warn;
use crate::logger::LogTag;
use crate::rpc::SlotWsClient;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

pub struct SlotStreamSource {
    client: SlotWsClient,
}

impl SlotStreamSource {
    pub fn new(ws_url: String) -> SlotStreamSource {
        SlotStreamSource {
            client: SlotWsClient::new(ws_url),
        }
    }

    /// Runs until `cancel` fires. A dropped/broken connection is
    /// transparently reconnected via `connect_and_subscribe`'s own retry
    /// loop; a full receiver (backpressure) simply blocks the send, the
    /// intended bounded-queue behavior.
    pub async fn run(&self, tx: mpsc::Sender<u64>, cancel: CancellationToken) {
        loop {
            if cancel.is_cancelled() {
                return;
            }
            let mut stream = tokio::select! {
                s = self.client.connect_and_subscribe() => s,
                _ = cancel.cancelled() => return,
            };

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        let _ = stream.send(SlotWsClient::unsubscribe_message()).await;
                        let _ = stream.close(None).await;
                        return;
                    }
                    frame = stream.next() => {
                        match frame {
                            Some(Ok(Message::Text(text))) => {
                                if let Some(slot) = SlotWsClient::parse_slot(&text) {
                                    if tx.send(slot).await.is_err() {
                                        return;
                                    }
                                }
                            }
                            Some(Ok(_)) => continue,
                            Some(Err(e)) => {
                                log_warn!(LogTag::Ingestion, "slot stream read error: {}", e);
                                break;
                            }
                            None => {
                                log_warn!(LogTag::Ingestion, "slot stream closed, reconnecting");
                                break;
                            }
                        }
                    }
                }
            }
        }
    }
}
