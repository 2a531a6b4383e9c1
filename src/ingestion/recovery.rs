//! Recovery scanner. Grounded on
//! `original_source/rc_dex/consumer/internal/logic/slot/not_complete.go`
//! (`RecoverFailedBlockService.RecoverFailedBlock`): resolve a starting
//! slot once (configured `start_block`, or the lowest `Failed` block),
//! then on a 5-second tick scan a window of 50 slots `>= start - 100` and
//! push each one, itself paced by a second 5-second ticker. An empty or
//! failing scan ends the recovery pass entirely — this is a bounded
//! "catch up" sweep, not a perpetual poller.

use crate::log_info;
use crate::logger::LogTag;
use crate::persistence::BlockRepo;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const SCAN_INTERVAL: Duration = Duration::from_secs(5);
const SEND_INTERVAL: Duration = Duration::from_secs(5);
const SCAN_BATCH_SIZE: usize = 50;
const SLOT_WINDOW_PADDING: u64 = 100;

pub struct RecoveryScanner {
    block_repo: Arc<dyn BlockRepo>,
    configured_start_block: u64,
}

impl RecoveryScanner {
    pub fn new(block_repo: Arc<dyn BlockRepo>, configured_start_block: u64) -> RecoveryScanner {
        RecoveryScanner {
            block_repo,
            configured_start_block,
        }
    }

    async fn resolve_start_slot(&self) -> u64 {
        if self.configured_start_block != 0 {
            return self.configured_start_block;
        }
        match self.block_repo.find_first_failed().await {
            Ok(Some(block)) => block.slot,
            _ => 0,
        }
    }

    pub async fn run(&self, tx: mpsc::Sender<u64>, cancel: CancellationToken) {
        let start_slot = self.resolve_start_slot().await;
        log_info!(LogTag::Recovery, "recovery pass starting from slot {}", start_slot);

        let mut scan_ticker = tokio::time::interval(SCAN_INTERVAL);
        let mut send_ticker = tokio::time::interval(SEND_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = scan_ticker.tick() => {}
            }

            let from = start_slot.saturating_sub(SLOT_WINDOW_PADDING);
            let slots = match self.block_repo.find_processing_slots(from, SCAN_BATCH_SIZE).await {
                Ok(slots) if !slots.is_empty() => slots,
                _ => {
                    log_info!(LogTag::Recovery, "recovery pass complete, no more slots to reattempt");
                    return;
                }
            };

            for slot in slots {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = send_ticker.tick() => {}
                }
                log_info!(LogTag::Recovery, "re-enqueuing slot {} for recovery", slot);
                if tx.send(slot).await.is_err() {
                    return;
                }
            }
        }
    }
}
