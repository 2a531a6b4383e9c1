//! Slot ingestion & recovery. Grounded on
//! `original_source/rc_dex/consumer/internal/logic/slot/{websocket.go,
//! not_complete.go}`: one task streams live slots off the WebSocket, a
//! second task periodically re-enqueues slots stuck in a non-terminal
//! state. Composed with no back-references — the supervisor owns both
//! tasks and a shared cancellation token.

mod recovery;
mod slot_stream;

pub use recovery::RecoveryScanner;
pub use slot_stream::SlotStreamSource;

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::log_info;
use crate::logger::LogTag;

/// Bounded real-time queue capacity; the queue is deliberately
/// backpressured rather than unbounded.
pub const REALTIME_QUEUE_CAPACITY: usize = 50;
pub const RECOVERY_QUEUE_CAPACITY: usize = 50;

/// Owns the live slot stream and the recovery scanner, and the
/// cancellation token both obey. Not nested inside the worker pool —
/// ingestion and consumption are two independent concerns wired together
/// only by the queues they share.
pub struct IngestionSupervisor {
    pub cancel: CancellationToken,
    realtime_handle: JoinHandle<()>,
    recovery_handle: JoinHandle<()>,
}

impl IngestionSupervisor {
    pub fn start(
        ws_url: String,
        recovery_scanner: Arc<RecoveryScanner>,
        realtime_capacity: usize,
        recovery_capacity: usize,
    ) -> (IngestionSupervisor, mpsc::Receiver<u64>, mpsc::Receiver<u64>) {
        let cancel = CancellationToken::new();
        let (realtime_tx, realtime_rx) = mpsc::channel(realtime_capacity);
        let (recovery_tx, recovery_rx) = mpsc::channel(recovery_capacity);

        let stream_cancel = cancel.clone();
        let source = SlotStreamSource::new(ws_url);
        let realtime_handle = tokio::spawn(async move {
            source.run(realtime_tx, stream_cancel).await;
        });

        let scan_cancel = cancel.clone();
        let recovery_handle = tokio::spawn(async move {
            recovery_scanner.run(recovery_tx, scan_cancel).await;
        });

        (
            IngestionSupervisor {
                cancel,
                realtime_handle,
                recovery_handle,
            },
            realtime_rx,
            recovery_rx,
        )
    }

    /// Signals both producer tasks to stop and waits for them to exit.
    pub async fn shutdown(self) {
        log_info!(LogTag::Ingestion, "shutting down ingestion supervisor");
        self.cancel.cancel();
        let _ = self.realtime_handle.await;
        let _ = self.recovery_handle.await;
    }
}
