//! Bounded queue dispatcher: merges the real-time and recovery slot
//! streams into the single queue the fixed worker pool drains, with the
//! real-time side always checked first").

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub async fn run(
    mut realtime_rx: mpsc::Receiver<u64>,
    mut recovery_rx: mpsc::Receiver<u64>,
    out_tx: mpsc::Sender<u64>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            slot = realtime_rx.recv() => {
                match slot {
                    Some(s) => { if out_tx.send(s).await.is_err() { return; } }
                    None => return,
                }
            }
            slot = recovery_rx.recv() => {
                match slot {
                    Some(s) => { if out_tx.send(s).await.is_err() { return; } }
                    None => return,
                }
            }
        }
    }
}
