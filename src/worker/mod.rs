//! Block worker pool and the dispatcher queue feeding it.

mod block_worker;
mod dispatcher;

pub use block_worker::BlockWorker;

use crate::persistence::{BlockRepo, Orchestrator};
use crate::rpc::NodeClientPool;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Spawns the dispatcher and N independent `BlockWorker` tasks, each
/// with its own worker-private state, competing for slots off a single
/// shared queue
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
    dispatcher_handle: JoinHandle<()>,
}

impl WorkerPool {
    pub fn spawn(
        concurrency: usize,
        rpc_pool: Arc<NodeClientPool>,
        orchestrator: Arc<Orchestrator>,
        block_repo: Arc<dyn BlockRepo>,
        chain_id: u64,
        realtime_rx: mpsc::Receiver<u64>,
        recovery_rx: mpsc::Receiver<u64>,
        cancel: CancellationToken,
    ) -> WorkerPool {
        let (dispatch_tx, dispatch_rx) = mpsc::channel(concurrency.max(1) * 2);
        let dispatcher_cancel = cancel.clone();
        let dispatcher_handle = tokio::spawn(async move {
            dispatcher::run(realtime_rx, recovery_rx, dispatch_tx, dispatcher_cancel).await;
        });

        let shared_rx = Arc::new(Mutex::new(dispatch_rx));
        let mut handles = Vec::with_capacity(concurrency);
        for _ in 0..concurrency {
            let rx = shared_rx.clone();
            let mut worker = BlockWorker::new(
                rpc_pool.clone(),
                orchestrator.clone(),
                block_repo.clone(),
                chain_id,
            );
            let worker_cancel = cancel.clone();
            handles.push(tokio::spawn(async move {
                loop {
                    let slot = tokio::select! {
                        _ = worker_cancel.cancelled() => break,
                        slot = async {
                            let mut guard = rx.lock().await;
                            guard.recv().await
                        } => slot,
                    };
                    match slot {
                        Some(s) => worker.process_slot(s).await,
                        None => break,
                    }
                }
            }));
        }

        WorkerPool { handles, dispatcher_handle }
    }

    pub async fn join(self) {
        let _ = self.dispatcher_handle.await;
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}
