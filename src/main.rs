use clap::Parser;
use dex_event_indexer::config::Config;
use dex_event_indexer::constants::SOLANA_CHAIN_ID;
use dex_event_indexer::ingestion::{IngestionSupervisor, RecoveryScanner, REALTIME_QUEUE_CAPACITY, RECOVERY_QUEUE_CAPACITY};
use dex_event_indexer::logger::{self, LogLevel, LogTag};
use dex_event_indexer::persistence::{Database, Orchestrator};
use dex_event_indexer::rpc::NodeClientPool;
use dex_event_indexer::worker::WorkerPool;
use dex_event_indexer::{log_error, log_info};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "dex-event-indexer")]
struct Cli {
    /// Path to the JSON config file.
    #[arg(long, default_value = "config.json")]
    config: String,

    /// SQLite database file. Use ":memory:" for an ephemeral store.
    #[arg(long, default_value = "indexer.db")]
    db: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init(LogLevel::Info);
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            log_error!(LogTag::System, "failed to load config {}: {}, using defaults", cli.config, e);
            Config::default()
        }
    };

    let db = if cli.db == ":memory:" {
        Database::open_in_memory()?
    } else {
        Database::open(&cli.db)?
    };
    let db = Arc::new(db);

    let rpc_pool = Arc::new(NodeClientPool::new(config.sol.node_url.clone()));

    let orchestrator = Arc::new(Orchestrator {
        block_repo: db.clone(),
        pair_repo: db.clone(),
        token_repo: db.clone(),
        trade_repo: db.clone(),
        pump_amm_repo: db.clone(),
        token_account_repo: db.clone(),
        node_pool: rpc_pool.clone(),
        http: reqwest::Client::new(),
        chain_id: SOLANA_CHAIN_ID,
    });

    let recovery_scanner = Arc::new(RecoveryScanner::new(db.clone(), config.sol.start_block));
    let (supervisor, realtime_rx, recovery_rx) = IngestionSupervisor::start(
        config.sol.ws_url.clone(),
        recovery_scanner,
        REALTIME_QUEUE_CAPACITY,
        RECOVERY_QUEUE_CAPACITY,
    );

    let worker_pool = WorkerPool::spawn(
        config.consumer.concurrency,
        rpc_pool,
        orchestrator,
        db.clone(),
        SOLANA_CHAIN_ID,
        realtime_rx,
        recovery_rx,
        supervisor.cancel.clone(),
    );

    log_info!(LogTag::System, "indexer started, {} worker(s)", config.consumer.concurrency);

    let cancel = supervisor.cancel.clone();
    ctrlc::set_handler(move || {
        cancel.cancel();
    })?;

    supervisor.cancel.cancelled().await;
    log_info!(LogTag::System, "shutdown signal received, draining");
    supervisor.shutdown().await;
    worker_pool.join().await;
    log_info!(LogTag::System, "indexer stopped");

    Ok(())
}
