//! Per-slot pipeline: fetch, reconstruct, price, decode, persist.
//! Grounded on `original_source/rc_dex/consumer/internal/logic/block/
//! block.go` (`HandleBlock`): one `Block` row per slot, status set exactly
//! once, transaction-level failures isolated from the rest of the block.

use crate::decode::{collect_block_prices, decode_transaction, estimate_sol_price, reconstruct_token_accounts};
use crate::domain::{Block, BlockStatus, PumpAmmInfo, TokenAccount, Trade};
use crate::errors::NodeError;
use crate::{log_debug, log_info, log_warn};
use crate::logger::LogTag;
use crate::persistence::{BlockRepo, Orchestrator};
use crate::rpc::NodeClientPool;
use std::collections::HashMap;
use std::sync::Arc;

/// One worker's private processing state. `last_known_sol_price` is
/// explicitly *not* shared across workers — each worker keeps its own
/// in-memory last-known SOL price.
pub struct BlockWorker {
    rpc_pool: Arc<NodeClientPool>,
    orchestrator: Arc<Orchestrator>,
    block_repo: Arc<dyn BlockRepo>,
    chain_id: u64,
    last_known_sol_price: f64,
}

impl BlockWorker {
    pub fn new(
        rpc_pool: Arc<NodeClientPool>,
        orchestrator: Arc<Orchestrator>,
        block_repo: Arc<dyn BlockRepo>,
        chain_id: u64,
    ) -> BlockWorker {
        BlockWorker {
            rpc_pool,
            orchestrator,
            block_repo,
            chain_id,
            last_known_sol_price: 0.0,
        }
    }

    /// Drives one slot through the full pipeline. Never propagates an
    /// error to the caller — every outcome ends in exactly one `Block`
    /// row being written.
    pub async fn process_slot(&mut self, slot: u64) {
        if slot == 0 {
            return;
        }

        let mut block = Block::new(slot);

        let fetched = match self.rpc_pool.get_block(slot).await {
            Ok(b) => b,
            Err(NodeError::Skipped) => {
                block.status = BlockStatus::Skipped;
                self.persist_block_row(&block).await;
                return;
            }
            Err(e) => {
                log_warn!(LogTag::Worker, "slot {} fetch failed: {}", slot, e);
                self.persist_block_row(&block).await;
                return;
            }
        };

        block.block_time = fetched.block_time;
        block.block_height = fetched.block_height;

        let prior_price = match self.block_repo.find_one_by_near_slot(slot).await {
            Ok(Some(prior)) => prior.sol_price,
            _ => 0.0,
        };

        let mut price_samples = Vec::new();
        let mut trades: Vec<Trade> = Vec::new();
        let mut pump_amm_infos: HashMap<String, PumpAmmInfo> = HashMap::new();
        let mut block_token_accounts: HashMap<String, TokenAccount> = HashMap::new();

        for (tx_index, tx) in fetched.transactions.iter().enumerate() {
            if let Some(meta) = &tx.meta {
                if meta.err.is_some() {
                    continue;
                }
            }

            let (tx_token_accounts, has_change) = reconstruct_token_accounts(tx);
            price_samples.extend(collect_block_prices(tx, &tx_token_accounts, has_change));

            for (addr, acct) in &tx_token_accounts {
                block_token_accounts.insert(addr.clone(), acct.clone());
            }

            let account_keys = &tx.transaction.message.account_keys;
            let log_messages = tx.meta.as_ref().map(|m| m.log_messages.as_slice()).unwrap_or(&[]);

            // Block SOL price for this transaction's trades: the running
            // estimate from everything seen in the block so far, falling
            // back through the worker's last-known and the prior block's.
            let block_sol_price =
                estimate_sol_price(&price_samples, self.last_known_sol_price, prior_price);

            for ix in &tx.transaction.message.instructions {
                match decode_transaction(ix, account_keys, log_messages, &tx_token_accounts, block_sol_price) {
                    Ok(Some(decoded)) => {
                        if !decoded.pump_amm_info.pool_account.is_empty() {
                            pump_amm_infos.insert(decoded.pair_addr.clone(), decoded.pump_amm_info.clone());
                        }
                        let tx_hash = tx.transaction.signatures.first().cloned().unwrap_or_default();
                        trades.push(Trade {
                            hash_id: Trade::hash_id(slot, tx_index),
                            chain_id: self.chain_id,
                            pair_addr: decoded.pair_addr.clone(),
                            tx_hash,
                            maker: decoded.maker,
                            trade_type: decoded.trade_type,
                            base_token_amount: decoded.base_token_amount,
                            token_amount: decoded.token_amount,
                            base_token_price_usd: block_sol_price,
                            total_usd: decoded.total_usd,
                            token_price_usd: decoded.token_price_usd,
                            to: decoded.pair_addr,
                            block_num: slot,
                            block_time: block.block_time.unwrap_or(0),
                            swap_name: decoded.swap_name,
                            token_mint: decoded.pump_amm_info.base_mint,
                            token_total_supply: 0.0,
                            mkt_cap: 0.0,
                            fdv: 0.0,
                            pool_base_token_reserves: decoded.pool_base_token_reserves,
                            pool_quote_token_reserves: decoded.pool_quote_token_reserves,
                            pump_point: decoded.pump_point,
                            pump_status: decoded.pump_status,
                        });
                    }
                    Ok(None) => {}
                    // "unknow program" (and its well-formed sibling
                    // UnknownProgram) are expected on the vast majority of
                    // instructions and are silently dropped.
                    Err(e) => {
                        log_debug!(LogTag::Decode, "slot {} tx {} instruction skipped: {}", slot, tx_index, e);
                    }
                }
            }
        }

        let final_sol_price = estimate_sol_price(&price_samples, self.last_known_sol_price, prior_price);
        if final_sol_price > 0.0 {
            self.last_known_sol_price = final_sol_price;
        }
        block.sol_price = final_sol_price;

        let trade_count = trades.len();
        match self
            .orchestrator
            .persist_block(slot, trades, &block_token_accounts, &pump_amm_infos)
            .await
        {
            Ok(()) => {
                block.status = BlockStatus::Processed;
                log_info!(LogTag::Worker, "slot {} processed: {} trade(s)", slot, trade_count);
            }
            Err(e) => {
                log_warn!(LogTag::Persistence, "slot {} persistence failed: {}", slot, e);
                block.status = BlockStatus::Failed;
            }
        }

        self.persist_block_row(&block).await;
    }

    async fn persist_block_row(&self, block: &Block) {
        if let Err(e) = self.block_repo.insert(block).await {
            log_warn!(LogTag::Worker, "slot {} block row write failed: {}", block.slot, e);
        }
    }
}
