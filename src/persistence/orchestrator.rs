//! Persistence orchestrator. Grounded on
//! `original_source/rc_dex/consumer/internal/logic/block/pair.go`
//! (`SavePair`, `UpdatePairDBPoint`), `token.go` (`SaveToken`), and `db.go`
//! (`SaveTrades`/`BatchSaveByTrade`/`SavePairInfo`/`UpdateTokenMints`/
//! `UpdateTokenBurns`/`SavePumpSwapPoolInfo`/`SaveTokenAccounts`).

use crate::constants::{SWAP_NAME_PUMP_FUN, WSOL_MINT};
use crate::domain::{Pair, PumpAmmInfo, PumpStatus, Token, TokenAccount, Trade, TradeType};
use crate::errors::PersistError;
use crate::persistence::repo::{
    BlockRepo, PairRepo, PumpAmmInfoRepo, SolTokenAccountRepo, TokenAccountSnapshot, TokenRepo,
    TradeRepo,
};
use crate::rpc::NodeClientPool;
use rust_decimal::prelude::*;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Default prices used when a trade arrives with a zero base/token price,
/// mirroring `pair.go`'s hard-coded fallbacks.
const DEFAULT_BASE_TOKEN_PRICE: f64 = 161.876_662_583_626_14;
const DEFAULT_TOKEN_PRICE: f64 = 0.000_004_522_833_952_587;

pub struct Orchestrator {
    pub block_repo: Arc<dyn BlockRepo>,
    pub pair_repo: Arc<dyn PairRepo>,
    pub token_repo: Arc<dyn TokenRepo>,
    pub trade_repo: Arc<dyn TradeRepo>,
    pub pump_amm_repo: Arc<dyn PumpAmmInfoRepo>,
    pub token_account_repo: Arc<dyn SolTokenAccountRepo>,
    pub node_pool: Arc<NodeClientPool>,
    pub http: reqwest::Client,
    pub chain_id: u64,
}

fn decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

fn to_f64(v: Decimal) -> f64 {
    v.to_f64().unwrap_or(0.0)
}

impl Orchestrator {
    /// Runs the full per-block persistence flow.
    pub async fn persist_block(
        &self,
        slot: u64,
        trades: Vec<Trade>,
        token_accounts: &HashMap<String, TokenAccount>,
        pump_amm_infos: &HashMap<String, PumpAmmInfo>,
    ) -> Result<(), PersistError> {
        // Step 1: group by pair_addr.
        let mint_burn_trades: Vec<Trade> = trades
            .iter()
            .filter(|t| matches!(t.trade_type, TradeType::TokenMint | TradeType::TokenBurn))
            .cloned()
            .collect();
        let mut by_pair: HashMap<String, Vec<Trade>> = HashMap::new();
        for trade in trades {
            by_pair.entry(trade.pair_addr.clone()).or_default().push(trade);
        }

        // Step 2: per-pair group, save pair info then batch-insert trades.
        for (pair_addr, mut group) in by_pair {
            self.save_pair_info(&mut group).await?;
            self.batch_save_trades(&group).await?;

            // Step 5: PumpSwap pool metadata, once per pool.
            let is_pump_swap = group.iter().any(|t| t.swap_name == "PumpSwap");
            if is_pump_swap {
                if let Some(info) = pump_amm_infos.get(&pair_addr) {
                    self.save_pump_swap_pool_info(info).await?;
                }
            }
        }

        // Steps 3-4: mint/burn supply refresh. No-op unless a TokenMint/
        // TokenBurn trade is present in this block (PumpFun/PumpFun-AMM
        // decode to Buy/Sell only today).
        self.refresh_supply_on_mint_or_burn(&mint_burn_trades).await?;

        // Step 6: token account snapshots.
        self.save_token_accounts(slot, token_accounts).await?;

        Ok(())
    }

    /// SavePairInfo: pick the last trade, save token, propagate supply,
    /// save pair, back-propagate mcap/fdv to every trade in the group.
    async fn save_pair_info(&self, group: &mut [Trade]) -> Result<(), PersistError> {
        let last = match group.last() {
            Some(t) => t.clone(),
            None => return Ok(()),
        };

        let token = self.save_token(&last).await?;
        for trade in group.iter_mut() {
            trade.token_total_supply = token.total_supply;
        }

        let pair = self.save_pair(&last, token.total_supply).await?;
        for trade in group.iter_mut() {
            trade.mkt_cap = pair.mkt_cap;
            trade.fdv = pair.fdv;
        }
        Ok(())
    }

    /// SaveToken semantics: on new token, insert with decimals
    /// from trade and best-effort enrichment; on existing, fill only empty
    /// fields, writing back only if something changed.
    async fn save_token(&self, trade: &Trade) -> Result<Token, PersistError> {
        let mint = &trade.token_mint;
        let existing = self.token_repo.find_one_by(self.chain_id, mint).await?;
        match existing {
            None => {
                let mut token = Token::new(self.chain_id, mint.clone(), 0, trade.block_num);
                token.total_supply = trade.token_total_supply;
                self.enrich_token(&mut token).await;
                self.token_repo.insert(&token).await?;
                Ok(token)
            }
            Some(mut token) => {
                let mut incoming = token.clone();
                incoming.total_supply = trade.token_total_supply;
                let mut changed = token.merge_fill(&incoming);
                if token.symbol.is_empty() || token.name.is_empty() || token.program.is_none() {
                    let mut enriched = token.clone();
                    self.enrich_token(&mut enriched).await;
                    if token.merge_fill(&enriched) {
                        changed = true;
                    }
                }
                if changed {
                    self.token_repo.update(&token).await?;
                }
                Ok(token)
            }
        }
    }

    /// Best-effort metadata/supply enrichment (C2b/C3b): classify the
    /// mint's owner program, resolve the Metaplex metadata URI and fetch
    /// its offchain JSON, and fill total_supply via `getTokenSupply` if
    /// still unknown. Network failures are swallowed — enrichment is
    /// opportunistic, not required for a Token row to exist.
    async fn enrich_token(&self, token: &mut Token) {
        let (program, metadata) = crate::metadata::enrich_token(&self.node_pool, &self.http, &token.address).await;
        if let Some(program) = program {
            token.program = Some(program);
        }
        if let Some(meta) = metadata {
            if token.symbol.is_empty() {
                token.symbol = meta.symbol;
            }
            if token.name.is_empty() {
                token.name = meta.name;
            }
            if token.icon.is_empty() {
                token.icon = meta.icon;
            }
            if token.website.is_empty() {
                token.website = meta.website;
            }
            if token.twitter.is_empty() {
                token.twitter = meta.twitter;
            }
            if token.telegram.is_empty() {
                token.telegram = meta.telegram;
            }
            if token.description.is_empty() {
                token.description = meta.description;
            }
        }
        if token.total_supply == 0.0 {
            if let Ok(value) = self.node_pool.get_token_supply(&token.address).await {
                if let Some(supply) = parse_ui_amount(&value) {
                    token.total_supply = supply;
                }
            }
        }
    }

    /// SavePair semantics: insert-vs-update
    /// branch, monotonic-by-slot overwrite, PumpFun liquidity doubling,
    /// fallback default prices when zero.
    async fn save_pair(&self, trade: &Trade, token_total_supply: f64) -> Result<Pair, PersistError> {
        let base_price = if trade.base_token_price_usd != 0.0 {
            trade.base_token_price_usd
        } else {
            DEFAULT_BASE_TOKEN_PRICE
        };
        let token_price = if trade.token_price_usd != 0.0 {
            trade.token_price_usd
        } else {
            DEFAULT_TOKEN_PRICE
        };

        let existing = self.pair_repo.find_one_by(self.chain_id, &trade.pair_addr).await?;
        let is_pump_fun = trade.swap_name == SWAP_NAME_PUMP_FUN;

        let mut pair = match existing {
            None => {
                let liquidity = compute_liquidity(is_pump_fun, base_price, trade.base_token_amount, token_price, trade.token_amount);
                let (fdv, mkt_cap) = compute_fdv_mkt_cap(token_price, token_total_supply, liquidity);
                Pair {
                    chain_id: self.chain_id,
                    address: trade.pair_addr.clone(),
                    name: trade.swap_name.clone(),
                    base_token_addr: WSOL_MINT.to_string(),
                    token_addr: trade.token_mint.clone(),
                    base_token_symbol: String::new(),
                    token_symbol: String::new(),
                    base_token_decimal: 9,
                    token_decimal: 6,
                    current_base_token_amount: trade.base_token_amount,
                    current_token_amount: trade.token_amount,
                    init_base_token_amount: 0.0,
                    init_token_amount: 0.0,
                    fdv,
                    mkt_cap,
                    liquidity,
                    base_token_price: base_price,
                    token_price,
                    slot: trade.block_num,
                    block_time: trade.block_time,
                    latest_trade_time: trade.block_time,
                    pump_point: trade.pump_point,
                    pump_status: trade.pump_status,
                    pump_launched: is_pump_launched(trade.pump_status),
                    pump_market_cap: mkt_cap,
                    pump_virtual_base_token_reserves: if trade.pool_base_token_reserves > 0 {
                        trade.pool_base_token_reserves
                    } else {
                        crate::constants::INIT_PUMP_VIRTUAL_BASE_RESERVES
                    },
                    pump_virtual_token_reserves: trade.pool_quote_token_reserves,
                    pump_pair_addr: trade.pair_addr.clone(),
                    pump_owner: trade.maker.clone(),
                };
                pair.set_init_if_unset(trade.base_token_amount, trade.token_amount);
                self.pair_repo.insert(&pair).await?;
                return Ok(pair);
            }
            Some(p) => p,
        };

        pair.set_init_if_unset(trade.base_token_amount, trade.token_amount);
        pair.current_base_token_amount = trade.base_token_amount;
        pair.current_token_amount = trade.token_amount;
        if trade.base_token_price_usd != 0.0 {
            pair.base_token_price = base_price;
        }
        if trade.token_price_usd != 0.0 {
            pair.token_price = token_price;
        }

        if trade.block_num > pair.slot {
            // Monotonic overwrite: price/liquidity/pump fields + latest_trade_time.
            let liquidity = compute_liquidity(is_pump_fun, pair.base_token_price, pair.current_base_token_amount, pair.token_price, pair.current_token_amount);
            let (fdv, mkt_cap) = compute_fdv_mkt_cap(pair.token_price, token_total_supply, liquidity);
            pair.liquidity = liquidity;
            pair.fdv = fdv;
            pair.mkt_cap = mkt_cap;
            pair.latest_trade_time = trade.block_time;
            pair.slot = trade.block_num;
            pair.pump_point = trade.pump_point;
            pair.pump_status = trade.pump_status;
            pair.pump_launched = is_pump_launched(trade.pump_status);
            pair.pump_market_cap = mkt_cap;
            if trade.pool_base_token_reserves > 0 {
                pair.pump_virtual_base_token_reserves = trade.pool_base_token_reserves;
            }
            pair.pump_virtual_token_reserves = trade.pool_quote_token_reserves;
        }
        // else: only current_* and prices already updated above; pump
        // metrics are intentionally not rolled back.

        self.pair_repo.update(&pair).await?;
        Ok(pair)
    }

    async fn batch_save_trades(&self, group: &[Trade]) -> Result<(), PersistError> {
        let persistable: Vec<Trade> = group.iter().filter(|t| t.should_persist()).cloned().collect();
        if persistable.is_empty() {
            return Ok(());
        }
        self.trade_repo.batch_insert(&persistable).await
    }

    /// SavePumpSwapPoolInfo: insert once, absorb duplicate-key. The
    /// catch-all branch is treated as fatal — the original's silent-drop
    /// is judged a source bug.
    async fn save_pump_swap_pool_info(&self, info: &PumpAmmInfo) -> Result<(), PersistError> {
        if self.pump_amm_repo.find_one_by_pool(&info.pool_account).await?.is_some() {
            return Ok(());
        }
        self.pump_amm_repo.insert(info).await
    }

    /// SaveTokenAccounts: exclude WSOL, de-duplicate within the batch by
    /// `(owner, token_account_address)` preferring the later value.
    async fn save_token_accounts(
        &self,
        slot: u64,
        token_accounts: &HashMap<String, TokenAccount>,
    ) -> Result<(), PersistError> {
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut snapshots = Vec::new();
        // Iterate in reverse-insertion order to prefer the later value, the
        // way the original reverses, de-duplicates, then reverses back.
        let mut entries: Vec<&TokenAccount> = token_accounts.values().collect();
        entries.reverse();
        for acct in entries {
            if acct.token_address == WSOL_MINT {
                continue;
            }
            let key = (acct.owner.clone(), acct.token_account_address.clone());
            if !seen.insert(key) {
                continue;
            }
            snapshots.push(TokenAccountSnapshot {
                chain_id: self.chain_id,
                owner: acct.owner.clone(),
                token_account_address: acct.token_account_address.clone(),
                token_address: acct.token_address.clone(),
                token_decimal: acct.token_decimal,
                pre_value: acct.pre_value,
                post_value: acct.post_value,
                closed: acct.closed,
                init: acct.init,
                slot,
            });
        }
        snapshots.reverse();
        if snapshots.is_empty() {
            return Ok(());
        }
        self.token_account_repo.batch_insert(&snapshots).await
    }

    /// UpdateTokenMints / UpdateTokenBurns: refresh
    /// `total_supply` once per mint per block, only if positive. `trades`
    /// is expected pre-filtered to `TokenMint`/`TokenBurn`.
    async fn refresh_supply_on_mint_or_burn(&self, trades: &[Trade]) -> Result<(), PersistError> {
        let mut seen_mints = HashSet::new();
        for trade in trades {
            if !seen_mints.insert(trade.token_mint.clone()) {
                continue;
            }
            let existing = self.token_repo.find_one_by(self.chain_id, &trade.token_mint).await?;
            let mut token = match existing {
                Some(t) => t,
                None => continue,
            };
            let value = match self.node_pool.get_token_supply(&trade.token_mint).await {
                Ok(v) => v,
                Err(_) => continue,
            };
            if let Some(new_supply) = parse_ui_amount(&value) {
                if new_supply > 0.0 {
                    token.total_supply = new_supply;
                    self.token_repo.update(&token).await?;
                }
            }
        }
        Ok(())
    }
}

fn parse_ui_amount(value: &Value) -> Option<f64> {
    value.get("value")?.get("uiAmount")?.as_f64()
}

fn is_pump_launched(status: PumpStatus) -> bool {
    matches!(status, PumpStatus::Migrating | PumpStatus::End)
}

fn compute_liquidity(is_pump_fun: bool, base_price: f64, base_amount: f64, token_price: f64, token_amount: f64) -> f64 {
    if is_pump_fun {
        let two = Decimal::from(2);
        to_f64(two * decimal(base_price) * decimal(base_amount))
    } else {
        to_f64(decimal(base_price) * decimal(base_amount) + decimal(token_price) * decimal(token_amount))
    }
}

fn compute_fdv_mkt_cap(token_price: f64, token_total_supply: f64, liquidity_fallback: f64) -> (f64, f64) {
    if token_total_supply > 0.0 {
        let v = to_f64(decimal(token_price) * decimal(token_total_supply));
        (v, v)
    } else {
        (liquidity_fallback, liquidity_fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pump_fun_liquidity_is_doubled() {
        let liq = compute_liquidity(true, 150.0, 10.0, 0.0, 0.0);
        assert!((liq - 3000.0).abs() < 1e-6);
    }

    #[test]
    fn non_pump_fun_liquidity_sums_both_sides() {
        let liq = compute_liquidity(false, 150.0, 10.0, 2.0, 100.0);
        assert!((liq - (1500.0 + 200.0)).abs() < 1e-6);
    }

    #[test]
    fn fdv_falls_back_to_liquidity_when_supply_unknown() {
        let (fdv, mkt_cap) = compute_fdv_mkt_cap(5.0, 0.0, 42.0);
        assert_eq!(fdv, 42.0);
        assert_eq!(mkt_cap, 42.0);
    }
}
