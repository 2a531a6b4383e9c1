use super::pump::PumpStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    Buy,
    Sell,
    TokenMint,
    TokenBurn,
    Other(String),
}

/// Identity: `hash_id = "{slot}#{tx_index}"`. Persisted only if
/// `trade_type in {Buy, Sell}` and `token_price_usd > 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub hash_id: String,
    pub chain_id: u64,
    pub pair_addr: String,
    pub tx_hash: String,
    pub maker: String,
    pub trade_type: TradeType,
    pub base_token_amount: f64,
    pub token_amount: f64,
    pub base_token_price_usd: f64,
    pub total_usd: f64,
    pub token_price_usd: f64,
    pub to: String,
    pub block_num: u64,
    pub block_time: i64,
    pub swap_name: String,
    /// The indexed token's mint, threaded from the decoder through to the
    /// orchestrator so SaveToken/SavePair know which token to look up.
    /// Not a persisted column (the Trade row keys on `pair_addr`, not the
    /// mint) — ephemeral context, analogous to the Go original's in-memory
    /// `PairInfo` carried alongside the trade before persistence.
    #[serde(skip)]
    pub token_mint: String,
    /// Token total supply as of when this trade's pair/token were saved;
    /// propagated from SavePairInfo back into the trade.
    pub token_total_supply: f64,
    pub mkt_cap: f64,
    pub fdv: f64,
    /// Pool reserves as of this trade, carried through from the decoder so
    /// SavePair can derive `pump_point`/`pump_virtual_*` from it.
    pub pool_base_token_reserves: u64,
    pub pool_quote_token_reserves: u64,
    pub pump_point: f64,
    pub pump_status: PumpStatus,
}

impl Trade {
    pub fn hash_id(slot: u64, tx_index: usize) -> String {
        format!("{}#{}", slot, tx_index)
    }

    pub fn should_persist(&self) -> bool {
        matches!(self.trade_type, TradeType::Buy | TradeType::Sell) && self.token_price_usd > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(trade_type: TradeType, price: f64) -> Trade {
        Trade {
            hash_id: Trade::hash_id(1, 0),
            chain_id: 1,
            pair_addr: "pool".into(),
            tx_hash: "tx".into(),
            maker: "user".into(),
            trade_type,
            base_token_amount: 1.0,
            token_amount: 1.0,
            base_token_price_usd: 1.0,
            total_usd: 1.0,
            token_price_usd: price,
            to: String::new(),
            block_num: 1,
            block_time: 0,
            swap_name: "PumpSwap".into(),
            token_mint: "mint".into(),
            token_total_supply: 0.0,
            mkt_cap: 0.0,
            fdv: 0.0,
            pool_base_token_reserves: 0,
            pool_quote_token_reserves: 0,
            pump_point: 0.0,
            pump_status: PumpStatus::NotStart,
        }
    }

    #[test]
    fn persists_only_buy_sell_with_positive_price() {
        assert!(sample(TradeType::Buy, 1.0).should_persist());
        assert!(sample(TradeType::Sell, 1.0).should_persist());
        assert!(!sample(TradeType::Buy, 0.0).should_persist());
        assert!(!sample(TradeType::TokenMint, 1.0).should_persist());
    }

    #[test]
    fn hash_id_format() {
        assert_eq!(Trade::hash_id(100, 3), "100#3");
    }
}
