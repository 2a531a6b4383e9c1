use super::pump::PumpStatus;
use serde::{Deserialize, Serialize};

/// A trading pool. Identity: `(chain_id, address)`.
///
/// Fields derived from a trade are only overwritten when the new trade's
/// `slot >= stored slot` (monotonic). `init_*` fields are set once, on
/// first observation of a non-zero value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pair {
    pub chain_id: u64,
    pub address: String,
    pub name: String,
    pub base_token_addr: String,
    pub token_addr: String,
    pub base_token_symbol: String,
    pub token_symbol: String,
    pub base_token_decimal: u8,
    pub token_decimal: u8,
    pub current_base_token_amount: f64,
    pub current_token_amount: f64,
    pub init_base_token_amount: f64,
    pub init_token_amount: f64,
    pub fdv: f64,
    pub mkt_cap: f64,
    pub liquidity: f64,
    pub base_token_price: f64,
    pub token_price: f64,
    pub slot: u64,
    pub block_time: i64,
    pub latest_trade_time: i64,
    pub pump_point: f64,
    pub pump_status: PumpStatus,
    pub pump_launched: bool,
    pub pump_market_cap: f64,
    pub pump_virtual_base_token_reserves: u64,
    pub pump_virtual_token_reserves: u64,
    pub pump_pair_addr: String,
    pub pump_owner: String,
}

impl Pair {
    /// Sets `init_*` the first time a non-zero value is observed, never again.
    pub fn set_init_if_unset(&mut self, base_amount: f64, token_amount: f64) {
        if self.init_base_token_amount == 0.0 && base_amount != 0.0 {
            self.init_base_token_amount = base_amount;
        }
        if self.init_token_amount == 0.0 && token_amount != 0.0 {
            self.init_token_amount = token_amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Pair {
        Pair {
            chain_id: 1,
            address: "pool".into(),
            name: "PumpSwap".into(),
            base_token_addr: "mint".into(),
            token_addr: "mint".into(),
            base_token_symbol: String::new(),
            token_symbol: String::new(),
            base_token_decimal: 9,
            token_decimal: 6,
            current_base_token_amount: 0.0,
            current_token_amount: 0.0,
            init_base_token_amount: 0.0,
            init_token_amount: 0.0,
            fdv: 0.0,
            mkt_cap: 0.0,
            liquidity: 0.0,
            base_token_price: 0.0,
            token_price: 0.0,
            slot: 0,
            block_time: 0,
            latest_trade_time: 0,
            pump_point: 0.0,
            pump_status: PumpStatus::NotStart,
            pump_launched: false,
            pump_market_cap: 0.0,
            pump_virtual_base_token_reserves: 0,
            pump_virtual_token_reserves: 0,
            pump_pair_addr: String::new(),
            pump_owner: String::new(),
        }
    }

    #[test]
    fn init_amounts_set_once() {
        let mut p = sample();
        p.set_init_if_unset(100.0, 200.0);
        assert_eq!(p.init_base_token_amount, 100.0);
        assert_eq!(p.init_token_amount, 200.0);
        p.set_init_if_unset(999.0, 999.0);
        assert_eq!(p.init_base_token_amount, 100.0);
        assert_eq!(p.init_token_amount, 200.0);
    }
}
