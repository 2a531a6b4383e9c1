//! SOL/USD price estimator. Grounded on
//! `original_source/rc_dex/consumer/internal/logic/block/util.go`
//! (`RemoveMinAndMaxAndCalculateAverage`) for the trimmed mean, and the
//! stable-DEX transfer-pairing scheme.

use crate::constants::{STABLE_DEX_PROGRAM_IDS, USDC_MINT, USDT_MINT, WSOL_MINT};
use crate::domain::TokenAccount;
use crate::rpc::types::{ParsedInstruction, TransactionEntry};
use std::collections::HashMap;

const TOKEN_TRANSFER: u8 = 3;
const TOKEN_TRANSFER_CHECKED: u8 = 12;
/// 10^(9 - 6): SOL is 9-decimal native, stablecoins are 6-decimal
const DECIMAL_GAP_FACTOR: f64 = 1000.0;

struct Transfer {
    source: String,
    destination: String,
    amount: i64,
}

fn decode_transfer(ix: &ParsedInstruction, account_keys: &[String]) -> Option<Transfer> {
    let data = bs58::decode(&ix.data).into_vec().ok()?;
    if data.is_empty() {
        return None;
    }
    match data[0] {
        TOKEN_TRANSFER if ix.accounts.len() >= 2 && data.len() >= 9 => {
            let amount = i64::from_le_bytes(data[1..9].try_into().ok()?);
            Some(Transfer {
                source: account_keys.get(ix.accounts[0])?.clone(),
                destination: account_keys.get(ix.accounts[1])?.clone(),
                amount,
            })
        }
        TOKEN_TRANSFER_CHECKED if ix.accounts.len() >= 3 && data.len() >= 9 => {
            let amount = i64::from_le_bytes(data[1..9].try_into().ok()?);
            Some(Transfer {
                source: account_keys.get(ix.accounts[0])?.clone(),
                destination: account_keys.get(ix.accounts[2])?.clone(),
                amount,
            })
        }
        _ => None,
    }
}

/// Estimates the SOL/USD rate for one transaction's worth of stable-DEX
/// activity. Returns the prices found (not yet trimmed-meaned) so the
/// caller can aggregate across a whole block.
pub fn collect_block_prices(
    tx: &TransactionEntry,
    token_accounts: &HashMap<String, TokenAccount>,
    has_change: bool,
) -> Vec<f64> {
    let mut prices = Vec::new();
    if !has_change {
        return prices;
    }
    let meta = match &tx.meta {
        Some(m) => m,
        None => return prices,
    };
    let account_keys = &tx.transaction.message.account_keys;

    for (top_index, ix) in tx.transaction.message.instructions.iter().enumerate() {
        let program = match account_keys.get(ix.program_id_index) {
            Some(p) => p,
            None => continue,
        };
        if !STABLE_DEX_PROGRAM_IDS.contains(&program.as_str()) {
            continue;
        }
        let mut transfers = Vec::new();
        for inner in &meta.inner_instructions {
            if inner.index != top_index {
                continue;
            }
            for inner_ix in &inner.instructions {
                if let Some(t) = decode_transfer(inner_ix, account_keys) {
                    transfers.push(t);
                }
            }
        }
        prices.extend(prices_from_transfers(&transfers, token_accounts));
    }
    prices
}

fn prices_from_transfers(transfers: &[Transfer], token_accounts: &HashMap<String, TokenAccount>) -> Vec<f64> {
    let mut found = Vec::new();
    for (i, a) in transfers.iter().enumerate() {
        for b in transfers.iter().skip(i + 1) {
            if let Some(price) = connected_pair_price(a, b, token_accounts) {
                found.push(price);
            } else if let Some(price) = connected_pair_price(b, a, token_accounts) {
                found.push(price);
            }
        }
    }
    found
}

/// If `sol_leg` is a WSOL transfer and `usd_leg` is a USDC/USDT transfer,
/// and the two legs share an owner on opposite ends (a swap, not a
/// forward), returns the implied SOL/USD price.
fn connected_pair_price(
    sol_leg: &Transfer,
    usd_leg: &Transfer,
    token_accounts: &HashMap<String, TokenAccount>,
) -> Option<f64> {
    let sol_src = token_accounts.get(&sol_leg.source)?;
    let sol_dst = token_accounts.get(&sol_leg.destination)?;
    let usd_src = token_accounts.get(&usd_leg.source)?;
    let usd_dst = token_accounts.get(&usd_leg.destination)?;

    if sol_src.token_address != WSOL_MINT {
        return None;
    }
    if usd_src.token_address != USDC_MINT && usd_src.token_address != USDT_MINT {
        return None;
    }

    let connected = sol_dst.owner == usd_src.owner || sol_src.owner == usd_dst.owner;
    if !connected {
        return None;
    }
    if sol_leg.amount == 0 {
        return None;
    }
    Some((usd_leg.amount as f64 / sol_leg.amount as f64) * DECIMAL_GAP_FACTOR)
}

/// Trimmed mean: drop the single min and single max, average the rest.
/// 0 samples -> 0; 1 or 2 samples -> plain average
/// Grounded on `RemoveMinAndMaxAndCalculateAverage` in
/// `original_source/rc_dex/consumer/internal/logic/block/util.go`.
pub fn trimmed_mean(samples: &[f64]) -> f64 {
    match samples.len() {
        0 => 0.0,
        1 => samples[0],
        2 => (samples[0] + samples[1]) / 2.0,
        _ => {
            let mut min_idx = 0;
            let mut max_idx = 0;
            for (i, v) in samples.iter().enumerate() {
                if *v < samples[min_idx] {
                    min_idx = i;
                }
                if *v > samples[max_idx] {
                    max_idx = i;
                }
            }
            let sum: f64 = samples
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != min_idx && *i != max_idx)
                .map(|(_, v)| *v)
                .sum();
            let count = samples.len() - 2;
            sum / count as f64
        }
    }
}

/// Fallback order: trimmed mean -> last known in-memory price -> the most
/// recent prior Processed block's price
pub fn estimate_sol_price(samples: &[f64], last_known: f64, prior_block_price: f64) -> f64 {
    let mean = trimmed_mean(samples);
    if mean > 0.0 {
        return mean;
    }
    if last_known > 0.0 {
        return last_known;
    }
    prior_block_price
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_mean_drops_extremes() {
        assert_eq!(trimmed_mean(&[1.0, 2.0, 3.0, 4.0, 100.0]), 3.0);
    }

    #[test]
    fn trimmed_mean_handles_small_inputs() {
        assert_eq!(trimmed_mean(&[]), 0.0);
        assert_eq!(trimmed_mean(&[5.0]), 5.0);
        assert_eq!(trimmed_mean(&[4.0, 6.0]), 5.0);
    }

    #[test]
    fn estimate_falls_back_through_the_chain() {
        assert_eq!(estimate_sol_price(&[], 150.0, 100.0), 150.0);
        assert_eq!(estimate_sol_price(&[], 0.0, 100.0), 100.0);
        assert_eq!(estimate_sol_price(&[10.0, 20.0], 0.0, 0.0), 15.0);
    }
}
