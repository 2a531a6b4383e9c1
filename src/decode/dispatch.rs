//! Program-keyed instruction dispatch and trade assembly.
//! Grounded on `original_source/rc_dex/consumer/internal/logic/block/
//! pump_amm.go` (`DecodePumpFunAMMInstruction`,
//! `DecodePumpFunAMMBuyInstruction`/`SellInstruction`) for the dispatch and
//! Buy/Sell field math, and its fixed account layout.

use super::pump_curve::{clamp_if_migrating, pump_point};
use super::pumpfun_amm::{parse_pump_amm_events, PumpAmmEvent};
use crate::constants::{
    INIT_PUMP_VIRTUAL_BASE_RESERVES, PUMP_AMM_BUY_DISCRIMINATOR, PUMP_AMM_SELL_DISCRIMINATOR,
    PUMP_FUN_AMM_PROGRAM_ID, PUMP_FUN_PROGRAM_ID, SWAP_NAME_PUMP_SWAP,
};
use crate::domain::{PumpAmmInfo, PumpStatus, TokenAccount, TradeType};
use crate::errors::DecodeError;
use crate::rpc::types::{ParsedInstruction, TransactionEntry};
use std::collections::HashMap;

const BUY_ACCOUNT_COUNT: usize = 23;
const SELL_ACCOUNT_COUNT: usize = 21;

/// Named account roles shared by Buy and Sell; positions carry named
/// roles. Indices beyond these are program-specific extras (e.g.
/// coin-creator vault) not modeled further.
struct PoolAccounts<'a> {
    pool: &'a str,
    user: &'a str,
    global_config: &'a str,
    base_mint: &'a str,
    quote_mint: &'a str,
    user_base_token_account: &'a str,
    user_quote_token_account: &'a str,
    pool_base_token_account: &'a str,
    pool_quote_token_account: &'a str,
    protocol_fee_recipient: &'a str,
    protocol_fee_recipient_token_account: &'a str,
    base_token_program: &'a str,
    quote_token_program: &'a str,
    event_authority: &'a str,
}

fn pool_accounts<'a>(
    accounts: &[usize],
    account_keys: &'a [String],
    expected_len: usize,
) -> Result<PoolAccounts<'a>, DecodeError> {
    if accounts.len() != expected_len {
        return Err(DecodeError::DecodeFailure(format!(
            "expected {} accounts, got {}",
            expected_len,
            accounts.len()
        )));
    }
    let at = |i: usize| -> Result<&'a str, DecodeError> {
        account_keys
            .get(*accounts.get(i).ok_or_else(|| DecodeError::DecodeFailure("short account list".into()))?)
            .map(|s| s.as_str())
            .ok_or_else(|| DecodeError::DecodeFailure("account index out of range".into()))
    };
    Ok(PoolAccounts {
        pool: at(0)?,
        user: at(1)?,
        global_config: at(2)?,
        base_mint: at(3)?,
        quote_mint: at(4)?,
        user_base_token_account: at(5)?,
        user_quote_token_account: at(6)?,
        pool_base_token_account: at(7)?,
        pool_quote_token_account: at(8)?,
        protocol_fee_recipient: at(9)?,
        protocol_fee_recipient_token_account: at(10)?,
        base_token_program: at(11)?,
        quote_token_program: at(12)?,
        event_authority: at(15)?,
    })
}

impl From<&PoolAccounts<'_>> for PumpAmmInfo {
    fn from(a: &PoolAccounts<'_>) -> Self {
        PumpAmmInfo {
            pool_account: a.pool.to_string(),
            global_config_account: a.global_config.to_string(),
            base_mint: a.base_mint.to_string(),
            quote_mint: a.quote_mint.to_string(),
            pool_base_token_account: a.pool_base_token_account.to_string(),
            pool_quote_token_account: a.pool_quote_token_account.to_string(),
            protocol_fee_recipient: a.protocol_fee_recipient.to_string(),
            protocol_fee_recipient_token_account: a.protocol_fee_recipient_token_account.to_string(),
            base_token_program: a.base_token_program.to_string(),
            quote_token_program: a.quote_token_program.to_string(),
            event_authority: a.event_authority.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecodedTrade {
    pub pair_addr: String,
    pub maker: String,
    pub trade_type: TradeType,
    pub base_token_amount: f64,
    pub token_amount: f64,
    pub sol_amount: f64,
    pub token_price_usd: f64,
    pub total_usd: f64,
    pub pool_base_token_reserves: u64,
    pub pool_quote_token_reserves: u64,
    pub pump_point: f64,
    pub pump_status: PumpStatus,
    pub swap_name: String,
    pub pump_amm_info: PumpAmmInfo,
}

/// Dispatches one top-level instruction. Returns `Ok(None)` for cases
/// that are silently skipped (missing context, zero token amount), and
/// `Err` only for genuine decode failures.
pub fn decode_transaction(
    ix: &ParsedInstruction,
    account_keys: &[String],
    log_messages: &[String],
    token_accounts: &HashMap<String, TokenAccount>,
    block_sol_price: f64,
) -> Result<Option<DecodedTrade>, DecodeError> {
    let program = account_keys
        .get(ix.program_id_index)
        .map(|s| s.as_str())
        .ok_or(DecodeError::UnknownProgram)?;

    if program == PUMP_FUN_PROGRAM_ID {
        // PumpFun's pure bonding-curve instruction decoding is declared but
        // left as a TODO in the original source; only the dispatch
        // contract is implemented here.
        return Ok(None);
    }

    if program != PUMP_FUN_AMM_PROGRAM_ID {
        return Err(DecodeError::UnknownProgram);
    }

    let data = bs58::decode(&ix.data)
        .into_vec()
        .map_err(|e| DecodeError::DecodeFailure(e.to_string()))?;
    if data.len() < 8 {
        return Err(DecodeError::UnknownDiscriminator);
    }
    let discriminator: [u8; 8] = data[0..8].try_into().unwrap();

    if discriminator == PUMP_AMM_BUY_DISCRIMINATOR {
        decode_buy(ix, account_keys, log_messages, token_accounts, block_sol_price)
    } else if discriminator == PUMP_AMM_SELL_DISCRIMINATOR {
        decode_sell(ix, account_keys, log_messages, token_accounts, block_sol_price)
    } else {
        Err(DecodeError::UnknownDiscriminator)
    }
}

fn find_event<'a>(events: &'a [PumpAmmEvent], want_buy: bool) -> Option<&'a PumpAmmEvent> {
    events.iter().find(|e| match (e, want_buy) {
        (PumpAmmEvent::Buy(_), true) => true,
        (PumpAmmEvent::Sell(_), false) => true,
        _ => false,
    })
}

fn decode_buy(
    ix: &ParsedInstruction,
    account_keys: &[String],
    log_messages: &[String],
    token_accounts: &HashMap<String, TokenAccount>,
    block_sol_price: f64,
) -> Result<Option<DecodedTrade>, DecodeError> {
    let accounts = pool_accounts(&ix.accounts, account_keys, BUY_ACCOUNT_COUNT)?;
    let events = parse_pump_amm_events(log_messages);
    let event = match find_event(&events, true) {
        Some(PumpAmmEvent::Buy(b)) => b,
        _ => return Err(DecodeError::DecodeFailure("missing BuyEvent".into())),
    };

    let base = match token_accounts.get(accounts.user_base_token_account) {
        Some(a) => a,
        None => return Ok(None),
    };
    let quote = match token_accounts.get(accounts.user_quote_token_account) {
        Some(a) => a,
        None => return Ok(None),
    };

    let base_token_amount = crate::domain::ui(event.quote_amount_in_with_lp_fee as f64, quote.token_decimal);
    let token_amount = crate::domain::ui(event.base_amount_out as f64, base.token_decimal);
    if token_amount == 0.0 {
        return Ok(None);
    }
    let sol_amount = crate::domain::ui(event.quote_amount_in as f64, quote.token_decimal);
    let total_usd = sol_amount * block_sol_price;
    let token_price_usd = total_usd / token_amount;

    let point = pump_point(event.pool_base_token_reserves);
    let (point, migrating) = clamp_if_migrating(point);
    let status = if migrating { PumpStatus::Migrating } else { PumpStatus::Trading };

    Ok(Some(DecodedTrade {
        pair_addr: accounts.pool.to_string(),
        maker: accounts.user.to_string(),
        trade_type: TradeType::Buy,
        base_token_amount,
        token_amount,
        sol_amount,
        token_price_usd,
        total_usd,
        pool_base_token_reserves: event.pool_base_token_reserves,
        pool_quote_token_reserves: event.pool_quote_token_reserves,
        pump_point: point,
        pump_status: status,
        swap_name: SWAP_NAME_PUMP_SWAP.to_string(),
        pump_amm_info: PumpAmmInfo::from(&accounts),
    }))
}

fn decode_sell(
    ix: &ParsedInstruction,
    account_keys: &[String],
    log_messages: &[String],
    token_accounts: &HashMap<String, TokenAccount>,
    block_sol_price: f64,
) -> Result<Option<DecodedTrade>, DecodeError> {
    let accounts = pool_accounts(&ix.accounts, account_keys, SELL_ACCOUNT_COUNT)?;
    let events = parse_pump_amm_events(log_messages);
    let event = match find_event(&events, false) {
        Some(PumpAmmEvent::Sell(s)) => s,
        _ => return Err(DecodeError::DecodeFailure("missing SellEvent".into())),
    };

    let base = match token_accounts.get(accounts.user_base_token_account) {
        Some(a) => a,
        None => return Ok(None),
    };
    let quote = match token_accounts.get(accounts.user_quote_token_account) {
        Some(a) => a,
        None => return Ok(None),
    };

    let token_amount = crate::domain::ui(event.base_amount_in as f64, base.token_decimal);
    if token_amount == 0.0 {
        return Ok(None);
    }
    let sol_amount = crate::domain::ui(event.quote_amount_out as f64, quote.token_decimal);
    let base_token_amount = sol_amount;
    let total_usd = sol_amount * block_sol_price;
    let token_price_usd = total_usd / token_amount;

    let point = pump_point(event.pool_base_token_reserves);
    let (point, migrating) = clamp_if_migrating(point);
    let status = if migrating { PumpStatus::Migrating } else { PumpStatus::Trading };

    Ok(Some(DecodedTrade {
        pair_addr: accounts.pool.to_string(),
        maker: accounts.user.to_string(),
        trade_type: TradeType::Sell,
        base_token_amount,
        token_amount,
        sol_amount,
        token_price_usd,
        total_usd,
        pool_base_token_reserves: event.pool_base_token_reserves,
        pool_quote_token_reserves: event.pool_quote_token_reserves,
        pump_point: point,
        pump_status: status,
        swap_name: SWAP_NAME_PUMP_SWAP.to_string(),
        pump_amm_info: PumpAmmInfo::from(&accounts),
    }))
}

/// Virtual base reserves recorded on the Pair the first time a pool is
/// observed.
pub fn init_virtual_base_reserves() -> u64 {
    INIT_PUMP_VIRTUAL_BASE_RESERVES
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use crate::constants::PROGRAM_DATA_LOG_PREFIX;

    fn pubkey_bytes(fill: u8) -> Vec<u8> {
        vec![fill; 32]
    }

    fn buy_accounts_and_keys() -> (Vec<usize>, Vec<String>) {
        let keys: Vec<String> = (0..BUY_ACCOUNT_COUNT)
            .map(|i| format!("acct{}", i))
            .collect();
        let accounts: Vec<usize> = (0..BUY_ACCOUNT_COUNT).collect();
        (accounts, keys)
    }

    fn encode_buy_log() -> String {
        let mut payload = crate::constants::PUMP_AMM_BUY_EVENT_DISCRIMINATOR.to_vec();
        payload.extend(1_000_000u64.to_le_bytes());
        payload.extend(50_000_000u64.to_le_bytes());
        payload.extend(50_150_000u64.to_le_bytes());
        payload.extend(872_000_000u64.to_le_bytes());
        payload.extend(100_000_000_000u64.to_le_bytes());
        payload.extend(pubkey_bytes(1));
        payload.extend(pubkey_bytes(2));
        format!("{}{}", PROGRAM_DATA_LOG_PREFIX, BASE64.encode(payload))
    }

    #[test]
    fn s1_pumpswap_buy_happy_path() {
        let (accounts, keys) = buy_accounts_and_keys();
        let ix = ParsedInstruction {
            program_id_index: 0,
            accounts: accounts.clone(),
            data: bs58::encode(&PUMP_AMM_BUY_DISCRIMINATOR).into_string(),
        };
        let mut all_keys = keys.clone();
        all_keys[0] = PUMP_FUN_AMM_PROGRAM_ID.to_string();

        let mut token_accounts = HashMap::new();
        token_accounts.insert(
            "acct5".to_string(),
            TokenAccount {
                owner: "acct1".into(),
                token_account_address: "acct5".into(),
                token_address: "mint_base".into(),
                token_decimal: 6,
                pre_value: 0,
                post_value: 1_000_000,
                closed: false,
                init: true,
            },
        );
        token_accounts.insert(
            "acct6".to_string(),
            TokenAccount {
                owner: "acct1".into(),
                token_account_address: "acct6".into(),
                token_address: crate::constants::WSOL_MINT.into(),
                token_decimal: 9,
                pre_value: 0,
                post_value: 0,
                closed: false,
                init: false,
            },
        );

        let logs = vec![encode_buy_log()];
        let trade = decode_transaction(&ix, &all_keys, &logs, &token_accounts, 150.0)
            .unwrap()
            .expect("trade produced");

        assert_eq!(trade.trade_type, TradeType::Buy);
        assert!((trade.token_amount - 1.0).abs() < 1e-9);
        assert!((trade.base_token_amount - 0.05015).abs() < 1e-9);
        assert!((trade.total_usd - 7.5).abs() < 1e-9);
        assert!((trade.token_price_usd - 7.5).abs() < 1e-9);
        assert_eq!(trade.swap_name, SWAP_NAME_PUMP_SWAP);
        assert!((trade.pump_point - 0.001146).abs() < 1e-5);
        assert_eq!(trade.pump_status, PumpStatus::Trading);
    }

    #[test]
    fn s4_missing_token_account_context_yields_no_trade() {
        let (accounts, keys) = buy_accounts_and_keys();
        let ix = ParsedInstruction {
            program_id_index: 0,
            accounts,
            data: bs58::encode(&PUMP_AMM_BUY_DISCRIMINATOR).into_string(),
        };
        let mut all_keys = keys;
        all_keys[0] = PUMP_FUN_AMM_PROGRAM_ID.to_string();
        let logs = vec![encode_buy_log()];
        let empty_map = HashMap::new();
        let trade = decode_transaction(&ix, &all_keys, &logs, &empty_map, 150.0).unwrap();
        assert!(trade.is_none());
    }

    #[test]
    fn s3_unknown_program_is_an_error_callers_skip() {
        let ix = ParsedInstruction {
            program_id_index: 0,
            accounts: vec![],
            data: "".into(),
        };
        let keys = vec!["some_other_program".to_string()];
        let empty_map = HashMap::new();
        let err = decode_transaction(&ix, &keys, &[], &empty_map, 150.0).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownProgram));
    }
}
