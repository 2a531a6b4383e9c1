//! PumpFun-AMM event-log parsing. Grounded on
//! `original_source/rc_dex/consumer/internal/logic/block/pump_amm.go`
//! (`parsePumpAmmEvents`: strip `"Program data: "`, base64-decode, match
//! first 8 bytes against the known event discriminators), using the same
//! manual byte-offset decoding style as the other pool decoders in this
//! codebase.

use crate::constants::{
    PROGRAM_DATA_LOG_PREFIX, PUMP_AMM_BUY_EVENT_DISCRIMINATOR,
    PUMP_AMM_CREATE_POOL_EVENT_DISCRIMINATOR, PUMP_AMM_SELL_EVENT_DISCRIMINATOR,
};
use crate::errors::DecodeError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

#[derive(Debug, Clone)]
pub struct BuyEvent {
    pub pool: String,
    pub user: String,
    pub base_amount_out: u64,
    pub quote_amount_in: u64,
    pub quote_amount_in_with_lp_fee: u64,
    pub pool_base_token_reserves: u64,
    pub pool_quote_token_reserves: u64,
}

#[derive(Debug, Clone)]
pub struct SellEvent {
    pub pool: String,
    pub user: String,
    pub base_amount_in: u64,
    pub quote_amount_out: u64,
    pub pool_base_token_reserves: u64,
    pub pool_quote_token_reserves: u64,
}

#[derive(Debug, Clone)]
pub struct CreatePoolEvent {
    pub pool: String,
    pub creator: String,
    pub base_mint: String,
    pub quote_mint: String,
}

#[derive(Debug, Clone)]
pub enum PumpAmmEvent {
    Buy(BuyEvent),
    Sell(SellEvent),
    CreatePool(CreatePoolEvent),
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Cursor<'a> {
        Cursor { data, pos: 0 }
    }

    fn u64(&mut self) -> Result<u64, DecodeError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + 8)
            .ok_or_else(|| DecodeError::DecodeFailure("truncated u64 field".into()))?;
        self.pos += 8;
        Ok(u64::from_le_bytes(bytes.try_into().unwrap()))
    }

    fn pubkey(&mut self) -> Result<String, DecodeError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + 32)
            .ok_or_else(|| DecodeError::DecodeFailure("truncated pubkey field".into()))?;
        self.pos += 32;
        Ok(bs58::encode(bytes).into_string())
    }
}

fn parse_buy(body: &[u8]) -> Result<BuyEvent, DecodeError> {
    let mut c = Cursor::new(body);
    Ok(BuyEvent {
        base_amount_out: c.u64()?,
        quote_amount_in: c.u64()?,
        quote_amount_in_with_lp_fee: c.u64()?,
        pool_base_token_reserves: c.u64()?,
        pool_quote_token_reserves: c.u64()?,
        pool: c.pubkey()?,
        user: c.pubkey()?,
    })
}

fn parse_sell(body: &[u8]) -> Result<SellEvent, DecodeError> {
    let mut c = Cursor::new(body);
    Ok(SellEvent {
        base_amount_in: c.u64()?,
        quote_amount_out: c.u64()?,
        pool_base_token_reserves: c.u64()?,
        pool_quote_token_reserves: c.u64()?,
        pool: c.pubkey()?,
        user: c.pubkey()?,
    })
}

fn parse_create_pool(body: &[u8]) -> Result<CreatePoolEvent, DecodeError> {
    let mut c = Cursor::new(body);
    Ok(CreatePoolEvent {
        pool: c.pubkey()?,
        creator: c.pubkey()?,
        base_mint: c.pubkey()?,
        quote_mint: c.pubkey()?,
    })
}

/// Parses every `"Program data: "` log line into a structured event.
/// Lines whose payload is too short, or whose discriminator doesn't
/// match a known event, are skipped rather than failing the whole
/// transaction
pub fn parse_pump_amm_events(log_messages: &[String]) -> Vec<PumpAmmEvent> {
    let mut events = Vec::new();
    for line in log_messages {
        let Some(encoded) = line.strip_prefix(PROGRAM_DATA_LOG_PREFIX) else {
            continue;
        };
        let Ok(payload) = BASE64.decode(encoded) else {
            continue;
        };
        if payload.len() < 8 {
            continue;
        }
        let discriminator: [u8; 8] = payload[0..8].try_into().unwrap();
        let body = &payload[8..];
        let parsed = if discriminator == PUMP_AMM_BUY_EVENT_DISCRIMINATOR {
            parse_buy(body).map(PumpAmmEvent::Buy)
        } else if discriminator == PUMP_AMM_SELL_EVENT_DISCRIMINATOR {
            parse_sell(body).map(PumpAmmEvent::Sell)
        } else if discriminator == PUMP_AMM_CREATE_POOL_EVENT_DISCRIMINATOR {
            parse_create_pool(body).map(PumpAmmEvent::CreatePool)
        } else {
            continue;
        };
        if let Ok(event) = parsed {
            events.push(event);
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_buy_event() -> String {
        let mut payload = PUMP_AMM_BUY_EVENT_DISCRIMINATOR.to_vec();
        payload.extend(1_000_000u64.to_le_bytes()); // base_amount_out
        payload.extend(50_000_000u64.to_le_bytes()); // quote_amount_in
        payload.extend(50_150_000u64.to_le_bytes()); // quote_amount_in_with_lp_fee
        payload.extend(872_000_000u64.to_le_bytes()); // pool_base_token_reserves
        payload.extend(100_000_000_000u64.to_le_bytes()); // pool_quote_token_reserves
        payload.extend([1u8; 32]); // pool
        payload.extend([2u8; 32]); // user
        format!("{}{}", PROGRAM_DATA_LOG_PREFIX, BASE64.encode(payload))
    }

    #[test]
    fn parses_buy_event_from_log_line() {
        let logs = vec![encode_buy_event()];
        let events = parse_pump_amm_events(&logs);
        assert_eq!(events.len(), 1);
        match &events[0] {
            PumpAmmEvent::Buy(b) => {
                assert_eq!(b.base_amount_out, 1_000_000);
                assert_eq!(b.quote_amount_in, 50_000_000);
                assert_eq!(b.pool_base_token_reserves, 872_000_000);
            }
            _ => panic!("expected buy event"),
        }
    }

    #[test]
    fn skips_short_or_unknown_payloads() {
        let logs = vec![
            format!("{}{}", PROGRAM_DATA_LOG_PREFIX, BASE64.encode([1, 2, 3])),
            "not a program data line".to_string(),
        ];
        assert!(parse_pump_amm_events(&logs).is_empty());
    }
}
