/// Static per-pool metadata Identity: `pool_account`. Inserted
/// once; subsequent inserts for the same pool are no-ops.
#[derive(Debug, Clone)]
pub struct PumpAmmInfo {
    pub pool_account: String,
    pub global_config_account: String,
    pub base_mint: String,
    pub quote_mint: String,
    pub pool_base_token_account: String,
    pub pool_quote_token_account: String,
    pub protocol_fee_recipient: String,
    pub protocol_fee_recipient_token_account: String,
    pub base_token_program: String,
    pub quote_token_program: String,
    pub event_authority: String,
}
